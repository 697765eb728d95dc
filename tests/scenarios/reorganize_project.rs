//! Reorganizing a project in the resource browser (in-memory storage)

use arbor::application::{DialogOutcome, DialogPhase};
use arbor::domain::ports::BrowserEvent;
use arbor::ResourceBrowser;

use crate::common::*;

/// Rename through the dialog: request, open next frame, type, confirm
fn rename(h: &Harness, browser: &mut ResourceBrowser, path: &str, name: &str) -> DialogOutcome {
    assert!(browser.begin_rename(&project(path)));
    h.frame(browser);
    browser.set_dialog_input(name);
    browser.confirm_rename(&h.ops())
}

/// SCENARIO: Renaming a folder while a file inside it is selected
///
/// The storage backend sees one move, every cached resource below the
/// folder is invalidated after it, and both panes follow the rename.
#[test]
fn scenario_rename_folder_with_open_selection() {
    let h = Harness::project();
    for key in ["Levels", "Levels/Old/cave.xml", "readme.md"] {
        h.cache.insert(key, vec![1]);
    }
    let mut browser = h.browser();
    assert!(browser.select_left(&project("Levels/Old")));
    assert!(browser.select_right(&project("Levels/Old/cave.xml")));

    assert_eq!(rename(&h, &mut browser, "Levels", "Maps"), DialogOutcome::Committed);
    assert!(browser.rename_dialog().is_closed());

    assert_eq!(h.storage.journal().len(), 1);
    assert_eq!(
        h.cache.invalidated(),
        vec!["Levels", "Levels/Old", "Levels/Old/cave.xml", "Levels/forest.xml"]
    );
    assert!(!h.cache.contains("Levels/Old/cave.xml"));
    assert!(h.cache.contains("readme.md"));

    // Panes were remapped before the rebuild and resolve after it
    assert_eq!(browser.left(), &project("Maps/Old"));
    assert_eq!(browser.right(), Some(&project("Maps/Old/cave.xml")));
    assert!(h.frame(&mut browser));
    assert!(browser.tree().resolve(&project("Maps/Old/cave.xml")).is_some());
    assert!(browser.tree().resolve(&project("Levels")).is_none());
    assert_eq!(browser.left(), &project("Maps/Old"));

    let renamed = h.events.events().into_iter().any(|event| {
        event
            == BrowserEvent::EntryRenamed {
                from: "Levels".to_string(),
                to: "Maps".to_string(),
                remapped: 4,
            }
    });
    assert!(renamed);
}

/// SCENARIO: A name collision is refused before anything changes
#[test]
fn scenario_collision_leaves_storage_untouched() {
    let h = Harness::new(project_storage().with_file("/p/Levels/desert.xml", b""));
    h.cache.insert("Levels/forest.xml", vec![1]);
    let mut browser = h.browser();
    let before = h.storage.paths();

    let outcome = rename(&h, &mut browser, "Levels/forest.xml", "desert.xml");

    match outcome {
        DialogOutcome::Rejected(reason) => assert!(reason.contains("desert.xml"), "{}", reason),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(h.storage.paths(), before);
    assert!(h.storage.journal().is_empty());
    assert!(h.cache.invalidated().is_empty());
    assert!(!browser.tree().is_dirty());

    // The dialog stays open with the reason until the user edits the name
    assert_eq!(browser.rename_dialog().phase(), DialogPhase::Open);
    assert!(browser.rename_dialog().error().is_some());
    browser.set_dialog_input("dunes.xml");
    assert!(browser.rename_dialog().error().is_none());
    assert_eq!(browser.confirm_rename(&h.ops()), DialogOutcome::Committed);
}

/// SCENARIO: The disk refuses a move after validation passed
#[test]
fn scenario_storage_failure_invalidates_nothing() {
    let h = Harness::project();
    let mut browser = h.browser();
    h.storage.fail_next("disk full");

    let outcome = rename(&h, &mut browser, "Levels/forest.xml", "meadow.xml");

    assert_eq!(outcome, DialogOutcome::Rejected("disk full".to_string()));
    assert!(h.cache.invalidated().is_empty());
    assert!(h.storage.read_file("/p/Levels/forest.xml").is_some());

    // Retrying from the still-open dialog succeeds
    assert_eq!(browser.confirm_rename(&h.ops()), DialogOutcome::Committed);
    assert_eq!(h.cache.invalidated(), vec!["Levels/forest.xml"]);
    assert!(h.storage.read_file("/p/Levels/meadow.xml").is_some());
}

/// SCENARIO: Creating a folder, then a text file inside it
#[test]
fn scenario_create_folder_then_file() {
    let h = Harness::project();
    let mut browser = h.browser();
    let folder = browser.factories().find_by_title("Folder").unwrap();
    let text = browser.factories().find_by_title("Text File").unwrap();

    assert!(browser.begin_create(&project("Levels"), folder));
    assert!(!browser.create_dialog().is_open());
    h.frame(&mut browser);
    assert_eq!(browser.create_dialog().input(), "New Folder");
    assert_eq!(browser.confirm_create(&h.ops()), DialogOutcome::Committed);
    h.frame(&mut browser);
    assert!(browser
        .tree()
        .resolve(&project("Levels/New Folder"))
        .is_some_and(|entry| entry.is_directory()));

    assert!(browser.begin_create(&project("Levels/New Folder"), text));
    h.frame(&mut browser);
    browser.set_dialog_input("notes.txt");
    assert_eq!(browser.confirm_create(&h.ops()), DialogOutcome::Committed);
    h.frame(&mut browser);

    assert_eq!(browser.right(), Some(&project("Levels/New Folder/notes.txt")));
    assert_eq!(
        h.storage.read_file("/p/Levels/New Folder/notes.txt"),
        Some(Vec::new())
    );
}

/// SCENARIO: Composite files can be browsed but their members are fixed
#[test]
fn scenario_composite_members_are_read_only() {
    let h = Harness::project();
    let mut browser = h.browser();
    let member = project("Models/tree.pak/leaves/summer.mesh");
    assert!(browser.tree().resolve(&member).is_some());
    assert!(browser.select_left(&project("Models/tree.pak")));

    assert!(browser.begin_delete(&member));
    h.frame(&mut browser);
    match browser.confirm_delete(&h.ops()) {
        DialogOutcome::Rejected(reason) => assert!(reason.contains("cannot modify"), "{}", reason),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert!(h.storage.journal().is_empty());
}

/// SCENARIO: Dragging a file into a folder
#[test]
fn scenario_move_file_into_folder() {
    let h = Harness::project();
    let mut browser = h.browser();
    assert!(browser.select_right(&project("readme.md")));

    let result = browser
        .move_to_folder(&h.ops(), &project("readme.md"), &project("Levels/Old"))
        .unwrap();

    assert_eq!(
        result.remapping,
        vec![("readme.md".to_string(), "Levels/Old/readme.md".to_string())]
    );
    assert_eq!(browser.right(), Some(&project("Levels/Old/readme.md")));
    h.frame(&mut browser);
    assert!(browser.tree().resolve(&project("Levels/Old/readme.md")).is_some());

    // A folder never moves into itself
    let err = browser
        .move_to_folder(&h.ops(), &project("Levels"), &project("Levels/Old"))
        .unwrap_err();
    assert_eq!(err.kind(), "unsupported");
}

/// SCENARIO: Another program changes the project between frames
#[test]
fn scenario_external_changes_appear_next_frame() {
    let h = Harness::project();
    let mut browser = h.browser();
    assert!(browser.select_left(&project("Levels/Old")));

    h.storage.add_file("/p/Levels/swamp.xml", b"");
    h.storage.remove_external("/p/Levels/Old");
    browser.notify_external_change();
    browser.notify_external_change();

    h.events.take();
    assert!(h.frame(&mut browser));
    assert!(!h.frame(&mut browser));
    let rebuilds = h
        .events
        .events()
        .iter()
        .filter(|event| matches!(event, BrowserEvent::TreeRebuilt { .. }))
        .count();
    assert_eq!(rebuilds, browser.tree().roots().len());

    assert!(all_paths(&browser, PROJECT_ROOT).contains(&"Levels/swamp.xml".to_string()));
    // The vanished folder falls back to its parent
    assert_eq!(browser.left(), &project("Levels"));
}
