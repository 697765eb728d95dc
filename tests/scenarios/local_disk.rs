//! The resource browser on a real directory

use std::fs;
use std::path::Path;

use arbor::application::DialogOutcome;
use arbor::domain::ports::{NoopEventSink, NullResourceCache};
use arbor::{BrowserConfig, EntryOperations, EntryReference, LocalStorage, ResourceBrowser};
use tempfile::tempdir;

use crate::common::PROJECT_ROOT;

fn write(dir: &Path, relative: &str, contents: &str) {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn browser(dir: &Path, storage: &LocalStorage) -> ResourceBrowser {
    let mut browser = ResourceBrowser::from_config(&BrowserConfig::for_project(dir), dir);
    browser.begin_frame(&EntryOperations::new(storage, &NullResourceCache, &NoopEventSink));
    browser
}

fn project(path: &str) -> EntryReference {
    EntryReference::new(PROJECT_ROOT, path)
}

/// SCENARIO: Renaming a folder on disk carries its contents along
#[test]
fn scenario_rename_directory_on_disk() {
    let dir = tempdir().unwrap();
    write(dir.path(), "Textures/grass.png", "png");
    write(dir.path(), "Textures/Rock/granite.png", "png");
    let storage = LocalStorage::new();
    let ops = EntryOperations::new(&storage, &NullResourceCache, &NoopEventSink);
    let mut browser = browser(dir.path(), &storage);

    assert!(browser.begin_rename(&project("Textures")));
    browser.begin_frame(&ops);
    browser.set_dialog_input("Materials");
    assert_eq!(browser.confirm_rename(&ops), DialogOutcome::Committed);

    assert!(dir.path().join("Materials/Rock/granite.png").is_file());
    assert!(!dir.path().join("Textures").exists());
    browser.begin_frame(&ops);
    assert!(browser.tree().resolve(&project("Materials/Rock/granite.png")).is_some());
}

/// SCENARIO: The disk already holds the target name the tree has not seen yet
#[test]
fn scenario_disk_collision_is_reported() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.txt", "a");
    let storage = LocalStorage::new();
    let ops = EntryOperations::new(&storage, &NullResourceCache, &NoopEventSink);
    let mut browser = browser(dir.path(), &storage);

    // Appears after the last rebuild, so name validation cannot see it
    write(dir.path(), "b.txt", "b");
    assert!(browser.begin_rename(&project("a.txt")));
    browser.begin_frame(&ops);
    browser.set_dialog_input("b.txt");

    match browser.confirm_rename(&ops) {
        DialogOutcome::Rejected(reason) => assert!(reason.contains("already exists"), "{}", reason),
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "b");
    assert_eq!(fs::read_to_string(dir.path().join("a.txt")).unwrap(), "a");
}

/// SCENARIO: Create and delete through the dialogs
#[test]
fn scenario_create_then_delete_on_disk() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("Scripts")).unwrap();
    let storage = LocalStorage::new();
    let ops = EntryOperations::new(&storage, &NullResourceCache, &NoopEventSink);
    let mut browser = browser(dir.path(), &storage);
    let text = browser.factories().find_by_title("text file").unwrap();

    assert!(browser.begin_create(&project("Scripts"), text));
    browser.begin_frame(&ops);
    browser.set_dialog_input("main.lua");
    assert_eq!(browser.confirm_create(&ops), DialogOutcome::Committed);
    assert_eq!(fs::read(dir.path().join("Scripts/main.lua")).unwrap(), Vec::<u8>::new());

    browser.begin_frame(&ops);
    assert!(browser.begin_delete(&project("Scripts")));
    browser.begin_frame(&ops);
    assert_eq!(browser.confirm_delete(&ops), DialogOutcome::Committed);
    assert!(!dir.path().join("Scripts").exists());

    browser.begin_frame(&ops);
    assert_eq!(browser.left(), &EntryReference::root(PROJECT_ROOT));
}

/// SCENARIO: Ignore files hide build output when enabled
#[test]
fn scenario_ignore_files_are_optional() {
    let dir = tempdir().unwrap();
    write(dir.path(), ".gitignore", "build/\n*.tmp\n");
    write(dir.path(), "build/out.bin", "");
    write(dir.path(), "scratch.tmp", "");
    write(dir.path(), "main.txt", "");

    let names = |storage: LocalStorage| -> Vec<String> {
        let browser = browser(dir.path(), &storage);
        browser
            .directory_listing()
            .iter()
            .map(|entry| entry.name().to_string())
            .collect()
    };

    // Hidden files never show
    assert_eq!(names(LocalStorage::new()), vec!["build", "main.txt", "scratch.tmp"]);
    assert_eq!(names(LocalStorage::new().respect_ignore_files(true)), vec!["main.txt"]);
}
