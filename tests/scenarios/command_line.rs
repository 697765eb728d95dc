//! The `arbor` binary on a temporary project

use std::fs;

use crate::common::*;

fn sample_project() -> TestProject {
    let project = TestProject::new();
    project
        .write("Levels/forest.xml", "<level/>")
        .write("Levels/Old/cave.xml", "<level/>")
        .write("readme.md", "# readme");
    project
}

/// SCENARIO: Looking at a project
#[test]
fn scenario_tree_prints_project_root() {
    let project = sample_project();

    let result = project.run("tree", &[]);
    assert!(result.success, "{}", result.stderr);
    assert_eq!(
        result.stdout,
        "Project/\n  Levels/\n    Old/\n      cave.xml\n    forest.xml\n  readme.md\n"
    );

    let result = project.run("tree", &["--depth", "1"]);
    assert_eq!(result.stdout, "Project/\n  Levels/\n  readme.md\n");
}

/// SCENARIO: Renaming from the command line, then finding the result
#[test]
fn scenario_rename_then_find() {
    let project = sample_project();

    let result = project.run("rename", &["Levels/forest.xml", "meadow.xml"]);
    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout, "renamed Levels/forest.xml -> Levels/meadow.xml\n");
    assert!(project.join("Levels/meadow.xml").is_file());
    assert!(project.settings_path().is_file());

    let result = project.run("find", &["MEADOW"]);
    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout, "Levels/meadow.xml\n");
}

/// SCENARIO: A refused rename exits non-zero and changes nothing
#[test]
fn scenario_rename_collision_fails() {
    let project = sample_project();
    project.write("Levels/desert.xml", "<level/>");

    let result = project.run("rename", &["Levels/forest.xml", "desert.xml"]);
    assert!(!result.success);
    assert!(result.stderr.contains("already exists"), "{}", result.stderr);
    assert_eq!(fs::read_to_string(project.join("Levels/forest.xml")).unwrap(), "<level/>");
}

/// SCENARIO: Reorganizing with move, create and delete
#[test]
fn scenario_move_create_delete() {
    let project = sample_project();

    let result = project.run("move", &["readme.md", "Levels/Old"]);
    assert!(result.success, "{}", result.stderr);
    assert!(project.join("Levels/Old/readme.md").is_file());

    let result = project.run("create", &["Levels", "Folder"]);
    assert!(result.success, "{}", result.stderr);
    assert!(project.join("Levels/New Folder").is_dir());

    let result = project.run("create", &["", "text file", "notes.txt"]);
    assert!(result.success, "{}", result.stderr);
    assert!(project.join("notes.txt").is_file());

    let result = project.run("delete", &["Levels/Old"]);
    assert!(result.success, "{}", result.stderr);
    assert!(!project.join("Levels/Old").exists());

    let result = project.run("create", &["Levels", "Shader"]);
    assert!(!result.success);
    assert!(result.stderr.contains("Folder, Text File"), "{}", result.stderr);
}

/// SCENARIO: Scripts read NDJSON
#[test]
fn scenario_json_output() {
    let project = sample_project();

    let result = project.run("find", &["xml", "--json"]);
    assert!(result.success, "{}", result.stderr);
    let last = result.stdout.lines().last().unwrap();
    let value: serde_json::Value = serde_json::from_str(last).unwrap();
    assert_eq!(value["event"], "complete");
    assert_eq!(value["command"], "find");
    let paths: Vec<_> = value["data"]["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, vec!["Levels/Old/cave.xml", "Levels/forest.xml"]);

    // Rebuild events precede the result
    let first: serde_json::Value = serde_json::from_str(result.stdout.lines().next().unwrap()).unwrap();
    assert_eq!(first["event"], "tree_rebuilt");
}

/// SCENARIO: Inspecting a scene description
#[test]
fn scenario_scene_hierarchy() {
    let project = TestProject::new();
    project.write(
        "level.toml",
        r#"
name = "Forest"

[[nodes]]
name = "World"
components = ["Light"]

[[nodes.children]]
name = "Oak"

[[nodes]]
name = "Gizmo"
temporary = true
"#,
    );
    let file = project.join("level.toml");
    let file = file.to_str().unwrap();

    let result = project.run_raw(&["scene", file, "--components"]);
    assert!(result.success, "{}", result.stderr);
    assert_eq!(result.stdout, "▾ Forest\n  ▾ World\n      [Light]\n      Oak\n");

    let result = project.run_raw(&["scene", file, "--find", "oak", "--temporary"]);
    assert_eq!(result.stdout, "  Oak\n");
}
