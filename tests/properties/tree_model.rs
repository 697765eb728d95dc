//! Property tests for tree snapshots and rename remapping.

use std::collections::BTreeSet;
use std::path::PathBuf;

use proptest::prelude::*;

use arbor::domain::ports::NoopEventSink;
use arbor::domain::services::{EntryOperations, TreeModel};
use arbor::infrastructure::{MemoryResourceCache, MemoryStorage};
use arbor::{EntryReference, ResourceRoot};

/// Relative file paths: up to two folder levels, then a `.txt` file
fn file_paths() -> impl Strategy<Value = Vec<String>> {
    let path = (
        prop::collection::vec("[a-c]{1,2}", 0..=2),
        "[a-c]{1,2}",
    )
        .prop_map(|(dirs, file)| {
            let mut parts = dirs;
            parts.push(format!("{}.txt", file));
            parts.join("/")
        });
    prop::collection::vec(path, 1..8)
}

fn storage_with(prefix: &str, files: &[String]) -> MemoryStorage {
    let storage = MemoryStorage::new().with_dir("/p");
    for file in files {
        storage.add_file(format!("/p/{}{}", prefix, file), b"x");
    }
    storage
}

fn project_tree(storage: &MemoryStorage) -> TreeModel {
    let root = ResourceRoot::new(0, "Project", vec![PathBuf::from("/p")], None);
    let mut tree = TreeModel::new(vec![root]);
    tree.rebuild(storage);
    tree
}

fn entry_paths(tree: &TreeModel) -> Vec<String> {
    tree.root(0)
        .map(|root| {
            root.snapshot()
                .iter()
                .filter(|entry| !entry.is_root())
                .map(|entry| entry.path().to_string())
                .collect()
        })
        .unwrap_or_default()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: References to untouched entries resolve to the same path after a rebuild.
    #[test]
    fn property_references_survive_unrelated_rebuilds(files in file_paths()) {
        let storage = storage_with("", &files);
        let mut tree = project_tree(&storage);

        let references: Vec<EntryReference> = tree
            .root(0)
            .unwrap()
            .snapshot()
            .iter()
            .map(|entry| tree.reference_of(entry))
            .collect();
        let before: Vec<String> = references
            .iter()
            .map(|r| tree.resolve(r).unwrap().path().to_string())
            .collect();

        // Upper-case names never collide with the generated ones
        storage.add_file("/p/Z/added.txt", b"x");
        tree.rebuild(&storage);

        for (reference, path) in references.iter().zip(&before) {
            let entry = tree.resolve(reference);
            prop_assert!(entry.is_some(), "{:?} no longer resolves", reference);
            prop_assert_eq!(entry.unwrap().path(), path.as_str());
        }
        prop_assert!(tree.resolve(&EntryReference::new(0, "Z/added.txt")).is_some());
    }

    /// PROPERTY: Renaming a folder remaps it and every descendant, and nothing else.
    #[test]
    fn property_rename_remaps_every_descendant(files in file_paths(), others in file_paths()) {
        let storage = storage_with("src/", &files);
        for other in &others {
            storage.add_file(format!("/p/{}", other), b"x");
        }
        let mut tree = project_tree(&storage);

        let expected: BTreeSet<(String, String)> = entry_paths(&tree)
            .into_iter()
            .filter_map(|path| {
                let rest = path.strip_prefix("src")?;
                (rest.is_empty() || rest.starts_with('/'))
                    .then(|| (path.clone(), format!("dst{}", rest)))
            })
            .collect();
        let untouched: Vec<String> = entry_paths(&tree)
            .into_iter()
            .filter(|path| path != "src" && !path.starts_with("src/"))
            .collect();

        let cache = MemoryResourceCache::new();
        let ops = EntryOperations::new(&storage, &cache, &NoopEventSink);
        let result = ops.rename(&mut tree, &EntryReference::new(0, "src"), "dst").unwrap();

        prop_assert_eq!(result.remapping.first().cloned(), Some(("src".to_string(), "dst".to_string())));
        let remapped: BTreeSet<(String, String)> = result.remapping.iter().cloned().collect();
        prop_assert_eq!(remapped.len(), result.remapping.len(), "duplicate remap entries");
        prop_assert_eq!(remapped, expected);
        for path in &untouched {
            prop_assert_eq!(result.remap(path), None);
        }
    }
}
