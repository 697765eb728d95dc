//! Property tests for incremental search.

use std::collections::HashSet;

use proptest::prelude::*;

use arbor::domain::ports::SceneGraph;
use arbor::domain::services::{SceneSearch, SearchFilterCache, SearchRefresh};
use arbor::{SceneTree, SelectableObject};

fn flat_scene(names: &[String]) -> SceneTree {
    let mut scene = SceneTree::new();
    let root = scene.root();
    for name in names {
        scene.add_node(root, name.clone());
    }
    scene
}

/// Results of a fresh cache, which always rescans
fn rescanned(scene: &SceneTree, query: &str) -> Vec<SelectableObject> {
    let mut cache = SearchFilterCache::new();
    cache.update(&SceneSearch(scene), query);
    cache.results().to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Extending a query never adds results, and narrowing agrees with a rescan.
    #[test]
    fn property_extended_query_only_narrows(
        names in prop::collection::vec("[abcAB]{1,5}", 0..16),
        query in "[abc]{1,2}",
        extra in "[abc]",
    ) {
        let scene = flat_scene(&names);
        let search = SceneSearch(&scene);
        let mut cache = SearchFilterCache::new();

        cache.update(&search, &query);
        let before: HashSet<SelectableObject> = cache.results().iter().copied().collect();

        let extended = format!("{}{}", query, extra);
        let refresh = cache.update(&search, &extended);
        if before.is_empty() {
            prop_assert_eq!(refresh, SearchRefresh::Rescanned);
        } else {
            prop_assert_eq!(refresh, SearchRefresh::Narrowed);
        }
        for object in cache.results() {
            prop_assert!(before.contains(object), "{:?} appeared while narrowing", object);
        }
        prop_assert_eq!(cache.results().to_vec(), rescanned(&scene, &extended));

        prop_assert_eq!(cache.update(&search, ""), SearchRefresh::Cleared);
        prop_assert!(cache.results().is_empty());
    }

    /// PROPERTY: An unrelated query rescans the whole scene.
    #[test]
    fn property_unrelated_query_rescans(
        names in prop::collection::vec("[a-z]{1,5}", 1..16),
        first in "[a-m]{1,2}",
        second in "[n-z]{1,2}",
    ) {
        let scene = flat_scene(&names);
        let search = SceneSearch(&scene);
        let mut cache = SearchFilterCache::new();

        cache.update(&search, &first);
        prop_assert_eq!(cache.update(&search, &second), SearchRefresh::Rescanned);
        prop_assert_eq!(cache.results().to_vec(), rescanned(&scene, &second));
        let expected = names.iter().filter(|name| name.contains(second.as_str())).count();
        prop_assert_eq!(cache.results().len(), expected);
    }
}
