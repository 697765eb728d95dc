//! Property tests for shift-click range selection in the scene hierarchy.

use proptest::prelude::*;
use proptest::sample::Index;

use arbor::domain::ports::SceneGraph;
use arbor::domain::services::{ClickModifiers, ClickOutcome};
use arbor::{SceneHierarchy, SceneTree, SelectableObject, Selection};

/// Random scene: node `i` hangs below the root or any earlier node
fn scene_from(parents: &[Index]) -> SceneTree {
    let mut scene = SceneTree::new();
    let mut nodes = vec![scene.root()];
    for (i, parent) in parents.iter().enumerate() {
        let parent = nodes[parent.index(nodes.len())];
        nodes.push(scene.add_node(parent, format!("n{}", i)));
    }
    scene
}

fn expanded_hierarchy(scene: &SceneTree) -> SceneHierarchy {
    let mut hierarchy = SceneHierarchy::new();
    for node in scene.descendants(scene.root()) {
        hierarchy.set_expanded(node, true);
    }
    hierarchy
}

/// Select `anchor`, then shift-click `target`; returns the visible order
/// and the final selection
fn shift_select(scene: &SceneTree, anchor: Index, target: Index) -> (Vec<SelectableObject>, usize, usize, Selection) {
    let mut hierarchy = expanded_hierarchy(scene);
    let mut selection = Selection::new();
    let order: Vec<SelectableObject> = hierarchy
        .frame(scene, &mut selection, "")
        .into_iter()
        .map(|row| row.object)
        .collect();
    let (a, t) = (anchor.index(order.len()), target.index(order.len()));

    hierarchy.click(&mut selection, order[a], ClickModifiers::none());
    hierarchy.frame(scene, &mut selection, "");
    let outcome = hierarchy.click(&mut selection, order[t], ClickModifiers::shift());
    if a != t {
        assert_eq!(outcome, ClickOutcome::RangeRequested);
    }
    hierarchy.frame(scene, &mut selection, "");
    (order, a, t, selection)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A range is exactly the visible rows between anchor and target, inclusive.
    #[test]
    fn property_range_is_contiguous_in_visible_order(
        parents in prop::collection::vec(any::<Index>(), 1..12),
        anchor in any::<Index>(),
        target in any::<Index>(),
    ) {
        let scene = scene_from(&parents);
        let (order, a, t, selection) = shift_select(&scene, anchor, target);
        let (low, high) = (a.min(t), a.max(t));

        for (i, &object) in order.iter().enumerate() {
            prop_assert_eq!(
                selection.is_selected(object),
                (low..=high).contains(&i),
                "row {} of {} (anchor {}, target {})", i, order.len(), a, t
            );
        }
        prop_assert_eq!(selection.active(), Some(order[a]));
    }

    /// PROPERTY: Swapping anchor and target selects the same set.
    #[test]
    fn property_range_does_not_depend_on_click_order(
        parents in prop::collection::vec(any::<Index>(), 1..12),
        first in any::<Index>(),
        second in any::<Index>(),
    ) {
        let scene = scene_from(&parents);
        let (order, _, _, forward) = shift_select(&scene, first, second);
        let (_, _, _, backward) = shift_select(&scene, second, first);

        for object in order {
            prop_assert_eq!(forward.is_selected(object), backward.is_selected(object));
        }
    }
}
