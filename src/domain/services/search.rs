//! Incremental name search over a tree
//!
//! Typed queries almost always grow one character at a time, so a query that
//! extends the previous one re-tests only the previous results, and so does
//! the same query on the next frame. Anything else (a new source, a shorter or
//! unrelated query, an empty result set) costs a full rescan, so a query with
//! no matches keeps rescanning until something matches.

use crate::domain::entities::SelectableObject;
use crate::domain::ports::SceneGraph;
use crate::domain::services::TreeModel;
use crate::domain::value_objects::{resource_path, EntryReference};

/// A tree whose items can be searched by display name
pub trait Searchable {
    type Item: Clone + PartialEq;

    /// Changes whenever previous results can no longer be trusted
    fn identity(&self) -> u64;

    /// Every searchable item, excluding the root, in traversal order
    fn all_items(&self) -> Vec<Self::Item>;

    /// Name matched against the query, `None` once the item is gone
    fn display_name(&self, item: &Self::Item) -> Option<String>;
}

/// How `SearchFilterCache::update` refreshed its results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchRefresh {
    Unchanged,
    Cleared,
    Narrowed,
    Rescanned,
}

#[derive(Debug, Clone)]
pub struct SearchFilterCache<I> {
    identity: Option<u64>,
    query: String,
    results: Vec<I>,
}

impl<I> Default for SearchFilterCache<I> {
    fn default() -> Self {
        Self {
            identity: None,
            query: String::new(),
            results: Vec::new(),
        }
    }
}

impl<I: Clone + PartialEq> SearchFilterCache<I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<S>(&mut self, source: &S, query: &str) -> SearchRefresh
    where
        S: Searchable<Item = I> + ?Sized,
    {
        let identity = source.identity();
        let same_source = self.identity == Some(identity);
        self.identity = Some(identity);

        if query.is_empty() {
            let was_active = !self.query.is_empty() || !self.results.is_empty();
            self.query.clear();
            self.results.clear();
            return if was_active {
                SearchRefresh::Cleared
            } else {
                SearchRefresh::Unchanged
            };
        }

        let needle = query.to_lowercase();
        if same_source && query == self.query && !self.results.is_empty() {
            // Drop items destroyed or renamed away since the last frame
            self.results
                .retain(|item| matches(source.display_name(item), &needle));
            return SearchRefresh::Unchanged;
        }

        let extends_previous = !self.query.is_empty()
            && needle.contains(&self.query.to_lowercase());
        let refresh = if same_source && extends_previous && !self.results.is_empty() {
            self.results
                .retain(|item| matches(source.display_name(item), &needle));
            SearchRefresh::Narrowed
        } else {
            self.results = source
                .all_items()
                .into_iter()
                .filter(|item| matches(source.display_name(item), &needle))
                .collect();
            SearchRefresh::Rescanned
        };
        self.query = query.to_string();
        refresh
    }

    pub fn results(&self) -> &[I] {
        &self.results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn contains(&self, item: &I) -> bool {
        self.results.contains(item)
    }
}

fn matches(name: Option<String>, needle: &str) -> bool {
    name.is_some_and(|name| name.to_lowercase().contains(needle))
}

/// Node search over a scene graph
pub struct SceneSearch<'a>(pub &'a dyn SceneGraph);

impl Searchable for SceneSearch<'_> {
    type Item = SelectableObject;

    fn identity(&self) -> u64 {
        self.0.scene_id()
    }

    fn all_items(&self) -> Vec<SelectableObject> {
        self.0
            .descendants(self.0.root())
            .into_iter()
            .map(SelectableObject::Node)
            .collect()
    }

    fn display_name(&self, item: &SelectableObject) -> Option<String> {
        match *item {
            SelectableObject::Node(node) if self.0.contains(*item) => {
                Some(self.0.node_name(node).unwrap_or_default().to_string())
            }
            _ => None,
        }
    }
}

/// File and directory search over one resource root, by entry name
pub struct RootSearch<'a> {
    pub tree: &'a TreeModel,
    pub root_index: usize,
}

impl Searchable for RootSearch<'_> {
    type Item = EntryReference;

    fn identity(&self) -> u64 {
        // A rebuild may add entries, so it invalidates previous results
        ((self.root_index as u64) << 48) ^ self.tree.generation()
    }

    fn all_items(&self) -> Vec<EntryReference> {
        let Some(root) = self.tree.resolve(&EntryReference::root(self.root_index)) else {
            return Vec::new();
        };
        self.tree
            .descendants(root)
            .iter()
            .map(|entry| entry.reference())
            .collect()
    }

    fn display_name(&self, item: &EntryReference) -> Option<String> {
        self.tree
            .resolve(item)
            .map(|entry| resource_path::file_name(entry.path()).to_string())
    }
}
