//! Resource factories for the "Create" context menu
//!
//! Factories are kept in menu order: by group, then by title. The order is
//! stable, so factories with equal keys keep their registration order.

use std::path::Path;

use crate::domain::entities::Entry;
use crate::domain::ports::{StorageBackend, StorageResult};

/// A creation strategy offered in the create menu
pub trait ResourceFactory {
    /// Menu group; lower groups come first
    fn group(&self) -> i32;

    fn title(&self) -> &str;

    /// File name proposed in the create dialog
    fn template_file_name(&self) -> &str;

    /// Whether the factory is offered for `parent`
    fn is_enabled(&self, _parent: &Entry) -> bool {
        true
    }

    /// Called once when the user picks the factory
    fn begin_create(&mut self) {}

    /// Materialize the new entry at `file_name` (physical) / `resource_name`
    /// (logical path).
    fn end_create(
        &mut self,
        storage: &dyn StorageBackend,
        file_name: &Path,
        resource_name: &str,
    ) -> StorageResult<()>;
}

/// Completion callback of a `TemplateFactory`
pub type CreateCallback = Box<dyn FnMut(&dyn StorageBackend, &Path, &str) -> StorageResult<()>>;

/// Factory defined by its menu data and a completion callback
pub struct TemplateFactory {
    group: i32,
    title: String,
    file_name: String,
    callback: CreateCallback,
}

impl TemplateFactory {
    pub fn new(
        group: i32,
        title: impl Into<String>,
        file_name: impl Into<String>,
        callback: impl FnMut(&dyn StorageBackend, &Path, &str) -> StorageResult<()> + 'static,
    ) -> Self {
        Self {
            group,
            title: title.into(),
            file_name: file_name.into(),
            callback: Box::new(callback),
        }
    }

    /// Creates an empty folder
    pub fn folder() -> Self {
        Self::new(0, "Folder", "New Folder", |storage, file_name, _| {
            storage.create_dir(file_name)
        })
    }

    /// Creates an empty text file
    pub fn text_file() -> Self {
        Self::new(1, "Text File", "New Text File.txt", |storage, file_name, _| {
            storage.write_file(file_name, b"")
        })
    }
}

impl ResourceFactory for TemplateFactory {
    fn group(&self) -> i32 {
        self.group
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn template_file_name(&self) -> &str {
        &self.file_name
    }

    fn end_create(
        &mut self,
        storage: &dyn StorageBackend,
        file_name: &Path,
        resource_name: &str,
    ) -> StorageResult<()> {
        (self.callback)(storage, file_name, resource_name)
    }
}

/// Handle of a registered factory, stable across re-sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactoryId(usize);

/// Registered factories in menu order
#[derive(Default)]
pub struct FactoryRegistry {
    factories: Vec<Box<dyn ResourceFactory>>,
    order: Vec<usize>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in folder and text file factories
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.add(Box::new(TemplateFactory::folder()));
        registry.add(Box::new(TemplateFactory::text_file()));
        registry
    }

    pub fn add(&mut self, factory: Box<dyn ResourceFactory>) -> FactoryId {
        let index = self.factories.len();
        self.factories.push(factory);
        self.order.push(index);
        let factories = &self.factories;
        self.order.sort_by(|&a, &b| {
            let (a, b) = (&factories[a], &factories[b]);
            a.group()
                .cmp(&b.group())
                .then_with(|| a.title().cmp(b.title()))
        });
        FactoryId(index)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Every factory in menu order
    pub fn ordered(&self) -> Vec<FactoryId> {
        self.order.iter().map(|&index| FactoryId(index)).collect()
    }

    /// Factories offered for `parent`, in menu order
    pub fn enabled_for(&self, parent: &Entry) -> Vec<FactoryId> {
        self.order
            .iter()
            .filter(|&&index| self.factories[index].is_enabled(parent))
            .map(|&index| FactoryId(index))
            .collect()
    }

    /// Enabled factories split by group, for menus with separators
    pub fn menu_groups(&self, parent: &Entry) -> Vec<Vec<FactoryId>> {
        let mut groups: Vec<Vec<FactoryId>> = Vec::new();
        let mut last_group = None;
        for id in self.enabled_for(parent) {
            let group = self.factories[id.0].group();
            if last_group != Some(group) {
                groups.push(Vec::new());
                last_group = Some(group);
            }
            if let Some(current) = groups.last_mut() {
                current.push(id);
            }
        }
        groups
    }

    pub fn get(&self, id: FactoryId) -> Option<&dyn ResourceFactory> {
        self.factories.get(id.0).map(|factory| factory.as_ref())
    }

    pub fn get_mut(&mut self, id: FactoryId) -> Option<&mut (dyn ResourceFactory + 'static)> {
        self.factories.get_mut(id.0).map(|factory| factory.as_mut())
    }

    /// First factory in menu order with this title (case-insensitive)
    pub fn find_by_title(&self, title: &str) -> Option<FactoryId> {
        self.order
            .iter()
            .find(|&&index| self.factories[index].title().eq_ignore_ascii_case(title))
            .map(|&index| FactoryId(index))
    }
}
