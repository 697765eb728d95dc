//! Rename, move and delete orchestration
//!
//! Every operation validates first and mutates second. The storage backend
//! only ever sees the top-level path; descendants travel with it. The
//! returned remapping lists every affected logical path so callers can
//! rewrite whatever references and cache keys they hold, since plain-string
//! references never update themselves. Cache invalidation happens only after
//! storage reported success.

use std::path::PathBuf;

use crate::domain::entities::{Entry, EntryKind};
use crate::domain::ports::{BrowserEvent, BrowserEventSink, ResourceCache, StorageBackend};
use crate::domain::services::{ResourceFactory, TreeModel};
use crate::domain::value_objects::{check_file_name, resource_path, EntryReference};
use crate::error::{BrowserError, BrowserResult};

/// Outcome of a successful rename or move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameResult {
    pub old_reference: EntryReference,
    pub new_reference: EntryReference,
    /// `(old, new)` for the entry and each descendant, in pre-order
    pub remapping: Vec<(String, String)>,
}

impl RenameResult {
    /// True when nothing changed (same name, same folder)
    pub fn is_noop(&self) -> bool {
        self.remapping.is_empty()
    }

    /// Post-rename path for `path`, `None` if it was not affected
    pub fn remap(&self, path: &str) -> Option<String> {
        if self.is_noop() {
            return None;
        }
        resource_path::rebase(path, &self.old_reference.path, &self.new_reference.path)
    }

    /// Post-rename reference for `reference`, `None` if it was not affected
    pub fn remap_reference(&self, reference: &EntryReference) -> Option<EntryReference> {
        if reference.root_index != self.old_reference.root_index {
            return None;
        }
        self.remap(&reference.path)
            .map(|path| EntryReference::new(reference.root_index, path))
    }
}

/// Outcome of a successful delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteResult {
    pub reference: EntryReference,
    /// The deleted entry and all of its former descendants
    pub removed: Vec<String>,
}

impl DeleteResult {
    /// Whether `reference` pointed at something this delete removed
    pub fn removes(&self, reference: &EntryReference) -> bool {
        reference.root_index == self.reference.root_index
            && resource_path::is_same_or_descendant(&reference.path, &self.reference.path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relocation {
    Rename,
    Move,
}

impl Relocation {
    fn name(self) -> &'static str {
        match self {
            Relocation::Rename => "rename",
            Relocation::Move => "move",
        }
    }
}

/// Entry mutations against one storage backend and resource cache
pub struct EntryOperations<'a> {
    storage: &'a dyn StorageBackend,
    cache: &'a dyn ResourceCache,
    events: &'a dyn BrowserEventSink,
}

impl<'a> EntryOperations<'a> {
    pub fn new(
        storage: &'a dyn StorageBackend,
        cache: &'a dyn ResourceCache,
        events: &'a dyn BrowserEventSink,
    ) -> Self {
        Self {
            storage,
            cache,
            events,
        }
    }

    /// Validate `new_name` for a child of `parent`
    pub fn check_new_name(
        &self,
        tree: &TreeModel,
        parent: &Entry,
        old_name: Option<&str>,
        new_name: &str,
    ) -> BrowserResult<()> {
        check_file_name(tree.children(parent).map(|e| e.name()), old_name, new_name).map_err(
            |issue| BrowserError::InvalidName {
                name: new_name.to_string(),
                issue,
            },
        )
    }

    /// Rename an entry in place
    pub fn rename(
        &self,
        tree: &mut TreeModel,
        reference: &EntryReference,
        new_name: &str,
    ) -> BrowserResult<RenameResult> {
        let plan = self
            .plan_rename(tree, reference, new_name)
            .map_err(|err| self.reject("rename", &reference.path, err))?;
        self.relocate(tree, plan, Relocation::Rename)
    }

    /// Move an entry into another folder of the same root
    pub fn move_into(
        &self,
        tree: &mut TreeModel,
        reference: &EntryReference,
        folder: &EntryReference,
    ) -> BrowserResult<RenameResult> {
        let plan = self
            .plan_move(tree, reference, folder)
            .map_err(|err| self.reject("move", &reference.path, err))?;
        self.relocate(tree, plan, Relocation::Move)
    }

    /// Delete an entry and everything below it
    pub fn delete(
        &self,
        tree: &mut TreeModel,
        reference: &EntryReference,
    ) -> BrowserResult<DeleteResult> {
        let (location, removed) = self
            .plan_delete(tree, reference)
            .map_err(|err| self.reject("delete", &reference.path, err))?;

        self.storage.delete(&location).map_err(|err| {
            self.reject(
                "delete",
                &reference.path,
                BrowserError::StorageFailure {
                    path: location.clone(),
                    reason: err.to_string(),
                },
            )
        })?;

        for key in &removed {
            self.invalidate(key);
        }
        tree.mark_dirty();
        self.events.on_event(BrowserEvent::EntryDeleted {
            path: reference.path.clone(),
            removed: removed.len(),
        });
        Ok(DeleteResult {
            reference: reference.clone(),
            removed,
        })
    }

    /// Create `name` inside `parent` through `factory`.
    ///
    /// The name is validated against the parent's children before the
    /// factory runs; the factory is responsible for the storage call.
    pub fn create(
        &self,
        tree: &mut TreeModel,
        factory: &mut dyn ResourceFactory,
        parent: &EntryReference,
        name: &str,
    ) -> BrowserResult<EntryReference> {
        let (location, resource_name) = self
            .plan_create(tree, parent, name)
            .map_err(|err| self.reject("create", &parent.path, err))?;

        factory
            .end_create(self.storage, &location, &resource_name)
            .map_err(|err| {
                self.reject(
                    "create",
                    &resource_name,
                    BrowserError::StorageFailure {
                        path: location.clone(),
                        reason: err.to_string(),
                    },
                )
            })?;

        tree.mark_dirty();
        self.events.on_event(BrowserEvent::EntryCreated {
            path: resource_name.clone(),
            factory: factory.title().to_string(),
        });
        Ok(EntryReference::new(parent.root_index, resource_name))
    }

    /// Show the entry in the system file manager
    pub fn reveal(&self, tree: &TreeModel, reference: &EntryReference) -> BrowserResult<()> {
        let entry = tree.resolve(reference).ok_or_else(|| BrowserError::StaleReference {
            reference: reference.clone(),
        })?;
        let location = physical_location(entry)?;
        self.storage
            .reveal(&location)
            .map_err(|err| BrowserError::StorageFailure {
                path: location.clone(),
                reason: err.to_string(),
            })?;
        self.events.on_event(BrowserEvent::RevealRequested {
            path: reference.path.clone(),
        });
        Ok(())
    }

    pub fn storage(&self) -> &'a dyn StorageBackend {
        self.storage
    }

    pub fn events(&self) -> &'a dyn BrowserEventSink {
        self.events
    }

    fn plan_create(
        &self,
        tree: &TreeModel,
        parent: &EntryReference,
        name: &str,
    ) -> BrowserResult<(PathBuf, String)> {
        let entry = resolve_mutable(tree, parent)?;
        if !entry.is_directory() {
            return Err(BrowserError::unsupported(entry.path(), "new entries can only be created in folders"));
        }
        self.check_new_name(tree, entry, None, name)?;
        let location = tree
            .location_for_child(entry, name)
            .ok_or_else(|| BrowserError::unsupported(entry.path(), "folder has no physical location"))?;
        Ok((location, resource_path::join(entry.path(), name)))
    }

    fn plan_rename(
        &self,
        tree: &TreeModel,
        reference: &EntryReference,
        new_name: &str,
    ) -> BrowserResult<RelocationPlan> {
        let entry = resolve_mutable(tree, reference)?;
        let parent = tree
            .parent(entry)
            .ok_or_else(|| BrowserError::unsupported(entry.path(), "the root directory cannot be renamed"))?;
        self.check_new_name(tree, parent, Some(entry.name()), new_name)?;

        let new_path = resource_path::join(parent.path(), new_name);
        if new_name == entry.name() {
            return Ok(RelocationPlan::noop(reference));
        }
        let from = relocatable_location(entry)?;
        let to = match from.parent() {
            Some(dir) => dir.join(new_name),
            None => return Err(BrowserError::unsupported(entry.path(), "entry has no parent folder")),
        };
        Ok(RelocationPlan::new(tree, entry, new_path, from, to))
    }

    fn plan_move(
        &self,
        tree: &TreeModel,
        reference: &EntryReference,
        folder: &EntryReference,
    ) -> BrowserResult<RelocationPlan> {
        let entry = resolve_mutable(tree, reference)?;
        let target = tree.resolve(folder).ok_or_else(|| BrowserError::StaleReference {
            reference: folder.clone(),
        })?;
        if entry.is_root() {
            return Err(BrowserError::unsupported(entry.path(), "the root directory cannot be moved"));
        }
        if folder.root_index != reference.root_index {
            return Err(BrowserError::unsupported(entry.path(), "entries cannot be moved between roots"));
        }
        if !target.is_directory() {
            return Err(BrowserError::unsupported(target.path(), "target is not a folder"));
        }
        if resource_path::is_same_or_descendant(target.path(), entry.path()) {
            return Err(BrowserError::unsupported(entry.path(), "a folder cannot be moved into itself"));
        }
        if tree.parent(entry).map(|p| p.path()) == Some(target.path()) {
            return Ok(RelocationPlan::noop(reference));
        }
        self.check_new_name(tree, target, None, entry.name())?;

        let from = relocatable_location(entry)?;
        let to = tree
            .location_for_child(target, entry.name())
            .ok_or_else(|| BrowserError::unsupported(target.path(), "target has no physical location"))?;
        let new_path = resource_path::join(target.path(), entry.name());
        Ok(RelocationPlan::new(tree, entry, new_path, from, to))
    }

    fn plan_delete(
        &self,
        tree: &TreeModel,
        reference: &EntryReference,
    ) -> BrowserResult<(PathBuf, Vec<String>)> {
        let entry = resolve_mutable(tree, reference)?;
        if entry.is_root() {
            return Err(BrowserError::unsupported(entry.path(), "the root directory cannot be deleted"));
        }
        let location = relocatable_location(entry)?;
        let removed = std::iter::once(entry)
            .chain(tree.descendants(entry))
            .map(|e| e.path().to_string())
            .collect();
        Ok((location, removed))
    }

    fn relocate(
        &self,
        tree: &mut TreeModel,
        plan: RelocationPlan,
        relocation: Relocation,
    ) -> BrowserResult<RenameResult> {
        let RelocationPlan {
            old_reference,
            new_reference,
            remapping,
            from,
            to,
        } = plan;
        let result = RenameResult {
            old_reference,
            new_reference,
            remapping,
        };
        let (Some(from), Some(to)) = (from, to) else {
            return Ok(result);
        };

        self.storage.move_entry(&from, &to).map_err(|err| {
            self.reject(
                relocation.name(),
                &result.old_reference.path,
                BrowserError::StorageFailure {
                    path: from.clone(),
                    reason: err.to_string(),
                },
            )
        })?;

        for (old, _) in &result.remapping {
            self.invalidate(old);
        }
        tree.mark_dirty();

        let from = result.old_reference.path.clone();
        let to = result.new_reference.path.clone();
        let remapped = result.remapping.len();
        self.events.on_event(match relocation {
            Relocation::Rename => BrowserEvent::EntryRenamed { from, to, remapped },
            Relocation::Move => BrowserEvent::EntryMoved { from, to, remapped },
        });
        Ok(result)
    }

    fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
        self.events.on_event(BrowserEvent::CacheInvalidated {
            key: key.to_string(),
        });
    }

    fn reject(&self, operation: &'static str, path: &str, err: BrowserError) -> BrowserError {
        self.events.on_event(BrowserEvent::OperationRejected {
            operation,
            path: path.to_string(),
            reason: err.to_string(),
        });
        err
    }
}

/// Everything a rename or move needs, computed before any mutation
struct RelocationPlan {
    old_reference: EntryReference,
    new_reference: EntryReference,
    remapping: Vec<(String, String)>,
    from: Option<PathBuf>,
    to: Option<PathBuf>,
}

impl RelocationPlan {
    fn noop(reference: &EntryReference) -> Self {
        Self {
            old_reference: reference.clone(),
            new_reference: reference.clone(),
            remapping: Vec::new(),
            from: None,
            to: None,
        }
    }

    fn new(tree: &TreeModel, entry: &Entry, new_path: String, from: PathBuf, to: PathBuf) -> Self {
        let old_path = entry.path();
        let remapping = std::iter::once(entry)
            .chain(tree.descendants(entry))
            .filter_map(|e| {
                resource_path::rebase(e.path(), old_path, &new_path)
                    .map(|new| (e.path().to_string(), new))
            })
            .collect();
        Self {
            old_reference: entry.reference(),
            new_reference: EntryReference::new(entry.root_index(), new_path),
            remapping,
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Resolve an entry that is about to be modified
fn resolve_mutable<'t>(tree: &'t TreeModel, reference: &EntryReference) -> BrowserResult<&'t Entry> {
    let entry = tree
        .resolve(reference)
        .ok_or_else(|| BrowserError::StaleReference {
            reference: reference.clone(),
        })?;
    if tree.is_read_only(reference.root_index) {
        return Err(BrowserError::unsupported(entry.path(), "this root is read-only"));
    }
    if entry.kind() == EntryKind::CompositeMember {
        return Err(BrowserError::unsupported(
            entry.path(),
            "entries inside composite files cannot be modified",
        ));
    }
    Ok(entry)
}

fn physical_location(entry: &Entry) -> BrowserResult<PathBuf> {
    entry
        .location()
        .map(|p| p.to_path_buf())
        .ok_or_else(|| BrowserError::unsupported(entry.path(), "entry has no physical location"))
}

/// Location of an entry that rename, move or delete may act on
fn relocatable_location(entry: &Entry) -> BrowserResult<PathBuf> {
    if entry.is_merged() {
        return Err(BrowserError::unsupported(
            entry.path(),
            "folder is merged from several watched directories",
        ));
    }
    physical_location(entry)
}
