//! Resource browser panel
//!
//! Two panes over the tree model: the left pane shows the folders of one
//! root, the right pane the contents of the folder selected on the left. All
//! state is held as `EntryReference`s and re-resolved at the top of every
//! frame, after the coalesced rebuild.
//!
//! Per frame, the host calls `begin_frame` once, then any number of commands
//! and dialog confirmations. Mutations only mark the tree dirty; their effect
//! becomes visible at the next `begin_frame`.

use crate::config::settings::{read_int, read_str, write_int, write_str, PanelSettings};
use crate::config::BrowserConfig;
use crate::domain::entities::{Entry, ResourceRoot};
use crate::domain::ports::BrowserEvent;
use crate::domain::services::{
    EntryOperations, FactoryId, FactoryRegistry, RenameResult, RootSearch, SearchFilterCache,
    TreeModel,
};
use crate::domain::value_objects::EntryReference;
use crate::error::{BrowserError, BrowserResult};

use super::dialog::{DialogOutcome, PendingDialog};

pub const LEFT_ROOT_KEY: &str = "ResourceBrowser.LeftRoot";
pub const LEFT_PATH_KEY: &str = "ResourceBrowser.LeftPath";
pub const RIGHT_PATH_KEY: &str = "ResourceBrowser.RightPath";

/// Which pane keyboard commands apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserCursor {
    #[default]
    Left,
    Right,
}

/// Target of the create dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub parent: EntryReference,
    pub factory: FactoryId,
}

pub struct ResourceBrowser {
    tree: TreeModel,
    factories: FactoryRegistry,
    /// Folder shown on the left; its root is the selected root
    left: EntryReference,
    right: Option<EntryReference>,
    cursor: BrowserCursor,
    rename: PendingDialog<EntryReference>,
    delete: PendingDialog<EntryReference>,
    create: PendingDialog<CreateRequest>,
    filter: SearchFilterCache<EntryReference>,
    filter_query: String,
}

impl ResourceBrowser {
    /// New browser; the left pane starts on `default_left_root`, clamped to
    /// the last root.
    pub fn new(roots: Vec<ResourceRoot>, factories: FactoryRegistry, default_left_root: usize) -> Self {
        let left_root = default_left_root.min(roots.len().saturating_sub(1));
        Self {
            tree: TreeModel::new(roots),
            factories,
            left: EntryReference::root(left_root),
            right: None,
            cursor: BrowserCursor::Left,
            rename: PendingDialog::new(),
            delete: PendingDialog::new(),
            create: PendingDialog::new(),
            filter: SearchFilterCache::new(),
            filter_query: String::new(),
        }
    }

    pub fn from_config(config: &BrowserConfig, base: &std::path::Path) -> Self {
        Self::new(
            config.build_roots(base),
            FactoryRegistry::with_defaults(),
            config.default_left_root,
        )
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn factories(&self) -> &FactoryRegistry {
        &self.factories
    }

    pub fn factories_mut(&mut self) -> &mut FactoryRegistry {
        &mut self.factories
    }

    pub fn left(&self) -> &EntryReference {
        &self.left
    }

    pub fn right(&self) -> Option<&EntryReference> {
        self.right.as_ref()
    }

    pub fn cursor(&self) -> BrowserCursor {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: BrowserCursor) {
        self.cursor = cursor;
    }

    pub fn rename_dialog(&self) -> &PendingDialog<EntryReference> {
        &self.rename
    }

    pub fn delete_dialog(&self) -> &PendingDialog<EntryReference> {
        &self.delete
    }

    pub fn create_dialog(&self) -> &PendingDialog<CreateRequest> {
        &self.create
    }

    /// Top of the frame: rebuild if dirty, drop stale state, open dialogs
    /// requested last frame. Returns whether the tree was rebuilt.
    pub fn begin_frame(&mut self, ops: &EntryOperations<'_>) -> bool {
        let rebuilt = match self.tree.rebuild_if_dirty(ops.storage()) {
            Some(failures) => {
                for root in self.tree.roots() {
                    ops.events().on_event(BrowserEvent::TreeRebuilt {
                        root: root.name.clone(),
                        entries: root.snapshot().len(),
                    });
                }
                for failure in failures {
                    ops.events().on_event(BrowserEvent::ListingFailed {
                        path: failure.path.display().to_string(),
                        reason: failure.reason,
                    });
                }
                true
            }
            None => false,
        };

        self.sweep_stale_references();

        self.rename.open_if_pending();
        self.delete.open_if_pending();
        self.create.open_if_pending();
        rebuilt
    }

    /// Re-read everything at the next frame
    pub fn refresh(&mut self) {
        self.tree.mark_dirty();
    }

    /// Storage changed behind our back (file watcher)
    pub fn notify_external_change(&mut self) {
        self.tree.mark_dirty();
    }

    /// Show `root_index` in the left pane
    pub fn select_root(&mut self, root_index: usize) -> bool {
        if self.tree.root(root_index).is_none() {
            return false;
        }
        self.left = EntryReference::root(root_index);
        self.right = None;
        self.cursor = BrowserCursor::Left;
        true
    }

    /// Select a folder (or composite file) in the left pane
    pub fn select_left(&mut self, reference: &EntryReference) -> bool {
        match self.tree.resolve(reference) {
            Some(entry) if is_container(entry) => {
                if self.left != *reference {
                    self.right = None;
                }
                self.left = reference.clone();
                self.cursor = BrowserCursor::Left;
                true
            }
            _ => false,
        }
    }

    /// Select an item of the left folder in the right pane
    pub fn select_right(&mut self, reference: &EntryReference) -> bool {
        if self.tree.resolve(reference).is_none() {
            return false;
        }
        self.right = Some(reference.clone());
        self.cursor = BrowserCursor::Right;
        true
    }

    /// The entry keyboard commands act on, if it still exists
    pub fn selected_entry_for_cursor(&self) -> Option<EntryReference> {
        let selected = match self.cursor {
            BrowserCursor::Left => Some(&self.left),
            BrowserCursor::Right => self.right.as_ref(),
        }?;
        self.tree.resolve(selected).map(|_| selected.clone())
    }

    /// Contents of the left folder, as shown in the right pane
    pub fn directory_listing(&self) -> Vec<&Entry> {
        match self.tree.resolve(&self.left) {
            Some(entry) => self.tree.children(entry).collect(),
            None => Vec::new(),
        }
    }

    pub fn rename_selected(&mut self) -> bool {
        match self.selected_entry_for_cursor() {
            Some(reference) => self.begin_rename(&reference),
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selected_entry_for_cursor() {
            Some(reference) => self.begin_delete(&reference),
            None => false,
        }
    }

    pub fn reveal_selected(&self, ops: &EntryOperations<'_>) -> BrowserResult<()> {
        let reference = self
            .selected_entry_for_cursor()
            .ok_or_else(|| BrowserError::StaleReference {
                reference: self.left.clone(),
            })?;
        ops.reveal(&self.tree, &reference)
    }

    /// Request the rename dialog for `reference`, seeded with its name
    pub fn begin_rename(&mut self, reference: &EntryReference) -> bool {
        match self.tree.resolve(reference) {
            Some(entry) if !entry.is_root() => {
                let name = entry.name().to_string();
                self.rename.request(reference.clone(), name);
                true
            }
            _ => false,
        }
    }

    pub fn begin_delete(&mut self, reference: &EntryReference) -> bool {
        match self.tree.resolve(reference) {
            Some(entry) if !entry.is_root() => {
                self.delete.request(reference.clone(), "");
                true
            }
            _ => false,
        }
    }

    /// Pick a factory for a new entry in `parent`; the dialog opens next
    /// frame, seeded with the factory's template name.
    pub fn begin_create(&mut self, parent: &EntryReference, factory: FactoryId) -> bool {
        let Some(entry) = self.tree.resolve(parent) else {
            return false;
        };
        if !entry.is_directory() {
            return false;
        }
        let enabled = self
            .factories
            .get(factory)
            .is_some_and(|f| f.is_enabled(entry));
        if !enabled {
            return false;
        }
        let Some(factory_ref) = self.factories.get_mut(factory) else {
            return false;
        };
        factory_ref.begin_create();
        let template = factory_ref.template_file_name().to_string();
        self.create.request(
            CreateRequest {
                parent: parent.clone(),
                factory,
            },
            template,
        );
        true
    }

    /// Edit the text of whichever input dialog is open
    pub fn set_dialog_input(&mut self, input: &str) {
        if self.rename.is_open() {
            self.rename.set_input(input);
        } else if self.create.is_open() {
            self.create.set_input(input);
        }
    }

    pub fn cancel_dialogs(&mut self) {
        self.rename.cancel();
        self.delete.cancel();
        self.create.cancel();
    }

    pub fn confirm_rename(&mut self, ops: &EntryOperations<'_>) -> DialogOutcome {
        let Some(target) = open_target(&self.rename) else {
            return DialogOutcome::Dismissed;
        };
        let name = self.rename.input().to_string();
        match ops.rename(&mut self.tree, &target, &name) {
            Ok(result) => {
                self.rename.cancel();
                self.adjust_selection_on_rename(&result);
                DialogOutcome::Committed
            }
            Err(err) => Self::reject(&mut self.rename, err),
        }
    }

    pub fn confirm_delete(&mut self, ops: &EntryOperations<'_>) -> DialogOutcome {
        let Some(target) = open_target(&self.delete) else {
            return DialogOutcome::Dismissed;
        };
        match ops.delete(&mut self.tree, &target) {
            Ok(result) => {
                self.delete.cancel();
                if result.removes(&self.left) {
                    self.left = target.parent().unwrap_or_else(|| EntryReference::root(target.root_index));
                }
                if self.right.as_ref().is_some_and(|right| result.removes(right)) {
                    self.right = None;
                }
                if self.rename.target().is_some_and(|r| result.removes(r)) {
                    self.rename.cancel();
                }
                if self.create.target().is_some_and(|c| result.removes(&c.parent)) {
                    self.create.cancel();
                }
                DialogOutcome::Committed
            }
            Err(err) => Self::reject(&mut self.delete, err),
        }
    }

    /// Run the picked factory; the new entry becomes the selection
    pub fn confirm_create(&mut self, ops: &EntryOperations<'_>) -> DialogOutcome {
        let Some(CreateRequest { parent, factory }) = open_target(&self.create) else {
            return DialogOutcome::Dismissed;
        };
        let name = self.create.input().to_string();
        let Some(factory) = self.factories.get_mut(factory) else {
            self.create.cancel();
            return DialogOutcome::Dismissed;
        };
        match ops.create(&mut self.tree, factory, &parent, &name) {
            Ok(created) => {
                self.create.cancel();
                self.left = parent;
                self.right = Some(created);
                self.cursor = BrowserCursor::Right;
                DialogOutcome::Committed
            }
            Err(err) => Self::reject(&mut self.create, err),
        }
    }

    /// Drop target: move `reference` into `folder`
    pub fn move_to_folder(
        &mut self,
        ops: &EntryOperations<'_>,
        reference: &EntryReference,
        folder: &EntryReference,
    ) -> BrowserResult<RenameResult> {
        let result = ops.move_into(&mut self.tree, reference, folder)?;
        self.adjust_selection_on_rename(&result);
        Ok(result)
    }

    /// Carry every held reference across a rename or move
    pub fn adjust_selection_on_rename(&mut self, result: &RenameResult) {
        if let Some(moved) = result.remap_reference(&self.left) {
            self.left = moved;
        }
        if let Some(moved) = self.right.as_ref().and_then(|r| result.remap_reference(r)) {
            self.right = Some(moved);
        }
        if let Some(target) = self.rename.target_mut() {
            if let Some(moved) = result.remap_reference(target) {
                *target = moved;
            }
        }
        if let Some(target) = self.delete.target_mut() {
            if let Some(moved) = result.remap_reference(target) {
                *target = moved;
            }
        }
        if let Some(request) = self.create.target_mut() {
            if let Some(moved) = result.remap_reference(&request.parent) {
                request.parent = moved;
            }
        }
    }

    /// File name filter over the selected root; empty shows everything
    pub fn set_filter(&mut self, query: &str) {
        self.filter_query = query.to_string();
    }

    pub fn filter(&self) -> &str {
        &self.filter_query
    }

    /// Entries of the selected root matching the filter, in tree order
    pub fn filtered_paths(&mut self) -> Vec<EntryReference> {
        let search = RootSearch {
            tree: &self.tree,
            root_index: self.left.root_index,
        };
        self.filter.update(&search, &self.filter_query);
        self.filter.results().to_vec()
    }

    /// Keep the dialog open with the reason, unless its target is gone
    fn reject<T>(dialog: &mut PendingDialog<T>, err: BrowserError) -> DialogOutcome {
        if let BrowserError::StaleReference { .. } = err {
            dialog.cancel();
            return DialogOutcome::Dismissed;
        }
        let reason = err.to_string();
        dialog.fail(reason.clone());
        DialogOutcome::Rejected(reason)
    }

    fn sweep_stale_references(&mut self) {
        if self.tree.root(self.left.root_index).is_none() {
            self.left = EntryReference::root(self.tree.roots().len().saturating_sub(1));
            self.right = None;
        }
        self.left = nearest_container(&self.tree, &self.left);
        if self
            .right
            .as_ref()
            .is_some_and(|right| self.tree.resolve(right).is_none())
        {
            self.right = None;
        }

        if self
            .rename
            .target()
            .is_some_and(|r| self.tree.resolve(r).is_none())
        {
            self.rename.cancel();
        }
        if self
            .delete
            .target()
            .is_some_and(|r| self.tree.resolve(r).is_none())
        {
            self.delete.cancel();
        }
        if self
            .create
            .target()
            .is_some_and(|c| self.tree.resolve(&c.parent).is_none())
        {
            self.create.cancel();
        }
    }
}

/// Target of an open dialog; pending or closed dialogs cannot be confirmed
fn open_target<T: Clone>(dialog: &PendingDialog<T>) -> Option<T> {
    dialog.target().filter(|_| dialog.is_open()).cloned()
}

fn is_container(entry: &Entry) -> bool {
    entry.is_directory() || entry.is_composite()
}

/// `reference` if it is still a folder, else its nearest folder ancestor
fn nearest_container(tree: &TreeModel, reference: &EntryReference) -> EntryReference {
    let mut current = Some(reference.clone());
    while let Some(candidate) = current {
        if tree.resolve(&candidate).is_some_and(is_container) {
            return candidate;
        }
        current = candidate.parent();
    }
    EntryReference::root(reference.root_index)
}

impl PanelSettings for ResourceBrowser {
    fn write_settings(&self, out: &mut String) {
        write_int(out, LEFT_ROOT_KEY, self.left.root_index as i64);
        write_str(out, LEFT_PATH_KEY, &self.left.path);
        if let Some(right) = &self.right {
            write_str(out, RIGHT_PATH_KEY, &right.path);
        }
    }

    fn read_setting_line(&mut self, line: &str) -> bool {
        if let Some(index) = read_int(line, LEFT_ROOT_KEY) {
            let index = usize::try_from(index).unwrap_or(0);
            self.left.root_index = index;
            if let Some(right) = &mut self.right {
                right.root_index = index;
            }
            true
        } else if let Some(path) = read_str(line, LEFT_PATH_KEY) {
            self.left.path = path.to_string();
            true
        } else if let Some(path) = read_str(line, RIGHT_PATH_KEY) {
            self.right = Some(EntryReference::new(self.left.root_index, path));
            true
        } else {
            false
        }
    }
}
