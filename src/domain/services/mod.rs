//! Domain Services
//!
//! Pure browsing and selection logic. Storage, caches and the scene graph are
//! reached only through the ports.

mod entry_ops;
mod factory;
mod range_selection;
mod search;
mod tree_model;

pub use entry_ops::{DeleteResult, EntryOperations, RenameResult};
pub use factory::{FactoryId, FactoryRegistry, ResourceFactory, TemplateFactory};
pub use range_selection::{
    ClickModifiers, ClickOutcome, RangeSelectionEngine, RangeSelectionRequest, RangeState,
};
pub use search::{RootSearch, SceneSearch, SearchFilterCache, SearchRefresh, Searchable};
pub use tree_model::{ListingFailure, TreeModel};
