//! # Dua Catalog
//!
//! The fixed list of prayer-request topics and the paging arithmetic used by
//! the topic picker.
//!
//! ## Example
//!
//! ```
//! use dua_catalog::{SelectionState, TopicCatalog};
//!
//! let catalog = TopicCatalog::builtin();
//! let mut selection = SelectionState::new();
//!
//! let health = catalog.resolve("Health").expect("builtin topic");
//! selection.toggle(&health.text);
//!
//! let page = catalog.page(&selection, 0).expect("first page");
//! assert!(page.entries.iter().any(|e| e.selected));
//! ```

mod builtin;
mod catalog;
mod error;
mod selection;

pub use builtin::builtin_topics;
pub use catalog::{
    CatalogPage, PageEntry, TopicCatalog, TopicEntry, DEFAULT_PAGE_SIZE, SELECTED_MARKER,
};
pub use error::{CatalogError, Result};
pub use selection::SelectionState;
