//! # Dua Store
//!
//! One flat table of `(identity, topic, timestamp)` rows.
//!
//! ## Policy
//!
//! - Every identity owns only the rows of its latest submission.
//! - Rows older than the retention window are swept on every commit.
//!
//! The policy itself lives in [`RecordTable`] as pure transformations;
//! [`RecordStore`] only loads and saves whole tables.
//!
//! ## Example
//!
//! ```no_run
//! use chrono::{Duration, Utc};
//! use dua_store::RecordStore;
//!
//! fn main() -> dua_store::Result<()> {
//!     let store = RecordStore::open("dua_records.json");
//!     let cutoff = Utc::now() - Duration::days(14);
//!     let purged = store.update(|table| {
//!         let before = table.len();
//!         let table = table.purge_older_than(cutoff);
//!         let purged = before - table.len();
//!         (table, purged)
//!     })?;
//!     println!("purged {purged} rows");
//!     Ok(())
//! }
//! ```

mod error;
mod persist;
mod record;
mod store;

pub use error::{Result, StoreError};
pub use persist::TABLE_VERSION;
pub use record::{Record, RecordTable, COLUMNS};
pub use store::RecordStore;
