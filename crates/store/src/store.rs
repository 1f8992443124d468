use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Result, StoreError};
use crate::persist::{acquire_table_lock, lock_path_for, read_table, write_table};
use crate::record::RecordTable;

#[derive(Debug)]
enum Backend {
    File { path: PathBuf, lock_path: PathBuf },
    Memory(Mutex<RecordTable>),
}

/// Whole-table load/save over a JSON file or an in-memory slot.
///
/// [`RecordStore::update`] is the only way the intake flow mutates the table:
/// it holds an exclusive lock for the full load → mutate → save cycle, so
/// two writers never interleave even if events are handled concurrently.
#[derive(Debug)]
pub struct RecordStore {
    backend: Backend,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = lock_path_for(&path);
        Self {
            backend: Backend::File { path, lock_path },
        }
    }

    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Mutex::new(RecordTable::new())),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.backend {
            Backend::File { path, .. } => Some(path),
            Backend::Memory(_) => None,
        }
    }

    /// Load the table. A missing file is initialised with an empty table.
    pub fn load(&self) -> Result<RecordTable> {
        match &self.backend {
            Backend::File { path, lock_path } => {
                let _lock = acquire_table_lock(lock_path)?;
                load_or_init(path)
            }
            Backend::Memory(slot) => Ok(slot.lock().map_err(poisoned)?.clone()),
        }
    }

    /// Overwrite the whole table.
    pub fn save(&self, table: &RecordTable) -> Result<()> {
        match &self.backend {
            Backend::File { path, lock_path } => {
                let _lock = acquire_table_lock(lock_path)?;
                write_table(path, table)
            }
            Backend::Memory(slot) => {
                *slot.lock().map_err(poisoned)? = table.clone();
                Ok(())
            }
        }
    }

    /// Scoped load → mutate → save under the table lock.
    ///
    /// The table is only written back when `mutate` changed it. The lock is
    /// released on every exit path, including errors.
    pub fn update<R>(&self, mutate: impl FnOnce(RecordTable) -> (RecordTable, R)) -> Result<R> {
        match &self.backend {
            Backend::File { path, lock_path } => {
                let _lock = acquire_table_lock(lock_path)?;
                let before = load_or_init(path)?;
                let (after, out) = mutate(before.clone());
                if after != before {
                    write_table(path, &after)?;
                    log::debug!("Saved {} rows to {}", after.len(), path.display());
                }
                Ok(out)
            }
            Backend::Memory(slot) => {
                let mut guard = slot.lock().map_err(poisoned)?;
                let (after, out) = mutate(guard.clone());
                *guard = after;
                Ok(out)
            }
        }
    }
}

fn load_or_init(path: &Path) -> Result<RecordTable> {
    if let Some(table) = read_table(path)? {
        return Ok(table);
    }
    let table = RecordTable::new();
    write_table(path, &table)?;
    log::info!("Initialised empty record table at {}", path.display());
    Ok(table)
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Lock("memory table poisoned".to_string())
}
