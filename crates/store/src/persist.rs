use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::record::{Record, RecordTable, COLUMNS};

pub const TABLE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TableDocument {
    v: u32,
    columns: Vec<String>,
    rows: Vec<Record>,
}

/// Exclusive advisory lock on the table, released on drop.
pub(crate) struct TableLock {
    file: File,
}

impl Drop for TableLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// `records.json` locks through `records.json.lock`, never the data file itself.
pub(crate) fn lock_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "records".into());
    name.push(".lock");
    path.with_file_name(name)
}

pub(crate) fn acquire_table_lock(lock_path: &Path) -> Result<TableLock> {
    if let Some(parent) = lock_path.parent() {
        ensure_dir(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(lock_path)
        .map_err(|err| StoreError::io(lock_path, err))?;
    file.lock_exclusive()
        .map_err(|err| StoreError::Lock(format!("lock {}: {err}", lock_path.display())))?;
    Ok(TableLock { file })
}

/// Read the table, or `None` when the file does not exist yet.
pub(crate) fn read_table(path: &Path) -> Result<Option<RecordTable>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    let document: TableDocument = serde_json::from_slice(&bytes)?;
    if document.v != TABLE_VERSION {
        return Err(StoreError::UnsupportedVersion {
            found: document.v,
            expected: TABLE_VERSION,
        });
    }
    if document.columns.iter().map(String::as_str).ne(COLUMNS) {
        return Err(StoreError::SchemaMismatch(document.columns));
    }
    Ok(Some(RecordTable::from_rows(document.rows)))
}

pub(crate) fn write_table(path: &Path, table: &RecordTable) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let document = TableDocument {
        v: TABLE_VERSION,
        columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: table.rows().to_vec(),
    };
    let bytes = serde_json::to_vec_pretty(&document)?;
    write_atomic(path, &bytes)
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("records");
    let tmp = path.with_file_name(format!(".{file_name}.tmp-{}", std::process::id()));

    {
        let mut file = File::create(&tmp).map_err(|err| StoreError::io(&tmp, err))?;
        file.write_all(bytes)
            .map_err(|err| StoreError::io(&tmp, err))?;
        file.sync_all().map_err(|err| StoreError::io(&tmp, err))?;
    }

    std::fs::rename(&tmp, path).map_err(|err| StoreError::io(path, err))
}
