use chrono::{DateTime, Utc};
use dua_protocol::{Gender, IdentityId, Subject};
use serde::{Deserialize, Serialize};

/// Column names of the persisted table, in order.
pub const COLUMNS: [&str; 6] = [
    "user_id",
    "Gender",
    "Name",
    "Father's Name",
    "Topic",
    "timestamp",
];

/// One chosen topic of one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "user_id")]
    pub identity_id: IdentityId,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Father's Name")]
    pub father_name: String,
    #[serde(rename = "Topic")]
    pub topic: String,
    pub timestamp: DateTime<Utc>,
}

impl Record {
    pub fn for_subject(subject: &Subject, topic: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            identity_id: subject.identity_id,
            gender: subject.gender,
            name: subject.name.clone(),
            father_name: subject.father_name.clone(),
            topic: topic.into(),
            timestamp: at,
        }
    }
}

/// In-memory image of the whole table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    rows: Vec<Record>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_identity(&self, identity: IdentityId) -> bool {
        self.rows.iter().any(|row| row.identity_id == identity)
    }

    pub fn rows_for(&self, identity: IdentityId) -> impl Iterator<Item = &Record> {
        self.rows.iter().filter(move |row| row.identity_id == identity)
    }

    /// Keep rows stamped at or after `cutoff`.
    #[must_use]
    pub fn purge_older_than(mut self, cutoff: DateTime<Utc>) -> Self {
        self.rows.retain(|row| row.timestamp >= cutoff);
        self
    }

    #[must_use]
    pub fn remove_identity(mut self, identity: IdentityId) -> Self {
        self.rows.retain(|row| row.identity_id != identity);
        self
    }

    #[must_use]
    pub fn append(mut self, rows: impl IntoIterator<Item = Record>) -> Self {
        self.rows.extend(rows);
        self
    }
}
