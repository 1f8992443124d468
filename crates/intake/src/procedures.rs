use chrono::{DateTime, Utc};
use dua_protocol::IdentityId;
use dua_store::{Record, RecordStore};

use crate::error::Result;
use crate::machine::Submission;
use crate::policy::IntakePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// Expired rows swept from every identity.
    pub purged: usize,
    /// Rows of this identity's previous submission.
    pub replaced: usize,
    pub inserted: usize,
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed { rows: usize },
    NothingToRemove,
}

/// Record a submission: sweep expired rows, drop the identity's previous
/// rows, then append one row per topic, all under one store update.
pub fn commit_submission(
    store: &RecordStore,
    submission: &Submission,
    now: DateTime<Utc>,
    policy: &IntakePolicy,
) -> Result<CommitReport> {
    let identity = submission.subject.identity_id;
    let cutoff = policy.cutoff(now);

    let report = store.update(|table| {
        let total = table.len();
        let table = table.purge_older_than(cutoff);
        let purged = total - table.len();

        let kept = table.len();
        let table = table.remove_identity(identity);
        let replaced = kept - table.len();

        let rows: Vec<Record> = submission
            .topics
            .iter()
            .map(|topic| Record::for_subject(&submission.subject, topic.as_str(), now))
            .collect();
        let inserted = rows.len();

        let report = CommitReport {
            purged,
            replaced,
            inserted,
            committed_at: now,
        };
        (table.append(rows), report)
    })?;

    log::info!(
        "Committed {} topics for {identity} (replaced {}, purged {} expired)",
        report.inserted,
        report.replaced,
        report.purged
    );
    Ok(report)
}

pub fn remove_submission(store: &RecordStore, identity: IdentityId) -> Result<RemovalOutcome> {
    let outcome = store.update(|table| {
        let before = table.len();
        let table = table.remove_identity(identity);
        let rows = before - table.len();
        let outcome = if rows == 0 {
            RemovalOutcome::NothingToRemove
        } else {
            RemovalOutcome::Removed { rows }
        };
        (table, outcome)
    })?;

    match outcome {
        RemovalOutcome::Removed { rows } => log::info!("Removed {rows} rows for {identity}"),
        RemovalOutcome::NothingToRemove => log::debug!("Nothing to remove for {identity}"),
    }
    Ok(outcome)
}
