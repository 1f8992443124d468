use chrono::{Duration, TimeZone, Utc};
use dua_intake::{commit_submission, remove_submission, IntakePolicy, RemovalOutcome, Submission};
use dua_protocol::{Gender, IdentityId, Subject};
use dua_store::RecordStore;
use proptest::prelude::*;

fn submission(id: i64, topics: &[String]) -> Submission {
    Submission {
        subject: Subject {
            identity_id: IdentityId(id),
            gender: Gender::Brother,
            name: format!("name-{id}"),
            father_name: format!("father-{id}"),
        },
        topics: topics.to_vec(),
    }
}

fn topic_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,12}", 0..6)
}

proptest! {
    #[test]
    fn identity_only_ever_holds_its_latest_submission(
        rounds in prop::collection::vec((0i64..4, topic_list()), 1..12),
    ) {
        let store = RecordStore::in_memory();
        let policy = IntakePolicy::default();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut latest: std::collections::HashMap<i64, Vec<String>> = Default::default();

        for (step, (id, topics)) in rounds.iter().enumerate() {
            let now = start + Duration::minutes(step as i64);
            let report = commit_submission(&store, &submission(*id, topics), now, &policy)
                .expect("commit");
            prop_assert_eq!(report.inserted, topics.len());
            prop_assert_eq!(report.purged, 0);
            latest.insert(*id, topics.clone());
        }

        let table = store.load().expect("load");
        for (id, topics) in &latest {
            let stored: Vec<String> = table
                .rows_for(IdentityId(*id))
                .map(|r| r.topic.clone())
                .collect();
            prop_assert_eq!(&stored, topics);
        }
        prop_assert_eq!(table.len(), latest.values().map(Vec::len).sum::<usize>());
    }
}

#[test]
fn retention_window_is_configurable() {
    let store = RecordStore::in_memory();
    let policy = IntakePolicy {
        retention_days: 30,
        require_selection: true,
    };
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let topics = vec!["x".to_string()];

    commit_submission(&store, &submission(1, &topics), start, &policy).expect("first");
    let report = commit_submission(
        &store,
        &submission(2, &topics),
        start + Duration::days(20),
        &policy,
    )
    .expect("second");
    assert_eq!(report.purged, 0);

    let report = commit_submission(
        &store,
        &submission(2, &topics),
        start + Duration::days(31),
        &policy,
    )
    .expect("third");
    assert_eq!(report.purged, 1);
    assert_eq!(report.replaced, 1);
}

#[test]
fn removal_is_idempotent() {
    let store = RecordStore::in_memory();
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let topics = vec!["a".to_string(), "b".to_string()];
    commit_submission(&store, &submission(9, &topics), now, &IntakePolicy::default())
        .expect("commit");

    assert_eq!(
        remove_submission(&store, IdentityId(9)).expect("remove"),
        RemovalOutcome::Removed { rows: 2 }
    );
    assert_eq!(
        remove_submission(&store, IdentityId(9)).expect("remove again"),
        RemovalOutcome::NothingToRemove
    );
}
