//! Ledger persistence integration tests.
//!
//! Exercises the ledger against real files: write-through on every
//! mutation, reload fidelity, and the ordering and id invariants across
//! longer add/remove sequences.

use std::collections::HashSet;

use bandtrack_core::ledger::ScoreLedger;
use bandtrack_core::model::{fallback_target_date, Category, TrackerState, BAND_SCALE};
use bandtrack_core::store::{JsonFileStore, StateStore};
use chrono::{Duration, NaiveDate, NaiveTime};
use tempfile::TempDir;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn open(dir: &TempDir) -> ScoreLedger<JsonFileStore> {
    ScoreLedger::open(JsonFileStore::new(dir.path().join("ielts_data.json"))).0
}

fn assert_sorted(state: &TrackerState) {
    for category in Category::ALL {
        let entries = state.scores.get(category);
        assert!(
            entries.windows(2).all(|w| w[0].sort_key() <= w[1].sort_key()),
            "{category} list out of order"
        );
    }
}

fn assert_unique_ids(state: &TrackerState) {
    for category in Category::ALL {
        let entries = state.scores.get(category);
        let ids: HashSet<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), entries.len(), "{category} has duplicate ids");
    }
}

#[test]
fn reopened_session_sees_every_mutation() {
    let dir = TempDir::new().unwrap();
    {
        let mut ledger = open(&dir);
        let _ = ledger.add_score(Category::Listening, 6.5, d(2025, 1, 10), t(9, 0));
        let _ = ledger.add_score(Category::Listening, 7.0, d(2025, 1, 5), t(9, 0));
        let _ = ledger.add_score(Category::Writing, 6.0, d(2025, 1, 7), t(14, 15));
        let _ = ledger.set_target_date(d(2026, 4, 18));
    }

    let ledger = open(&dir);
    assert_eq!(ledger.target_date(), d(2026, 4, 18));
    assert_eq!(ledger.latest(Category::Listening), Some(6.5));
    assert_eq!(ledger.best(Category::Listening), Some(7.0));
    assert_eq!(ledger.average(Category::Listening), Some(6.8));
    assert_eq!(ledger.count(Category::Writing), 1);
    assert_eq!(ledger.latest(Category::Reading), None);
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut ledger = open(&dir);
    for (i, category) in Category::ALL.into_iter().enumerate() {
        let date = d(2025, 3, 1 + i as u32);
        let _ = ledger.add_score(category, BAND_SCALE[i * 2], date, t(8, 30));
    }
    let _ = ledger.set_target_date(d(2025, 12, 24));

    let loaded = ledger.store().load();
    assert!(loaded.warning.is_none());
    assert_eq!(&loaded.state, ledger.state());
}

#[test]
fn ordering_and_ids_hold_over_long_sequences() {
    let dir = TempDir::new().unwrap();
    let mut ledger = open(&dir);
    let start = d(2025, 1, 1);

    for i in 0..60u32 {
        let category = Category::ALL[(i % 4) as usize];
        let date = start + Duration::days(((i * 13) % 20) as i64);
        let time = t(9 + (i % 3), 0);
        let score = BAND_SCALE[(i % 9) as usize];
        let _ = ledger.add_score(category, score, date, time);

        // Drop an older entry every few additions so ids get recycled.
        if i % 5 == 4 {
            let victim = ledger.entries(category)[0].id.clone();
            let _ = ledger.remove_score(category, &victim);
        }

        assert_sorted(ledger.state());
        assert_unique_ids(ledger.state());
    }

    let reopened = open(&dir);
    assert_eq!(reopened.state(), ledger.state());
}

#[test]
fn removing_unknown_id_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut ledger = open(&dir);
    let _ = ledger.add_score(Category::Reading, 6.0, d(2025, 2, 1), t(9, 0));
    let before = std::fs::read_to_string(ledger.store().path()).unwrap();

    let outcome = ledger.remove_score(Category::Reading, "2025-02-01_09:00_9");
    assert!(!outcome.value);
    let after = std::fs::read_to_string(ledger.store().path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn clear_all_deletes_backing_file() {
    let dir = TempDir::new().unwrap();
    let mut ledger = open(&dir);
    let _ = ledger.add_score(Category::Speaking, 7.5, d(2025, 2, 1), t(9, 0));
    let _ = ledger.set_target_date(d(2026, 1, 1));
    assert!(ledger.store().exists());

    assert!(ledger.clear_all().is_persisted());
    assert!(!ledger.store().exists());

    let (fresh, warning) =
        ScoreLedger::open(JsonFileStore::new(dir.path().join("ielts_data.json")));
    assert!(warning.is_some_and(|w| w.is_missing()));
    assert!(fresh.state().scores.is_empty());
    assert_eq!(fresh.target_date(), fallback_target_date());
}

#[test]
fn readiness_scenario_from_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("ielts_data.json"),
        r#"{
  "scores": {
    "listening": [{"id": "l", "date": "2025-01-01", "time": "09:00", "score": 7.5, "datetime": "2025-01-01 09:00"}],
    "reading": [{"id": "r", "date": "2025-01-01", "time": "09:00", "score": 7.0, "datetime": "2025-01-01 09:00"}],
    "writing": [{"id": "w", "date": "2025-01-01", "time": "09:00", "score": 6.0, "datetime": "2025-01-01 09:00"}],
    "speaking": [{"id": "s", "date": "2025-01-01", "time": "09:00", "score": 5.5, "datetime": "2025-01-01 09:00"}]
  },
  "target_date": "2025-11-01"
}"#,
    )
    .unwrap();

    let ledger = open(&dir);
    assert_eq!(ledger.readiness(), 2);
    assert_eq!(ledger.weakest_category(), Category::Speaking);
    assert_eq!(ledger.days_until_target_from(d(2025, 12, 1)), 0);
}
