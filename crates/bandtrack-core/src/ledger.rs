//! The score ledger: the live session state and its write-through store.
//!
//! A [`ScoreLedger`] is created once per session from a [`StateStore`],
//! mutated through its methods, and persisted after every mutation. Save
//! failures never roll back the in-memory state.

use chrono::{Local, NaiveDate, NaiveTime};
use tracing::{info, warn};

use crate::error::StoreError;
use crate::model::{
    truncate_to_minute, Category, ScoreEntry, TrackerState, DATE_FORMAT, TIME_FORMAT,
};
use crate::statistics::{self, Dashboard};
use crate::store::{export_json, StateStore};

/// Outcome of a mutating ledger operation.
///
/// The mutation itself always takes effect; `persist_error` is set when the
/// store could not record it.
#[derive(Debug)]
#[must_use]
pub struct Mutation<T> {
    pub value: T,
    pub persist_error: Option<StoreError>,
}

impl<T> Mutation<T> {
    /// Returns `true` if the store recorded the change.
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

/// Session-lifetime owner of the tracker state.
#[derive(Debug)]
pub struct ScoreLedger<S> {
    state: TrackerState,
    store: S,
}

impl<S: StateStore> ScoreLedger<S> {
    /// Start a session from whatever `store` holds.
    ///
    /// Returns the load warning alongside the ledger; the ledger is usable
    /// either way.
    pub fn open(store: S) -> (Self, Option<StoreError>) {
        let loaded = store.load();
        (
            Self {
                state: loaded.state,
                store,
            },
            loaded.warning,
        )
    }

    /// Start a session from an explicit state without loading.
    pub fn with_state(state: TrackerState, store: S) -> Self {
        Self { state, store }
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session, handing back the final state.
    pub fn into_state(self) -> TrackerState {
        self.state
    }

    /// Entries for `category`, ordered by (date, time).
    pub fn entries(&self, category: Category) -> &[ScoreEntry] {
        self.state.scores.get(category)
    }

    pub fn target_date(&self) -> NaiveDate {
        self.state.target_date
    }

    fn persist<T>(&self, value: T) -> Mutation<T> {
        let persist_error = match self.store.save(&self.state) {
            Ok(()) => None,
            Err(e) => {
                warn!("{e}; changes are kept for this session only");
                Some(e)
            }
        };
        Mutation {
            value,
            persist_error,
        }
    }

    /// Record a test attempt.
    ///
    /// The score is not checked against the band scale; callers that accept
    /// user input should do that with [`crate::model::is_valid_band`]. A NaN
    /// or infinite score is kept in memory but cannot be saved: the store
    /// reports [`StoreError::NonFiniteScore`] and leaves the previous data in
    /// place until the entry is removed.
    pub fn add_score(
        &mut self,
        category: Category,
        score: f64,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Mutation<ScoreEntry> {
        let time = truncate_to_minute(time);
        let entries = self.state.scores.get_mut(category);
        let entry = ScoreEntry {
            id: next_id(entries, date, time),
            date,
            time,
            score,
        };
        entries.push(entry.clone());
        entries.sort_by_key(|e| e.sort_key());

        info!(%category, id = %entry.id, score, "added score");
        self.persist(entry)
    }

    /// Remove the entry with `id`. Returns whether anything was removed.
    pub fn remove_score(&mut self, category: Category, id: &str) -> Mutation<bool> {
        let entries = self.state.scores.get_mut(category);
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;

        if removed {
            info!(%category, id, "removed score");
        }
        self.persist(removed)
    }

    pub fn set_target_date(&mut self, date: NaiveDate) -> Mutation<()> {
        self.state.target_date = date;
        info!(target_date = %date, "updated exam date");
        self.persist(())
    }

    /// Drop every score and delete the backing data. The exam date is kept
    /// in memory.
    pub fn clear_all(&mut self) -> Mutation<()> {
        self.state.scores = Default::default();
        info!("cleared all scores");
        let persist_error = self.store.clear().err();
        if let Some(e) = &persist_error {
            warn!("{e}");
        }
        Mutation {
            value: (),
            persist_error,
        }
    }

    /// Export JSON for the current state, stamped with the current time.
    pub fn export(&self) -> Result<String, StoreError> {
        export_json(&self.state, &Local::now())
    }
}

impl<S> ScoreLedger<S> {
    /// Days from `today` until the exam, never negative.
    pub fn days_until_target_from(&self, today: NaiveDate) -> i64 {
        statistics::days_until(self.state.target_date, today)
    }

    /// Days from the local calendar date until the exam, never negative.
    pub fn days_until_target(&self) -> i64 {
        self.days_until_target_from(Local::now().date_naive())
    }

    pub fn latest(&self, category: Category) -> Option<f64> {
        statistics::latest(self.state.scores.get(category))
    }

    pub fn average(&self, category: Category) -> Option<f64> {
        statistics::average(self.state.scores.get(category))
    }

    pub fn best(&self, category: Category) -> Option<f64> {
        statistics::best(self.state.scores.get(category))
    }

    pub fn count(&self, category: Category) -> usize {
        self.state.scores.get(category).len()
    }

    pub fn overall_average(&self) -> Option<f64> {
        statistics::overall_average(&self.state)
    }

    pub fn readiness(&self) -> usize {
        statistics::readiness(&self.state)
    }

    pub fn weakest_category(&self) -> Category {
        statistics::weakest_category(&self.state)
    }

    /// Snapshot of everything the dashboard shows, as of `today`.
    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        statistics::dashboard(&self.state, today)
    }
}

/// `"{date}_{time}_{n}"`, where `n` starts at the current list length and is
/// bumped past any id already in use.
fn next_id(entries: &[ScoreEntry], date: NaiveDate, time: NaiveTime) -> String {
    let stem = format!("{}_{}", date.format(DATE_FORMAT), time.format(TIME_FORMAT));
    let mut seq = entries.len();
    loop {
        let id = format!("{stem}_{seq}");
        if !entries.iter().any(|e| e.id == id) {
            return id;
        }
        seq += 1;
    }
}
