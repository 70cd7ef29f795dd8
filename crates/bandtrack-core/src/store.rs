//! Tracker persistence.
//!
//! The whole [`TrackerState`] is stored as one JSON document. Every save is a
//! full rewrite; there is a single writer per backing file.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::model::{fallback_target_date, Category, Scores, TrackerState, DATE_FORMAT};

/// Default backing file name, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "ielts_data.json";

/// Result of loading state: always usable, possibly with a warning.
#[derive(Debug)]
pub struct Loaded {
    pub state: TrackerState,
    /// Set when the stored document was missing or partly/fully unusable.
    pub warning: Option<StoreError>,
}

impl Loaded {
    fn fallback(warning: StoreError) -> Self {
        Self {
            state: TrackerState::default(),
            warning: Some(warning),
        }
    }
}

/// Where tracker state lives between sessions.
pub trait StateStore {
    /// Load the stored state, substituting defaults on any failure.
    fn load(&self) -> Loaded;

    /// Overwrite the stored state.
    fn save(&self, state: &TrackerState) -> Result<(), StoreError>;

    /// Delete the stored state. Succeeds when nothing is stored.
    fn clear(&self) -> Result<(), StoreError>;
}

/// On-disk document shape.
#[derive(Debug, Serialize, Deserialize)]
struct TrackerDocument {
    scores: Scores,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exported_at: Option<String>,
}

impl TrackerDocument {
    fn from_state(state: &TrackerState) -> Self {
        Self {
            scores: state.scores.clone(),
            target_date: Some(state.target_date.format(DATE_FORMAT).to_string()),
            exported_at: None,
        }
    }

    /// Convert into state, applying the fallback exam date when absent or bad.
    fn into_state(self) -> (TrackerState, Option<StoreError>) {
        let mut scores = self.scores;
        for category in crate::model::Category::ALL {
            scores.get_mut(category).sort_by_key(|e| e.sort_key());
        }

        let (target_date, warning) = match self.target_date {
            None => (fallback_target_date(), None),
            Some(raw) => match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
                Ok(date) => (date, None),
                Err(source) => (
                    fallback_target_date(),
                    Some(StoreError::InvalidTargetDate { value: raw, source }),
                ),
            },
        };

        (
            TrackerState {
                scores,
                target_date,
            },
            warning,
        )
    }
}

fn encode(state: &TrackerState) -> Result<String, StoreError> {
    // serde_json writes non-finite floats as `null`, which would not load back.
    for category in Category::ALL {
        let entries = state.scores.get(category);
        if let Some(e) = entries.iter().find(|e| !e.score.is_finite()) {
            return Err(StoreError::NonFiniteScore {
                category,
                id: e.id.clone(),
                score: e.score,
            });
        }
    }
    let doc = TrackerDocument::from_state(state);
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn decode(content: &str, path: &Path) -> Loaded {
    match serde_json::from_str::<TrackerDocument>(content) {
        Ok(doc) => {
            let (state, warning) = doc.into_state();
            Loaded { state, warning }
        }
        Err(source) => Loaded::fallback(StoreError::Parse {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Render the export form of `state`: the persisted document plus an
/// `exported_at` timestamp.
pub fn export_json<Tz>(
    state: &TrackerState,
    exported_at: &DateTime<Tz>,
) -> Result<String, StoreError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut doc = TrackerDocument::from_state(state);
    doc.exported_at = Some(exported_at.to_rfc3339());
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Suggested file name for an export made on `day`.
pub fn export_file_name(day: NaiveDate) -> String {
    format!("ielts_progress_{}.json", day.format("%Y%m%d"))
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Stores state as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether anything has been saved yet.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Loaded {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no saved data, starting fresh");
                return Loaded::fallback(StoreError::Missing {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                let err = StoreError::Read {
                    path: self.path.clone(),
                    source,
                };
                warn!("{err}; using defaults");
                return Loaded::fallback(err);
            }
        };

        let loaded = decode(&content, &self.path);
        match &loaded.warning {
            Some(err) => warn!("{err}"),
            None => debug!(
                path = %self.path.display(),
                entries = loaded.state.scores.total_count(),
                "loaded tracker data"
            ),
        }
        loaded
    }

    fn save(&self, state: &TrackerState) -> Result<(), StoreError> {
        let json = encode(state)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "saved tracker data");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed tracker data");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Remove {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Keeps the serialized document in memory. Useful for tests and dry runs.
///
/// Goes through the same JSON encoding as [`JsonFileStore`], so a load after
/// a save sees exactly what a file-backed store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    save_count: Cell<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with raw document text.
    pub fn with_document(content: &str) -> Self {
        let store = Self::default();
        *store.document.borrow_mut() = Some(content.to_string());
        store
    }

    /// Make subsequent saves fail, as a read-only disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.get()
    }

    /// The raw stored document, if any.
    pub fn document(&self) -> Option<String> {
        self.document.borrow().clone()
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Loaded {
        let path = Path::new("<memory>");
        match self.document.borrow().as_deref() {
            Some(content) => decode(content, path),
            None => Loaded::fallback(StoreError::Missing {
                path: path.to_path_buf(),
            }),
        }
    }

    fn save(&self, state: &TrackerState) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Write {
                path: PathBuf::from("<memory>"),
                source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
            });
        }
        *self.document.borrow_mut() = Some(encode(state)?);
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.document.borrow_mut() = None;
        Ok(())
    }
}
