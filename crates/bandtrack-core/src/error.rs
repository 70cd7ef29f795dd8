//! Persistence error types.
//!
//! None of these are fatal to a session: load failures fall back to the
//! default state, and save failures leave the in-memory state authoritative.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::Category;

/// Errors that can occur when reading or writing the backing file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist yet.
    #[error("no saved data at {}", path.display())]
    Missing { path: PathBuf },

    /// The backing file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a valid tracker document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The stored exam date is not `YYYY-MM-DD`.
    #[error("invalid target date '{value}': {source}")]
    InvalidTargetDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A score is NaN or infinite and has no JSON representation.
    #[error("cannot save {category} entry {id}: score {score} is not a finite number")]
    NonFiniteScore {
        category: Category,
        id: String,
        score: f64,
    },

    /// The state could not be encoded as JSON.
    #[error("failed to serialize tracker data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file could not be deleted.
    #[error("failed to remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Returns `true` for the first-run case where nothing has been saved yet.
    pub fn is_missing(&self) -> bool {
        matches!(self, StoreError::Missing { .. })
    }
}
