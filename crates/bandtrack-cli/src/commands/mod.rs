//! Subcommand implementations.

use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use bandtrack_core::config::{load_config_from, TrackerConfig};
use bandtrack_core::ledger::{Mutation, ScoreLedger};
use bandtrack_core::store::JsonFileStore;

pub mod add;
pub mod clear;
pub mod dashboard;
pub mod export;
pub mod history;
pub mod init;
pub mod remove;
pub mod target;

/// Options shared by every subcommand.
pub struct GlobalOpts {
    pub config: Option<PathBuf>,
    pub data_file: Option<PathBuf>,
}

/// A loaded config plus the ledger it points at.
pub struct Session {
    pub config: TrackerConfig,
    pub ledger: ScoreLedger<JsonFileStore>,
}

/// Load config and tracker data. Unreadable data is reported and replaced
/// with defaults.
pub fn open_session(opts: &GlobalOpts) -> Result<Session> {
    let mut config = load_config_from(opts.config.as_deref())?;
    if let Some(path) = &opts.data_file {
        config.data_file = path.clone();
    }

    debug!(data_file = %config.data_file.display(), "opening tracker data");
    let store = JsonFileStore::new(&config.data_file);
    let (ledger, warning) = ScoreLedger::open(store);
    if let Some(w) = warning.filter(|w| !w.is_missing()) {
        eprintln!("Warning: {w}; starting from default data.");
    }

    Ok(Session { config, ledger })
}

/// Print a warning if a change could not be saved.
pub fn warn_if_unsaved<T>(mutation: &Mutation<T>) {
    if let Some(e) = &mutation.persist_error {
        eprintln!("Warning: {e}; the change was not saved.");
    }
}

/// Render an optional score, with a dash for "no data".
pub fn fmt_score(score: Option<f64>) -> String {
    score
        .map(|s| format!("{s:.1}"))
        .unwrap_or_else(|| "—".to_string())
}
