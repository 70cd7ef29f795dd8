//! The `bandtrack export` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;

use bandtrack_core::store::{export_file_name, export_json};

use super::{open_session, GlobalOpts};

pub fn execute(opts: &GlobalOpts, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    let session = open_session(opts)?;
    let now = Local::now();
    let json = export_json(session.ledger.state(), &now).context("failed to export data")?;

    if stdout {
        println!("{json}");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(now.date_naive())));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    println!(
        "Exported {} score(s) to {}",
        session.ledger.state().scores.total_count(),
        path.display()
    );
    Ok(())
}
