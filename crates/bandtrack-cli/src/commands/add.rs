//! The `bandtrack add` command.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveTime};

use bandtrack_core::model::{is_valid_band, Category};

use super::{open_session, warn_if_unsaved, GlobalOpts};

/// Parse a band score, accepting only the 5.0–9.0 half-band scale.
pub fn parse_band(s: &str) -> Result<f64, String> {
    let score: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid score: '{s}'"))?;
    if is_valid_band(score) {
        Ok(score)
    } else {
        Err(format!(
            "score must be between 5.0 and 9.0 in steps of 0.5, got {score}"
        ))
    }
}

pub fn execute(
    opts: &GlobalOpts,
    skill: Category,
    score: f64,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Result<()> {
    let mut session = open_session(opts)?;
    let now = Local::now();
    let date = date.unwrap_or_else(|| now.date_naive());
    let time = time.unwrap_or_else(|| now.time());

    let outcome = session.ledger.add_score(skill, score, date, time);
    warn_if_unsaved(&outcome);

    let entry = outcome.into_value();
    let info = skill.info();
    println!(
        "Added {} {} score: {:.1} ({})",
        info.icon,
        info.label,
        entry.score,
        entry.datetime()
    );
    println!("  id: {}", entry.id);

    Ok(())
}
