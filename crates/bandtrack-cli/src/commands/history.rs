//! The `bandtrack history` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use bandtrack_core::model::{Category, DATE_FORMAT, TIME_FORMAT};
use bandtrack_core::statistics::{self, Trend};

use super::{open_session, GlobalOpts};

pub fn execute(opts: &GlobalOpts, skill: Category, limit: Option<usize>) -> Result<()> {
    let session = open_session(opts)?;
    let limit = limit.unwrap_or(session.config.recent_limit);
    anyhow::ensure!(limit >= 1, "limit must be at least 1");

    let entries = session.ledger.entries(skill);
    let info = skill.info();
    if entries.is_empty() {
        println!(
            "No {skill} scores yet. Add one with: bandtrack add --skill {skill} --score <band>"
        );
        return Ok(());
    }

    println!("{} {} — {} test(s)", info.icon, info.label, entries.len());

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Time", "Score", "Id"]);
    let series = statistics::progress_series(entries);
    for (point, entry) in series.iter().zip(entries).rev().take(limit) {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(point.date.format(DATE_FORMAT)),
            Cell::new(entry.time.format(TIME_FORMAT)),
            Cell::new(format!("{:.1}", point.score)),
            Cell::new(&entry.id),
        ]);
    }
    println!("{table}");

    match statistics::trend(entries) {
        Some(Trend::Improving(d)) => {
            println!("+{d:.1} points improvement since the first test")
        }
        Some(Trend::Declining(d)) => println!("{d:.1} points since the first test"),
        Some(Trend::Stable) => println!("Stable performance"),
        None => {}
    }
    Ok(())
}
