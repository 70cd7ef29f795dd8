//! The `bandtrack dashboard` command.

use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Table};

use bandtrack_core::statistics::{Dashboard, Recommendation, Trend};

use super::{fmt_score, open_session, GlobalOpts};

pub fn execute(opts: &GlobalOpts, format: &str) -> Result<()> {
    let session = open_session(opts)?;
    let today = Local::now().date_naive();
    let dash = session.ledger.dashboard(today);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&dash)?),
        "text" => print_text(&dash),
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    }
    Ok(())
}

fn fmt_trend(trend: Option<Trend>) -> String {
    match trend {
        Some(Trend::Improving(d)) => format!("+{d:.1}"),
        Some(Trend::Declining(d)) => format!("{d:.1}"),
        Some(Trend::Stable) => "stable".to_string(),
        None => "—".to_string(),
    }
}

fn print_text(dash: &Dashboard) {
    println!(
        "{} days until IELTS ({})",
        dash.days_left,
        dash.target_date.format("%B %d, %Y")
    );
    println!("\"{}\"", dash.quote);
    println!();

    let mut table = Table::new();
    table.set_header(vec![
        "Skill", "Latest", "Best", "Avg", "Tests", "Trend", "Status",
    ]);
    for summary in &dash.categories {
        let info = summary.category.info();
        table.add_row(vec![
            Cell::new(format!("{} {}", info.icon, info.label)),
            Cell::new(fmt_score(summary.latest)),
            Cell::new(fmt_score(summary.best)),
            Cell::new(fmt_score(summary.average)),
            Cell::new(summary.count),
            Cell::new(fmt_trend(summary.trend)),
            Cell::new(format!("{} {}", summary.status.icon, summary.status.label)),
        ]);
    }
    println!("{table}");
    println!();

    println!(
        "Overall average: {} ({} {}), {} total tests",
        fmt_score(dash.overall_average),
        dash.overall_status.icon,
        dash.overall_status.label,
        dash.total_tests
    );
    println!(
        "Exam readiness: {}/4 skills at target ({}% ready)",
        dash.readiness, dash.readiness_percent
    );
    match dash.recommendation {
        Recommendation::AllStrong => {
            println!("Next focus: {} Maintain current level.", dash.recommendation)
        }
        Recommendation::Focus { current, .. } => println!(
            "Next focus: {} (current: {}, target: 7.0+)",
            dash.recommendation,
            current
                .map(|s| format!("{s:.1}"))
                .unwrap_or_else(|| "not tested".to_string())
        ),
    }
}
