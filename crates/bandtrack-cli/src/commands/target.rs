//! The `bandtrack target` command.

use anyhow::Result;
use chrono::NaiveDate;

use super::{open_session, warn_if_unsaved, GlobalOpts};

pub fn execute(opts: &GlobalOpts, date: NaiveDate) -> Result<()> {
    let mut session = open_session(opts)?;
    let outcome = session.ledger.set_target_date(date);
    warn_if_unsaved(&outcome);

    println!(
        "Exam date set to {} ({} days left)",
        date.format("%B %d, %Y"),
        session.ledger.days_until_target()
    );
    Ok(())
}
