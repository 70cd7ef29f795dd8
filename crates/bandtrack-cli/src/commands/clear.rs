//! The `bandtrack clear` command.

use anyhow::Result;

use super::{open_session, warn_if_unsaved, GlobalOpts};

pub fn execute(opts: &GlobalOpts, yes: bool) -> Result<()> {
    let mut session = open_session(opts)?;
    let total = session.ledger.state().scores.total_count();

    if !yes {
        eprintln!(
            "This deletes all {total} recorded score(s) and {}.",
            session.config.data_file.display()
        );
        eprintln!("Run again with --yes to confirm.");
        return Ok(());
    }

    let outcome = session.ledger.clear_all();
    warn_if_unsaved(&outcome);
    println!("All data cleared ({total} score(s) removed).");
    Ok(())
}
