//! The `bandtrack remove` command.

use anyhow::Result;

use bandtrack_core::model::Category;

use super::{open_session, warn_if_unsaved, GlobalOpts};

pub fn execute(opts: &GlobalOpts, skill: Category, id: &str) -> Result<()> {
    let mut session = open_session(opts)?;
    let outcome = session.ledger.remove_score(skill, id);
    warn_if_unsaved(&outcome);

    if outcome.value {
        println!("Removed {skill} entry {id}");
    } else {
        println!("No {skill} entry with id {id}; nothing removed.");
    }
    Ok(())
}
