//! `passvault search` — find records by account, site, or password.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `search` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let store = open_store(cli)?;

    let matches = store.search(query);
    if matches.is_empty() {
        output::info(&format!("No accounts match '{query}'."));
        return Ok(());
    }

    output::info(&format!("{} account(s) match '{query}'", matches.len()));
    output::print_records_table(&matches);

    Ok(())
}
