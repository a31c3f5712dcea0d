//! `passvault list` — display every record in a table.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;

    if store.entry_count() == 0 {
        output::info("The vault is empty.");
        output::tip("Run `passvault add <account> <site>` to store your first password.");
        return Ok(());
    }

    output::info(&format!("{} record(s)", store.entry_count()));
    output::print_records_table(store.accounts());

    Ok(())
}
