//! `passvault show` — display all sites stored under one account.

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::Result;

/// Execute the `show` command.
///
/// An unknown account is not an error: it prints the same message as an
/// account whose records have all been deleted.
pub fn execute(cli: &Cli, account: &str) -> Result<()> {
    let store = open_store(cli)?;

    let sites = store.get(account);
    if sites.is_empty() {
        output::info(&format!("No records stored for account '{account}'."));
        return Ok(());
    }

    output::info(&format!("{} record(s) for '{account}'", sites.len()));
    output::print_sites_table(&sites);

    Ok(())
}
