//! `passvault clear` — wipe every record from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `clear` command.
///
/// Clearing writes the empty vault to disk immediately, like every
/// other mutating command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL records in the vault? This cannot be undone")
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let mut store = open_store(cli)?;
    let removed = store.entry_count();
    store.clear_all()?;

    output::success(&format!("Cleared the vault ({removed} record(s) removed)"));

    Ok(())
}
