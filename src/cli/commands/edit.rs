//! `passvault edit` — change the password of an existing record.

use crate::cli::output;
use crate::cli::{open_store, read_password_value, require_non_empty, Cli};
use crate::errors::Result;

/// Execute the `edit` command.
pub fn execute(cli: &Cli, account: &str, site: &str, password: Option<&str>) -> Result<()> {
    require_non_empty(account, "account")?;
    require_non_empty(site, "site")?;

    let password =
        read_password_value(password, &format!("Enter new password for {account}/{site}"))?;
    require_non_empty(&password, "password")?;

    let mut store = open_store(cli)?;
    store.edit(account, site, &password)?;

    output::success(&format!("Updated password for '{site}' under '{account}'"));

    Ok(())
}
