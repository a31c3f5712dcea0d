//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use std::collections::BTreeMap;

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Accounts;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print vault records as a numbered Account/Site/Password table.
pub fn print_records_table(accounts: &Accounts) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Account", "Site", "Password"]);

    let mut row = 1usize;
    for (account, sites) in accounts {
        for (site, password) in sites {
            table.add_row(vec![
                row.to_string(),
                account.clone(),
                site.clone(),
                password.clone(),
            ]);
            row += 1;
        }
    }

    println!("{table}");
}

/// Print one account's records as a Site/Password table.
pub fn print_sites_table(sites: &BTreeMap<String, String>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Password"]);

    for (site, password) in sites {
        table.add_row(vec![site.clone(), password.clone()]);
    }

    println!("{table}");
}
