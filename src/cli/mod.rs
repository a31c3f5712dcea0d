//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{Result, VaultError};
use crate::vault::VaultStore;

/// Passvault CLI: local encrypted password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local encrypted password vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Key file path (overrides .passvault.toml, default: key.key)
    #[arg(long, global = true)]
    pub key_file: Option<String>,

    /// Encrypted data file path (overrides .passvault.toml, default: passwords.vault)
    #[arg(long, global = true)]
    pub data_file: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new password record
    Add {
        /// Account the record belongs to (e.g. alice)
        account: String,
        /// Site the password is for (e.g. github)
        site: String,
        /// Password value (omit for interactive prompt)
        password: Option<String>,
    },

    /// Show all sites stored under an account
    Show {
        /// Account name
        account: String,
    },

    /// Change the password of an existing record
    Edit {
        /// Account name
        account: String,
        /// Site name
        site: String,
        /// New password value (omit for interactive prompt)
        password: Option<String>,
    },

    /// Delete one password record
    Delete {
        /// Account name
        account: String,
        /// Site name
        site: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List every record in the vault
    List,

    /// Search records by account, site, or password
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },

    /// Delete every record in the vault
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the key/data file paths: CLI flag > `.passvault.toml` > default.
pub fn resolve_paths(cli: &Cli) -> Result<(PathBuf, PathBuf)> {
    let cwd = std::env::current_dir()?;
    let settings = Settings::load(&cwd)?;

    let key_path = match &cli.key_file {
        Some(p) => cwd.join(p),
        None => settings.key_path(&cwd),
    };
    let data_path = match &cli.data_file {
        Some(p) => cwd.join(p),
        None => settings.data_path(&cwd),
    };

    Ok((key_path, data_path))
}

/// Open the vault store at the resolved paths.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    let (key_path, data_path) = resolve_paths(cli)?;
    VaultStore::open(&key_path, &data_path)
}

/// Get a password value from the argument, piped stdin, or a hidden prompt.
///
/// Returns `Zeroizing<String>` so the value is wiped from memory on drop.
pub fn read_password_value(arg: Option<&str>, prompt: &str) -> Result<Zeroizing<String>> {
    // Source 1: Inline value on the command line.
    if let Some(v) = arg {
        output::warning("Password provided on command line — it may appear in shell history.");
        return Ok(Zeroizing::new(v.to_string()));
    }

    // Source 2: Piped input (stdin is not a terminal).
    if !io::stdin().is_terminal() {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(Zeroizing::new(buf.trim_end().to_string()));
    }

    // Source 3: Interactive hidden prompt (default).
    let pw = dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Reject empty values at the command boundary.
///
/// The store itself accepts empty strings; emptiness is a
/// presentation-layer rule.
pub fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultError::CommandFailed(format!("{what} cannot be empty")));
    }
    Ok(())
}
