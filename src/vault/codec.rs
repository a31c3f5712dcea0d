//! Vault snapshot encoding and atomic file replacement.
//!
//! The data file on disk holds `seal(key, encode(accounts))` — there is
//! no magic, header, or version field. A schema change therefore shows
//! up as a parse failure on load rather than a version mismatch.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::{Result, VaultError};

/// The full vault: account name -> site -> password.
///
/// `BTreeMap` keeps the serialized form deterministic, so identical
/// vaults always encode to identical plaintext bytes.
pub type Accounts = BTreeMap<String, BTreeMap<String, String>>;

/// Serialize the vault to its canonical JSON form.
pub fn encode(accounts: &Accounts) -> Result<Vec<u8>> {
    serde_json::to_vec(accounts).map_err(|e| VaultError::Serialization(format!("vault: {e}")))
}

/// Parse decrypted bytes back into the vault map.
pub fn decode(bytes: &[u8]) -> Result<Accounts> {
    serde_json::from_slice(bytes).map_err(|e| VaultError::MalformedData(format!("vault JSON: {e}")))
}

/// Replace `path` with `contents` atomically.
///
/// Writes to a temp file in the same directory, then renames it over
/// the target. Rename within one directory is atomic on the same
/// filesystem, so a crash mid-write leaves either the old file or the
/// new one — never a half-written vault.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, contents)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}
