//! Key file lifecycle.
//!
//! The vault is gated by a single 32-byte symmetric key stored raw in a
//! key file: no header, no version field, just the key material. On
//! first run the key is generated from the OS RNG and written back;
//! every later run loads the same bytes. The key never changes for the
//! lifetime of the file.

use std::fs;
use std::path::Path;

use rand::rngs::OsRng;
use rand::TryRngCore;
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// Key length in bytes (AES-256).
const KEY_LEN: usize = 32;

/// A symmetric key held in memory, zeroed on drop.
///
/// The inner bytes are whatever the key file contained. A file of the
/// wrong length is not rejected here — it surfaces later as a
/// `DecryptionFailed` when the data file is opened under it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct EncryptionKey {
    bytes: Vec<u8>,
}

impl EncryptionKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build a cipher).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Owner of the encryption key for the process lifetime.
///
/// Constructed once via `load_or_create`; the key is immutable
/// afterwards.
pub struct KeyStore {
    key: EncryptionKey,
}

impl KeyStore {
    /// Load the key from `key_path`, or generate and persist a new one
    /// if no file exists there yet.
    ///
    /// An existing but unreadable file is an I/O error. The contents of
    /// an existing file are taken as-is.
    pub fn load_or_create(key_path: &Path) -> Result<Self> {
        if key_path.exists() {
            let bytes = fs::read(key_path)?;
            debug!("loaded key from {}", key_path.display());
            return Ok(Self {
                key: EncryptionKey::from_bytes(bytes),
            });
        }

        let key = generate_key_file(key_path)?;
        info!("generated new key file at {}", key_path.display());
        Ok(Self { key })
    }

    /// Borrow the held key.
    pub fn key(&self) -> &EncryptionKey {
        &self.key
    }
}

/// Generate a fresh random key and write it to `key_path`.
///
/// The file is written with owner-only permissions on Unix.
fn generate_key_file(key_path: &Path) -> Result<EncryptionKey> {
    let mut bytes = vec![0u8; KEY_LEN];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| VaultError::KeyFile(format!("system RNG unavailable: {e}")))?;

    // Ensure the parent directory exists.
    if let Some(parent) = key_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                VaultError::KeyFile(format!("cannot create key file directory: {e}"))
            })?;
        }
    }

    fs::write(key_path, &bytes)
        .map_err(|e| VaultError::KeyFile(format!("failed to write key file: {e}")))?;

    // On Unix, restrict permissions to owner-only read/write.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(key_path, perms).map_err(|e| {
            VaultError::KeyFile(format!("failed to set key file permissions: {e}"))
        })?;
    }

    Ok(EncryptionKey::from_bytes(bytes))
}
