//! High-level vault operations used by the CLI commands.
//!
//! `VaultStore` owns the authoritative in-memory account map and keeps
//! it synchronized with the encrypted data file: every mutating
//! operation writes the full vault back to disk before returning
//! (write-through, no buffering). Reads never touch disk after the
//! initial load.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::crypto::encryption;
use crate::crypto::keystore::KeyStore;
use crate::errors::{Result, VaultError};

use super::codec::{self, Accounts};

/// The main vault handle. Create one with `VaultStore::open`, then use
/// its methods to manage records.
///
/// All mutating methods take `&mut self`, so within a process the
/// borrow rules serialize every read-check-write sequence; there is no
/// internal locking.
pub struct VaultStore {
    /// Path to the encrypted data file on disk.
    data_path: PathBuf,

    /// Owner of the encryption key (loaded or created from the key file).
    keystore: KeyStore,

    /// In-memory map of account -> site -> password.
    accounts: Accounts,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault backed by `data_path`, loading or creating the
    /// key at `key_path`.
    ///
    /// Three load outcomes, kept deliberately distinct:
    /// - no data file: start with an empty vault (a first run);
    /// - the file decrypts but does not parse: start empty, with a
    ///   warning — the old contents are unrecoverable and will be
    ///   overwritten by the next save;
    /// - the file does not decrypt: fail with `DecryptionFailed`. A
    ///   wrong or corrupt key must never look like a first run, so this
    ///   is not swallowed.
    pub fn open(key_path: &Path, data_path: &Path) -> Result<Self> {
        let keystore = KeyStore::load_or_create(key_path)?;

        let accounts = match fs::read(data_path) {
            Ok(blob) => {
                let plaintext = encryption::open(keystore.key(), &blob)?;
                match codec::decode(&plaintext) {
                    Ok(accounts) => accounts,
                    Err(e) => {
                        warn!(
                            "vault file {} decrypted but did not parse ({e}); \
                             starting with an empty vault — the previous contents \
                             will be overwritten on the next save",
                            data_path.display()
                        );
                        Accounts::new()
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("no vault file at {}; starting empty", data_path.display());
                Accounts::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            data_path: data_path.to_path_buf(),
            keystore,
            accounts,
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize the full vault, encrypt it, and replace the data file
    /// atomically.
    pub fn persist(&self) -> Result<()> {
        let plaintext = codec::encode(&self.accounts)?;
        let blob = encryption::seal(self.keystore.key(), &plaintext)?;
        codec::write_atomic(&self.data_path, &blob)
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Insert a new (account, site, password) record and save.
    ///
    /// The account entry is created lazily on first use. `add` never
    /// overwrites: an existing (account, site) pair is `EntryExists`
    /// and the stored value is left untouched — `edit` is the only
    /// update path. Empty strings are accepted here; rejecting them is
    /// the command boundary's job.
    pub fn add(&mut self, account: &str, site: &str, password: &str) -> Result<()> {
        let sites = self.accounts.entry(account.to_string()).or_default();
        if sites.contains_key(site) {
            return Err(VaultError::EntryExists {
                account: account.to_string(),
                site: site.to_string(),
            });
        }

        sites.insert(site.to_string(), password.to_string());
        self.persist()
    }

    /// All sites stored under `account`, or an empty map if the account
    /// is unknown. Never touches disk.
    pub fn get(&self, account: &str) -> BTreeMap<String, String> {
        self.accounts.get(account).cloned().unwrap_or_default()
    }

    /// Replace the password of an existing record and save.
    ///
    /// Both the account and the site must already exist; the two
    /// missing cases are reported as distinct errors.
    pub fn edit(&mut self, account: &str, site: &str, new_password: &str) -> Result<()> {
        let sites = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| VaultError::AccountNotFound(account.to_string()))?;

        let slot = sites.get_mut(site).ok_or_else(|| VaultError::SiteNotFound {
            account: account.to_string(),
            site: site.to_string(),
        })?;

        *slot = new_password.to_string();
        self.persist()
    }

    /// Remove one (account, site) record and save.
    ///
    /// The account entry is kept even when its last site is removed, so
    /// a later `get` returns an empty map rather than recreating state.
    pub fn delete(&mut self, account: &str, site: &str) -> Result<()> {
        let sites = self
            .accounts
            .get_mut(account)
            .ok_or_else(|| VaultError::AccountNotFound(account.to_string()))?;

        if sites.remove(site).is_none() {
            return Err(VaultError::SiteNotFound {
                account: account.to_string(),
                site: site.to_string(),
            });
        }

        self.persist()
    }

    /// Case-insensitive substring search over account names, site
    /// names, and passwords. An account is included whole if any of its
    /// fields matches.
    ///
    /// Returns a derived copy; the authoritative map is never modified
    /// by a read path, so the full vault is still intact afterwards.
    pub fn search(&self, query: &str) -> Accounts {
        let needle = query.to_lowercase();

        self.accounts
            .iter()
            .filter(|(account, sites)| {
                account.to_lowercase().contains(&needle)
                    || sites.iter().any(|(site, password)| {
                        site.to_lowercase().contains(&needle)
                            || password.to_lowercase().contains(&needle)
                    })
            })
            .map(|(account, sites)| (account.clone(), sites.clone()))
            .collect()
    }

    /// Empty the vault and save immediately.
    ///
    /// Clearing persists right away, like every other mutating
    /// operation.
    pub fn clear_all(&mut self) -> Result<()> {
        self.accounts.clear();
        self.persist()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Borrow the full account map (used by `list`).
    pub fn accounts(&self) -> &Accounts {
        &self.accounts
    }

    /// Total number of (account, site) records across all accounts.
    pub fn entry_count(&self) -> usize {
        self.accounts.values().map(BTreeMap::len).sum()
    }

    /// Returns the path to the encrypted data file.
    pub fn data_path(&self) -> &Path {
        &self.data_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> VaultStore {
        VaultStore::open(&dir.path().join("key.key"), &dir.path().join("passwords.vault"))
            .unwrap()
    }

    #[test]
    fn starts_empty_without_data_file() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.accounts().is_empty());
        assert_eq!(store.entry_count(), 0);
    }

    #[test]
    fn add_then_get() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("alice", "github", "hunter2").unwrap();

        let sites = store.get("alice");
        assert_eq!(sites.get("github").map(String::as_str), Some("hunter2"));
    }

    #[test]
    fn get_unknown_account_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir);
        assert!(store.get("nobody").is_empty());
    }

    #[test]
    fn add_rejects_duplicate_site() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("alice", "github", "p1").unwrap();
        let result = store.add("alice", "github", "p2");

        assert!(matches!(result, Err(VaultError::EntryExists { .. })));
        // The original value must survive the failed add.
        assert_eq!(store.get("alice").get("github").map(String::as_str), Some("p1"));
    }

    #[test]
    fn same_site_under_different_accounts_is_fine() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("alice", "github", "p1").unwrap();
        store.add("bob", "github", "p2").unwrap();

        assert_eq!(store.get("alice").get("github").map(String::as_str), Some("p1"));
        assert_eq!(store.get("bob").get("github").map(String::as_str), Some("p2"));
    }

    #[test]
    fn reload_sees_identical_vault() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("key.key");
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&key_path, &data_path).unwrap();
        store.add("alice", "github", "hunter2").unwrap();
        store.add("alice", "gitlab", "hunter3").unwrap();
        store.add("bob", "mail", "swordfish").unwrap();
        let before = store.accounts().clone();
        drop(store);

        let reloaded = VaultStore::open(&key_path, &data_path).unwrap();
        assert_eq!(reloaded.accounts(), &before);
    }

    #[test]
    fn edit_replaces_password() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("alice", "github", "old").unwrap();
        store.edit("alice", "github", "new").unwrap();

        assert_eq!(store.get("alice").get("github").map(String::as_str), Some("new"));
    }

    #[test]
    fn edit_distinguishes_missing_account_from_missing_site() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("alice", "github", "p1").unwrap();

        assert!(matches!(
            store.edit("bob", "github", "x"),
            Err(VaultError::AccountNotFound(_))
        ));
        assert!(matches!(
            store.edit("alice", "gitlab", "x"),
            Err(VaultError::SiteNotFound { .. })
        ));
    }

    #[test]
    fn edit_on_empty_vault_is_account_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        assert!(matches!(
            store.edit("bob", "x", "new"),
            Err(VaultError::AccountNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_record_but_keeps_account() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("a", "s", "p").unwrap();
        store.delete("a", "s").unwrap();

        assert!(store.get("a").is_empty());
        // The account key itself survives the delete.
        assert!(store.accounts().contains_key("a"));
    }

    #[test]
    fn delete_distinguishes_missing_account_from_missing_site() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("alice", "github", "p1").unwrap();

        assert!(matches!(
            store.delete("bob", "github"),
            Err(VaultError::AccountNotFound(_))
        ));
        assert!(matches!(
            store.delete("alice", "gitlab"),
            Err(VaultError::SiteNotFound { .. })
        ));
    }

    #[test]
    fn search_matches_account_site_and_password_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        store.add("alice", "github", "p1").unwrap();
        store.add("bob", "mail", "github-token").unwrap();
        store.add("carol", "bank", "p3").unwrap();

        // "github" appears in a site name for alice and a password for bob.
        let matches = store.search("github");
        assert!(matches.contains_key("alice"));
        assert!(matches.contains_key("bob"));
        assert!(!matches.contains_key("carol"));

        // Account-name match includes the whole entry.
        let matches = store.search("carol");
        assert_eq!(matches.get("carol").unwrap().len(), 1);
    }

    #[test]
    fn search_is_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("Alice", "GitHub", "p1").unwrap();

        assert_eq!(store.search("github").len(), 1);
        assert_eq!(store.search("ALICE").len(), 1);
    }

    #[test]
    fn search_does_not_mutate_the_vault() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("key.key");
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&key_path, &data_path).unwrap();
        store.add("alice", "github", "p1").unwrap();
        store.add("bob", "mail", "p2").unwrap();
        store.add("carol", "bank", "p3").unwrap();

        let matches = store.search("github");
        assert_eq!(matches.len(), 1);

        // Unmatched accounts are still fully present in the store...
        assert_eq!(store.get("bob").get("mail").map(String::as_str), Some("p2"));
        assert_eq!(store.entry_count(), 3);

        // ...and on disk after a reload.
        drop(store);
        let reloaded = VaultStore::open(&key_path, &data_path).unwrap();
        assert_eq!(reloaded.entry_count(), 3);
    }

    #[test]
    fn clear_all_empties_and_persists() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("key.key");
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&key_path, &data_path).unwrap();
        store.add("alice", "github", "p1").unwrap();
        store.clear_all().unwrap();
        assert!(store.accounts().is_empty());
        drop(store);

        let reloaded = VaultStore::open(&key_path, &data_path).unwrap();
        assert!(reloaded.accounts().is_empty());
    }

    #[test]
    fn wrong_key_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&dir.path().join("k1.key"), &data_path).unwrap();
        store.add("alice", "github", "p1").unwrap();
        drop(store);

        // A different key file against the same data must not silently
        // produce an empty vault.
        let result = VaultStore::open(&dir.path().join("k2.key"), &data_path);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn corrupted_key_file_fails_loudly() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("key.key");
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&key_path, &data_path).unwrap();
        store.add("alice", "github", "p1").unwrap();
        drop(store);

        fs::write(&key_path, [0u8; 5]).unwrap();
        let result = VaultStore::open(&key_path, &data_path);
        assert!(matches!(result, Err(VaultError::DecryptionFailed)));
    }

    #[test]
    fn malformed_plaintext_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();
        let key_path = dir.path().join("key.key");
        let data_path = dir.path().join("passwords.vault");

        // Write a data file that decrypts fine but is not a vault.
        let keystore = KeyStore::load_or_create(&key_path).unwrap();
        let blob = encryption::seal(keystore.key(), b"not a vault at all").unwrap();
        fs::write(&data_path, blob).unwrap();

        let store = VaultStore::open(&key_path, &data_path).unwrap();
        assert!(store.accounts().is_empty());
    }

    #[test]
    fn data_file_is_not_plaintext() {
        let dir = TempDir::new().unwrap();
        let data_path = dir.path().join("passwords.vault");

        let mut store = VaultStore::open(&dir.path().join("key.key"), &data_path).unwrap();
        store.add("alice", "github", "hunter2").unwrap();
        drop(store);

        let raw = fs::read(&data_path).unwrap();
        let haystack = String::from_utf8_lossy(&raw);
        assert!(!haystack.contains("hunter2"));
        assert!(!haystack.contains("alice"));
    }
}
