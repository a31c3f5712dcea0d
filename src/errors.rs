use thiserror::Error;

/// All errors that can occur in passvault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong key or corrupted vault file")]
    DecryptionFailed,

    // --- Store errors ---
    #[error("Vault data is malformed: {0}")]
    MalformedData(String),

    #[error("Account '{0}' not found in the vault")]
    AccountNotFound(String),

    #[error("Site '{site}' not found under account '{account}'")]
    SiteNotFound { account: String, site: String },

    #[error("Site '{site}' already exists under account '{account}' (use `edit` to change it)")]
    EntryExists { account: String, site: String },

    // --- Key file errors ---
    #[error("Key file error: {0}")]
    KeyFile(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for passvault results.
pub type Result<T> = std::result::Result<T, VaultError>;
