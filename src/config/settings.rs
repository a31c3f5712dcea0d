use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// The two file paths are the only configuration surface. Every field
/// has a default so passvault works out-of-the-box without any config
/// file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Key file path, relative to the working directory.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// Encrypted data file path, relative to the working directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_key_file() -> String {
    "key.key".to_string()
}

fn default_data_file() -> String {
    "passwords.vault".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_file: default_key_file(),
            data_file: default_data_file(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned. If the file
    /// exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to the key file.
    pub fn key_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.key_file)
    }

    /// Build the full path to the encrypted data file.
    pub fn data_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
