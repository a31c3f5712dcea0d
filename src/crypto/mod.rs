//! Crypto module — key lifecycle and authenticated encryption.
//!
//! This module provides:
//! - `KeyStore`, which loads or creates the key file (`keystore`)
//! - AES-256-GCM seal/open for the vault data file (`encryption`)

pub mod encryption;
pub mod keystore;

// Re-export the most commonly used items.
pub use keystore::{EncryptionKey, KeyStore};
