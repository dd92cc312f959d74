//! # credential-core
//!
//! Core of git-credential-wallet:
//! - Credential record with zeroize-on-drop fields
//! - Store key composition (full key and username-discovery key)
//! - Wallet storage trait with OS keychain and in-memory backends
//! - get/store/erase operations over a wallet folder
//! - git credential helper line protocol

pub mod credential;
pub mod error;
pub mod settings;
pub mod storage;

pub use credential::{
    compose_discovery_key, compose_full_key, read_credential, write_credential, Credential,
    CredentialManager, Field,
};
pub use error::{Result, WalletError};
pub use settings::{Backend, Settings, SettingsManager, WalletSettings};
pub use storage::{KeychainStore, MemoryStore, SecretStore, WalletHandle};
