//! Storage trait definitions

use crate::error::Result;

/// A secure store made of named wallets, each holding folders of string
/// key/value entries.
///
/// Implementations do not cache anything between calls. Callers open a
/// fresh [`WalletHandle`] for each operation and drop it when done.
pub trait SecretStore {
    /// Check whether `folder` exists in `wallet` without opening it
    fn folder_exists(&self, wallet: &str, folder: &str) -> bool;

    /// Check whether `key` exists in `folder` of `wallet` without opening it
    fn key_exists(&self, wallet: &str, folder: &str, key: &str) -> bool;

    /// Open a wallet by name
    fn open(&self, wallet: &str) -> Result<Box<dyn WalletHandle + '_>>;

    /// Get a human-readable name for this storage backend
    fn backend_name(&self) -> &'static str;
}

/// An open wallet. Released when dropped.
pub trait WalletHandle {
    /// Check if the wallet contains `folder`
    fn has_folder(&self, folder: &str) -> bool;

    /// Create `folder`; succeeds if it already exists
    fn create_folder(&mut self, folder: &str) -> Result<()>;

    /// Make `folder` the target of subsequent entry operations
    fn select_folder(&mut self, folder: &str) -> Result<()>;

    /// Read an entry from the selected folder; `Ok(None)` when absent
    fn read_value(&self, key: &str) -> Result<Option<String>>;

    /// Write an entry into the selected folder
    fn write_value(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove an entry from the selected folder
    fn delete_value(&mut self, key: &str) -> Result<()>;
}
