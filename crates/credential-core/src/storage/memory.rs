//! In-memory storage backend
//!
//! Holds wallets in process memory. Nothing is persisted, so this backend is
//! meant for tests and dry runs of the helper.

use std::cell::RefCell;
use std::collections::BTreeMap;

use tracing::debug;

use super::traits::{SecretStore, WalletHandle};
use crate::error::{Result, WalletError};

type Folder = BTreeMap<String, String>;
type Wallet = BTreeMap<String, Folder>;

/// In-memory storage backend
#[derive(Debug)]
pub struct MemoryStore {
    wallets: RefCell<BTreeMap<String, Wallet>>,
    /// Whether `open` creates wallets that don't exist yet
    create_wallets: bool,
}

impl MemoryStore {
    /// Create an empty store that creates wallets on first open
    pub fn new() -> Self {
        Self {
            wallets: RefCell::new(BTreeMap::new()),
            create_wallets: true,
        }
    }

    /// Create an empty store where only wallets added with
    /// [`MemoryStore::add_wallet`] can be opened
    pub fn strict() -> Self {
        Self {
            create_wallets: false,
            ..Self::new()
        }
    }

    /// Add an empty wallet
    pub fn add_wallet(&self, wallet: &str) {
        self.wallets.borrow_mut().entry(wallet.to_string()).or_default();
    }

    /// Seed an entry, creating the wallet and folder as needed
    pub fn insert(&self, wallet: &str, folder: &str, key: &str, value: &str) {
        self.wallets
            .borrow_mut()
            .entry(wallet.to_string())
            .or_default()
            .entry(folder.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    /// Read an entry directly, bypassing any handle
    pub fn value(&self, wallet: &str, folder: &str, key: &str) -> Option<String> {
        self.wallets
            .borrow()
            .get(wallet)
            .and_then(|w| w.get(folder))
            .and_then(|f| f.get(key))
            .cloned()
    }

    /// Number of entries in a folder
    pub fn len(&self, wallet: &str, folder: &str) -> usize {
        self.wallets
            .borrow()
            .get(wallet)
            .and_then(|w| w.get(folder))
            .map_or(0, BTreeMap::len)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for MemoryStore {
    fn folder_exists(&self, wallet: &str, folder: &str) -> bool {
        self.wallets
            .borrow()
            .get(wallet)
            .is_some_and(|w| w.contains_key(folder))
    }

    fn key_exists(&self, wallet: &str, folder: &str, key: &str) -> bool {
        self.value(wallet, folder, key).is_some()
    }

    fn open(&self, wallet: &str) -> Result<Box<dyn WalletHandle + '_>> {
        let known = self.wallets.borrow().contains_key(wallet);
        if !known {
            if !self.create_wallets {
                return Err(WalletError::WalletUnavailable {
                    wallet: wallet.to_string(),
                    reason: "no such wallet".to_string(),
                });
            }
            self.add_wallet(wallet);
            debug!("Created in-memory wallet: {}", wallet);
        }

        Ok(Box::new(MemoryWallet {
            store: self,
            wallet: wallet.to_string(),
            folder: None,
        }))
    }

    fn backend_name(&self) -> &'static str {
        "In-Memory Storage"
    }
}

/// Open in-memory wallet
struct MemoryWallet<'a> {
    store: &'a MemoryStore,
    wallet: String,
    folder: Option<String>,
}

impl MemoryWallet<'_> {
    /// Run `f` against the selected folder
    fn with_folder<T>(&self, f: impl FnOnce(&mut Folder) -> T) -> Result<T> {
        let folder = self
            .folder
            .as_deref()
            .ok_or_else(|| WalletError::FolderUnavailable("(none selected)".to_string()))?;

        let mut wallets = self.store.wallets.borrow_mut();
        let entries = wallets
            .get_mut(&self.wallet)
            .and_then(|w| w.get_mut(folder))
            .ok_or_else(|| WalletError::FolderUnavailable(folder.to_string()))?;

        Ok(f(entries))
    }
}

impl WalletHandle for MemoryWallet<'_> {
    fn has_folder(&self, folder: &str) -> bool {
        self.store.folder_exists(&self.wallet, folder)
    }

    fn create_folder(&mut self, folder: &str) -> Result<()> {
        let mut wallets = self.store.wallets.borrow_mut();
        let wallet = wallets
            .get_mut(&self.wallet)
            .ok_or_else(|| WalletError::FolderCreation(folder.to_string()))?;
        wallet.entry(folder.to_string()).or_default();
        Ok(())
    }

    fn select_folder(&mut self, folder: &str) -> Result<()> {
        if !self.has_folder(folder) {
            return Err(WalletError::FolderUnavailable(folder.to_string()));
        }
        self.folder = Some(folder.to_string());
        Ok(())
    }

    fn read_value(&self, key: &str) -> Result<Option<String>> {
        self.with_folder(|entries| entries.get(key).cloned())
    }

    fn write_value(&mut self, key: &str, value: &str) -> Result<()> {
        self.with_folder(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete_value(&mut self, key: &str) -> Result<()> {
        self.with_folder(|entries| entries.remove(key))?
            .map(|_| ())
            .ok_or(WalletError::CredentialNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_wallet_on_demand() {
        let store = MemoryStore::new();
        assert!(store.open("kdewallet").is_ok());
        assert!(!store.folder_exists("kdewallet", "git"));
    }

    #[test]
    fn test_strict_store_rejects_unknown_wallet() {
        let store = MemoryStore::strict();
        assert!(matches!(
            store.open("kdewallet"),
            Err(WalletError::WalletUnavailable { .. })
        ));

        store.add_wallet("kdewallet");
        assert!(store.open("kdewallet").is_ok());
    }

    #[test]
    fn test_folder_lifecycle() {
        let store = MemoryStore::new();
        let mut wallet = store.open("w").unwrap();

        assert!(wallet.select_folder("git").is_err());
        wallet.create_folder("git").unwrap();
        wallet.create_folder("git").unwrap();
        wallet.select_folder("git").unwrap();

        assert!(store.folder_exists("w", "git"));
    }

    #[test]
    fn test_read_write_delete() {
        let store = MemoryStore::new();
        let mut wallet = store.open("w").unwrap();
        wallet.create_folder("git").unwrap();
        wallet.select_folder("git").unwrap();

        assert_eq!(wallet.read_value("k").unwrap(), None);

        wallet.write_value("k", "v").unwrap();
        assert_eq!(wallet.read_value("k").unwrap(), Some("v".to_string()));
        assert!(store.key_exists("w", "git", "k"));

        wallet.delete_value("k").unwrap();
        assert!(!store.key_exists("w", "git", "k"));
        assert!(matches!(
            wallet.delete_value("k"),
            Err(WalletError::CredentialNotFound)
        ));
    }

    #[test]
    fn test_entry_access_requires_selected_folder() {
        let store = MemoryStore::new();
        let mut wallet = store.open("w").unwrap();

        assert!(wallet.read_value("k").is_err());
        assert!(wallet.write_value("k", "v").is_err());
        assert_eq!(store.len("w", "git"), 0);
    }

    #[test]
    fn test_insert_seeds_entries() {
        let store = MemoryStore::new();
        store.insert("w", "git", "k", "v");

        assert!(store.folder_exists("w", "git"));
        assert_eq!(store.value("w", "git", "k"), Some("v".to_string()));
        assert_eq!(store.len("w", "git"), 1);
    }
}
