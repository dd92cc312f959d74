//! OS Keychain storage backend
//!
//! Uses the system keychain through the `keyring` crate:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//!
//! The keychain has no notion of wallets or folders, so a `(wallet, folder)`
//! pair becomes the keyring service name `wallet/folder` and store keys become
//! keyring user names. A folder exists once its marker entry has been written.

use keyring::Entry;
use tracing::{debug, warn};

use super::traits::{SecretStore, WalletHandle};
use crate::error::{Result, WalletError};

/// Keyring user name of the folder marker entry.
///
/// Composed store keys are empty or end in `://`, `@` or `/`, so they can
/// never collide with this name. An empty key is passed to the keychain as an
/// empty user name, which some platforms reject; that surfaces as a backend
/// error on the write or delete and is only logged.
const FOLDER_MARKER: &str = ".git-credential-wallet";

/// OS Keychain storage backend
#[derive(Debug, Default, Clone, Copy)]
pub struct KeychainStore;

impl KeychainStore {
    /// Create a new keychain store
    pub fn new() -> Self {
        Self
    }
}

fn service_name(wallet: &str, folder: &str) -> String {
    format!("{}/{}", wallet, folder)
}

fn entry(wallet: &str, folder: &str, key: &str) -> Result<Entry> {
    Ok(Entry::new(&service_name(wallet, folder), key)?)
}

/// Look up an entry, mapping `NoEntry` to `Ok(None)`
fn lookup(wallet: &str, folder: &str, key: &str) -> Result<Option<String>> {
    match entry(wallet, folder, key)?.get_password() {
        Ok(value) => Ok(Some(value)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn exists(wallet: &str, folder: &str, key: &str) -> bool {
    match lookup(wallet, folder, key) {
        Ok(value) => value.is_some(),
        Err(e) => {
            warn!("Keychain lookup failed: {}", e);
            false
        }
    }
}

impl SecretStore for KeychainStore {
    fn folder_exists(&self, wallet: &str, folder: &str) -> bool {
        exists(wallet, folder, FOLDER_MARKER)
    }

    fn key_exists(&self, wallet: &str, folder: &str, key: &str) -> bool {
        exists(wallet, folder, key)
    }

    fn open(&self, wallet: &str) -> Result<Box<dyn WalletHandle + '_>> {
        // Probe the platform store so an unreachable keychain fails here and
        // not halfway through an operation.
        match Entry::new(wallet, FOLDER_MARKER).and_then(|probe| probe.get_password()) {
            Ok(_) | Err(keyring::Error::NoEntry) => {}
            Err(e) => {
                return Err(WalletError::WalletUnavailable {
                    wallet: wallet.to_string(),
                    reason: e.to_string(),
                })
            }
        }

        debug!("Opened keychain wallet: {}", wallet);
        Ok(Box::new(KeychainWallet {
            wallet: wallet.to_string(),
            folder: None,
        }))
    }

    fn backend_name(&self) -> &'static str {
        #[cfg(target_os = "macos")]
        return "macOS Keychain";

        #[cfg(target_os = "windows")]
        return "Windows Credential Manager";

        #[cfg(target_os = "linux")]
        return "Linux Secret Service";

        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        return "System Keychain";
    }
}

/// Open keychain wallet
struct KeychainWallet {
    wallet: String,
    folder: Option<String>,
}

impl KeychainWallet {
    fn selected(&self) -> Result<&str> {
        self.folder
            .as_deref()
            .ok_or_else(|| WalletError::FolderUnavailable("(none selected)".to_string()))
    }
}

impl WalletHandle for KeychainWallet {
    fn has_folder(&self, folder: &str) -> bool {
        exists(&self.wallet, folder, FOLDER_MARKER)
    }

    fn create_folder(&mut self, folder: &str) -> Result<()> {
        if self.has_folder(folder) {
            return Ok(());
        }

        entry(&self.wallet, folder, FOLDER_MARKER)?
            .set_password(folder)
            .map_err(|e| {
                warn!("Couldn't write folder marker: {}", e);
                WalletError::FolderCreation(folder.to_string())
            })?;

        debug!("Created keychain folder: {}", service_name(&self.wallet, folder));
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
        lookup(&self.wallet, self.selected()?, key)
    }

    fn write_value(&mut self, key: &str, value: &str) -> Result<()> {
        entry(&self.wallet, self.selected()?, key)?.set_password(value)?;
        debug!("Stored key in keychain: {}", key);
        Ok(())
    }

    fn delete_value(&mut self, key: &str) -> Result<()> {
        match entry(&self.wallet, self.selected()?, key)?.delete_password() {
            Ok(()) => {
                debug!("Deleted key from keychain: {}", key);
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Err(WalletError::CredentialNotFound),
            Err(e) => Err(e.into()),
        }
    }
}

impl Drop for KeychainWallet {
    fn drop(&mut self) {
        debug!("Closed keychain wallet: {}", self.wallet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_name_joins_wallet_and_folder() {
        assert_eq!(service_name("kdewallet", "git"), "kdewallet/git");
    }

    #[test]
    fn test_marker_cannot_collide_with_composed_keys() {
        for suffix in ["://", "@", "/"] {
            assert!(!FOLDER_MARKER.ends_with(suffix));
        }
        assert!(!FOLDER_MARKER.is_empty());
    }

    #[test]
    fn test_hostless_request_yields_empty_key_distinct_from_marker() {
        use crate::credential::{compose_discovery_key, Credential};

        let key = compose_discovery_key(&Credential::default().with_username("alice"));
        assert_eq!(key, "");
        assert_ne!(key, FOLDER_MARKER);
    }

    #[test]
    fn test_unselected_wallet_rejects_entry_access() {
        let wallet = KeychainWallet {
            wallet: "test".to_string(),
            folder: None,
        };

        assert!(matches!(
            wallet.read_value("https://example.com/"),
            Err(WalletError::FolderUnavailable(_))
        ));
    }

    #[test]
    fn test_backend_name() {
        assert!(!KeychainStore::new().backend_name().is_empty());
    }
}
