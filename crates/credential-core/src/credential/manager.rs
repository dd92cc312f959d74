//! Credential manager for get/store/erase operations
//!
//! Each credential occupies two wallet entries:
//! - the full key (`protocol://username@host/`) maps to the password
//! - the discovery key (`protocol://host/`) maps to the username, so a request
//!   without a username can still be resolved
//!
//! The two entries are written and removed independently. A failure on one of
//! them is logged and the other is still attempted.

use tracing::{debug, info, warn};

use super::keys::{compose_discovery_key, compose_full_key};
use super::types::Credential;
use crate::error::{Result, WalletError};
use crate::settings::WalletSettings;
use crate::storage::SecretStore;

/// Credential manager
pub struct CredentialManager<'a> {
    /// Storage backend
    store: &'a dyn SecretStore,
    /// Target wallet and folder
    settings: WalletSettings,
}

impl<'a> CredentialManager<'a> {
    /// Create a new credential manager
    pub fn new(store: &'a dyn SecretStore, settings: WalletSettings) -> Self {
        Self { store, settings }
    }

    /// Wallet and folder this manager operates on
    pub fn settings(&self) -> &WalletSettings {
        &self.settings
    }

    /// Look up the password for `credential`, resolving the username first
    /// if it is missing.
    ///
    /// A missing or unreadable password is not an error: the credential is
    /// returned with the username filled in and an empty password.
    pub fn get(&self, mut credential: Credential) -> Result<Credential> {
        self.require_folder()?;

        if credential.username.is_empty() {
            credential.username = self.resolve_username(&credential)?;
        }

        let key = compose_full_key(&credential);
        credential.password.clear();
        match self.read_entry(&key) {
            Ok(Some(password)) => credential.password = password,
            Ok(None) => debug!("No password stored for {}", key),
            Err(e) => warn!("Couldn't read password: {}", e),
        }

        Ok(credential)
    }

    /// Save `credential` to the wallet, creating the folder if needed.
    ///
    /// Both the username and the password must be present.
    pub fn store(&self, credential: &Credential) -> Result<()> {
        let mut wallet = self.store.open(&self.settings.wallet)?;

        if !wallet.has_folder(&self.settings.folder) {
            wallet.create_folder(&self.settings.folder)?;
            info!("Created folder {} in wallet {}", self.settings.folder, self.settings.wallet);
        }
        wallet.select_folder(&self.settings.folder)?;

        if credential.username.is_empty() {
            return Err(WalletError::MissingUsername);
        }
        if credential.password.is_empty() {
            return Err(WalletError::MissingPassword);
        }

        let discovery_key = compose_discovery_key(credential);
        if let Err(e) = wallet.write_value(&discovery_key, &credential.username) {
            warn!("Couldn't write username for {}: {}", discovery_key, e);
        }

        let full_key = compose_full_key(credential);
        match wallet.write_value(&full_key, &credential.password) {
            Ok(()) => info!("Stored credentials for {}", full_key),
            Err(e) => warn!("Couldn't write password for {}: {}", full_key, e),
        }

        Ok(())
    }

    /// Remove `credential` from the wallet, resolving the username first if
    /// it is missing.
    pub fn erase(&self, mut credential: Credential) -> Result<()> {
        self.require_folder()?;

        if credential.username.is_empty() {
            credential.username = self.resolve_username(&credential)?;
        }

        let full_key = compose_full_key(&credential);
        if !self.store.key_exists(&self.settings.wallet, &self.settings.folder, &full_key) {
            return Err(WalletError::CredentialNotFound);
        }

        let mut wallet = self.store.open(&self.settings.wallet)?;
        wallet.select_folder(&self.settings.folder)?;

        match wallet.delete_value(&full_key) {
            Ok(()) => info!("Erased credentials for {}", full_key),
            Err(e) => warn!("Couldn't delete entry {}: {}", full_key, e),
        }

        let discovery_key = compose_discovery_key(&credential);
        if let Err(e) = wallet.delete_value(&discovery_key) {
            warn!("Couldn't delete username entry {}: {}", discovery_key, e);
        }

        Ok(())
    }

    fn require_folder(&self) -> Result<()> {
        if self.store.folder_exists(&self.settings.wallet, &self.settings.folder) {
            Ok(())
        } else {
            Err(WalletError::NoSuchFolder(self.settings.folder.clone()))
        }
    }

    /// Find the username stored under the discovery key
    fn resolve_username(&self, credential: &Credential) -> Result<String> {
        let key = compose_discovery_key(credential);
        match self.read_entry(&key)? {
            Some(username) if !username.is_empty() => {
                debug!("Resolved username for {}", key);
                Ok(username)
            }
            _ => Err(WalletError::UsernameNotFound(key)),
        }
    }

    /// Read one entry, opening the wallet only if the key exists
    fn read_entry(&self, key: &str) -> Result<Option<String>> {
        if !self.store.key_exists(&self.settings.wallet, &self.settings.folder, key) {
            return Ok(None);
        }

        let mut wallet = self.store.open(&self.settings.wallet)?;
        wallet.select_folder(&self.settings.folder)?;
        wallet.read_value(key)
    }
}
