//! Helper settings
//!
//! Non-sensitive configuration stored in a plain JSON file. Every value has a
//! default, so the file is optional.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;

/// Default wallet name (KWallet's local wallet)
pub const DEFAULT_WALLET: &str = "kdewallet";

/// Default folder inside the wallet
pub const DEFAULT_FOLDER: &str = "git-credential-wallet";

/// Name of the settings file inside the config directory
const SETTINGS_FILE: &str = "settings.json";

/// Identifies the wallet and folder credentials live in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSettings {
    /// Wallet (store) name
    pub wallet: String,
    /// Folder inside the wallet
    pub folder: String,
}

impl WalletSettings {
    pub fn new(wallet: &str, folder: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            folder: folder.to_string(),
        }
    }
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self::new(DEFAULT_WALLET, DEFAULT_FOLDER)
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// System keychain
    #[default]
    Keychain,
    /// Process memory, nothing persisted
    Memory,
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "keychain" => Ok(Backend::Keychain),
            "memory" => Ok(Backend::Memory),
            other => Err(format!("unknown backend: {} (expected keychain or memory)", other)),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Keychain => f.write_str("keychain"),
            Backend::Memory => f.write_str("memory"),
        }
    }
}

/// Settings file contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Wallet name
    pub wallet: String,
    /// Folder inside the wallet
    pub folder: String,
    /// Storage backend
    pub backend: Backend,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            wallet: DEFAULT_WALLET.to_string(),
            folder: DEFAULT_FOLDER.to_string(),
            backend: Backend::default(),
        }
    }
}

impl Settings {
    /// Wallet and folder to operate on
    pub fn wallet_settings(&self) -> WalletSettings {
        WalletSettings::new(&self.wallet, &self.folder)
    }
}

/// Settings manager
pub struct SettingsManager {
    settings: Settings,
}

impl SettingsManager {
    /// Load settings from `settings_file`, falling back to defaults when the
    /// file is missing or malformed
    pub fn new(settings_file: &Path) -> Self {
        let settings = Self::load_from_file(settings_file).unwrap_or_else(|e| {
            warn!("Ignoring settings file {:?}: {}", settings_file, e);
            Settings::default()
        });

        Self { settings }
    }

    /// Default settings file location, if a config directory can be found
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "symbia-labs", "git-credential-wallet")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Load settings from file
    fn load_from_file(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)?;
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Get current settings
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Get mutable settings
    pub fn get_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_settings_default() {
        let temp_dir = TempDir::new().unwrap();
        let manager = SettingsManager::new(&temp_dir.path().join(SETTINGS_FILE));

        let settings = manager.get();
        assert_eq!(settings.wallet, "kdewallet");
        assert_eq!(settings.folder, "git-credential-wallet");
        assert_eq!(settings.backend, Backend::Keychain);
    }

    #[test]
    fn test_settings_loaded_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"wallet": "work", "backend": "memory"}"#).unwrap();

        let manager = SettingsManager::new(&path);
        assert_eq!(manager.get().wallet, "work");
        assert_eq!(manager.get().folder, DEFAULT_FOLDER);
        assert_eq!(manager.get().backend, Backend::Memory);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        let manager = SettingsManager::new(&path);
        assert_eq!(manager.get(), &Settings::default());
    }

    #[test]
    fn test_wallet_settings_follow_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = SettingsManager::new(&temp_dir.path().join(SETTINGS_FILE));
        manager.get_mut().folder = "Passwords".to_string();

        assert_eq!(
            manager.get().wallet_settings(),
            WalletSettings::new("kdewallet", "Passwords")
        );
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("keychain".parse::<Backend>(), Ok(Backend::Keychain));
        assert_eq!("memory".parse::<Backend>(), Ok(Backend::Memory));
        assert!("kwallet".parse::<Backend>().is_err());
        assert_eq!(Backend::Memory.to_string(), "memory");
    }
}
