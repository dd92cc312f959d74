//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use credential_core::{Backend, Settings, SettingsManager};

/// git credential helper that keeps credentials in the system wallet
#[derive(Parser, Debug)]
#[command(name = "git-credential-wallet")]
#[command(author = "Symbia Labs")]
#[command(version)]
#[command(about = "git credential helper backed by the system wallet")]
pub struct Args {
    /// Operation requested by git: get, store or erase. Anything else is ignored.
    pub operation: String,

    /// Wallet to keep credentials in
    #[arg(long, env = "GIT_CREDENTIAL_WALLET_WALLET")]
    pub wallet: Option<String>,

    /// Folder inside the wallet
    #[arg(long, env = "GIT_CREDENTIAL_WALLET_FOLDER")]
    pub folder: Option<String>,

    /// Storage backend: keychain, or memory for a dry run (memory keeps
    /// nothing between runs, so store is discarded and get finds nothing)
    #[arg(long, env = "GIT_CREDENTIAL_WALLET_BACKEND")]
    pub backend: Option<Backend>,

    /// Settings file (defaults to the user config directory)
    #[arg(long, env = "GIT_CREDENTIAL_WALLET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log diagnostics at debug level
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Settings file values with command-line overrides applied
    pub fn settings(&self) -> Settings {
        let Some(path) = self.config.clone().or_else(SettingsManager::default_path) else {
            let mut settings = Settings::default();
            self.apply_overrides(&mut settings);
            return settings;
        };

        let mut manager = SettingsManager::new(&path);
        self.apply_overrides(manager.get_mut());
        manager.get().clone()
    }

    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(wallet) = &self.wallet {
            settings.wallet = wallet.clone();
        }
        if let Some(folder) = &self.folder {
            settings.folder = folder.clone();
        }
        if let Some(backend) = self.backend {
            settings.backend = backend;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("git-credential-wallet").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_parse_operation_and_flags() {
        let args = parse(&["--wallet", "work", "--backend", "memory", "--debug", "get"]);

        assert_eq!(args.operation, "get");
        assert_eq!(args.wallet.as_deref(), Some("work"));
        assert_eq!(args.backend, Some(Backend::Memory));
        assert!(args.debug);
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let result = Args::try_parse_from(["git-credential-wallet", "--backend", "vault", "get"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_backend_help_says_dry_run() {
        use clap::CommandFactory;

        let command = Args::command();
        let backend = command
            .get_arguments()
            .find(|arg| arg.get_id() == "backend")
            .unwrap();

        assert!(backend.get_help().unwrap().to_string().contains("dry run"));
    }

    #[test]
    fn test_operation_required() {
        assert!(Args::try_parse_from(["git-credential-wallet"]).is_err());
    }

    #[test]
    fn test_settings_file_with_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"wallet": "work", "folder": "Passwords"}"#).unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let args = parse(&["--config", &path_arg, "--folder", "git", "store"]);
        let settings = args.settings();

        assert_eq!(settings.wallet, "work");
        assert_eq!(settings.folder, "git");
        assert_eq!(settings.backend, Backend::Keychain);
    }

    #[test]
    fn test_backend_override_beats_settings_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"backend": "memory"}"#).unwrap();

        let path_arg = path.to_string_lossy().to_string();
        let settings = parse(&["--config", &path_arg, "--backend", "keychain", "get"]).settings();

        assert_eq!(settings.backend, Backend::Keychain);
        assert_eq!(settings.wallet, "kdewallet");
    }

    #[test]
    fn test_missing_settings_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path_arg = temp_dir.path().join("absent.json").to_string_lossy().to_string();

        let settings = parse(&["--config", &path_arg, "erase"]).settings();
        assert_eq!(settings, Settings::default());
    }
}
