//! Error types for credential-core

use thiserror::Error;

/// Result type alias for credential operations
pub type Result<T> = std::result::Result<T, WalletError>;

/// Wallet error types
///
/// Every variant aborts the enclosing get/store/erase operation. None of them
/// ever reaches the protocol caller; the helper binary reports them as
/// diagnostics only.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("no such folder: {0}")]
    NoSuchFolder(String),

    #[error("no username found for {0:?}")]
    UsernameNotFound(String),

    #[error("credentials not found")]
    CredentialNotFound,

    #[error("couldn't open wallet {wallet}: {reason}")]
    WalletUnavailable { wallet: String, reason: String },

    #[error("couldn't open folder {0}")]
    FolderUnavailable(String),

    #[error("couldn't create folder {0}")]
    FolderCreation(String),

    #[error("no username specified")]
    MissingUsername,

    #[error("no password specified")]
    MissingPassword,

    #[error("backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl WalletError {
    /// True for expected outcomes (nothing stored, nothing to do) as opposed
    /// to backend failures or bad input
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            WalletError::NoSuchFolder(_)
                | WalletError::UsernameNotFound(_)
                | WalletError::CredentialNotFound
        )
    }
}

impl From<keyring::Error> for WalletError {
    fn from(err: keyring::Error) -> Self {
        WalletError::Backend(err.to_string())
    }
}
