//! Credentials, their store keys, and the helper line protocol

mod keys;
mod manager;
mod protocol;
mod types;

pub use keys::{compose_discovery_key, compose_full_key};
pub use manager::CredentialManager;
pub use protocol::{read_credential, write_credential, Field};
pub use types::Credential;
