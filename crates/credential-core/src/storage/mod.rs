//! Storage backends for wallet access
//!
//! This module provides two storage backends:
//! 1. OS Keychain (the system secret store)
//! 2. In-memory (tests and dry runs)

mod keychain;
mod memory;
mod traits;

pub use keychain::KeychainStore;
pub use memory::MemoryStore;
pub use traits::{SecretStore, WalletHandle};
