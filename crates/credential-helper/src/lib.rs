//! # credential-helper
//!
//! git credential helper front end for git-credential-wallet: argument
//! parsing, settings resolution, and dispatch of one get/store/erase request
//! read from stdin.

pub mod cli;
mod helper;

pub use cli::Args;
pub use helper::{CredentialHelper, Operation};
