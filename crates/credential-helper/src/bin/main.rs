//! git-credential-wallet - git credential helper backed by the system wallet
//!
//! git runs the helper once per request, e.g. `git-credential-wallet get`,
//! with the request on stdin. Only the protocol response goes to stdout;
//! diagnostics are logged to stderr.

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use credential_core::{Backend, CredentialManager, KeychainStore, MemoryStore, SecretStore};
use credential_helper::{Args, CredentialHelper, Operation};

/// Environment variable holding the log filter
const LOG_ENV: &str = "GIT_CREDENTIAL_WALLET_LOG";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr; stdout carries the protocol
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let Some(operation) = Operation::parse(&args.operation) else {
        debug!("Ignoring unsupported operation: {}", args.operation);
        return Ok(());
    };

    let settings = args.settings();
    let store: Box<dyn SecretStore> = match settings.backend {
        Backend::Keychain => Box::new(KeychainStore::new()),
        // Dry run: nothing outlives this process
        Backend::Memory => Box::new(MemoryStore::new()),
    };
    debug!("Using {} backend", store.backend_name());

    let manager = CredentialManager::new(store.as_ref(), settings.wallet_settings());
    CredentialHelper::new(manager)
        .run(operation, io::stdin().lock(), io::stdout().lock())
        .with_context(|| format!("{} request failed", operation.name()))?;

    Ok(())
}
