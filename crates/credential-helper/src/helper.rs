//! Request dispatch for the credential helper

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use credential_core::{read_credential, write_credential, CredentialManager, WalletError};

/// Operation requested by git
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Look up a credential
    Get,
    /// Save a credential git has just used successfully
    Store,
    /// Forget a credential git has just seen rejected
    Erase,
}

impl Operation {
    /// Parse an operation name; `None` for names this helper doesn't handle
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "get" => Some(Operation::Get),
            "store" => Some(Operation::Store),
            "erase" => Some(Operation::Erase),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::Get => "get",
            Operation::Store => "store",
            Operation::Erase => "erase",
        }
    }
}

/// Runs one helper request against a credential manager
pub struct CredentialHelper<'a> {
    manager: CredentialManager<'a>,
}

impl<'a> CredentialHelper<'a> {
    /// Create a new helper
    pub fn new(manager: CredentialManager<'a>) -> Self {
        Self { manager }
    }

    /// Read a request from `input`, run `operation`, and write the `get`
    /// response to `output`.
    ///
    /// Wallet failures are reported as diagnostics only. The returned error
    /// covers protocol I/O.
    pub fn run<R: BufRead, W: Write>(
        &self,
        operation: Operation,
        input: R,
        output: W,
    ) -> std::io::Result<()> {
        let credential = read_credential(input)?;
        debug!(
            "{} {}://{} in {}/{}",
            operation.name(),
            credential.protocol,
            credential.host,
            self.manager.settings().wallet,
            self.manager.settings().folder
        );

        match operation {
            Operation::Get => match self.manager.get(credential) {
                Ok(found) => write_credential(output, &found)?,
                Err(e) => report(operation, &e),
            },
            Operation::Store => {
                if let Err(e) = self.manager.store(&credential) {
                    report(operation, &e);
                }
            }
            Operation::Erase => {
                if let Err(e) = self.manager.erase(credential) {
                    report(operation, &e);
                }
            }
        }

        Ok(())
    }
}

fn report(operation: Operation, err: &WalletError) {
    if err.is_not_found() {
        debug!("{}: {}", operation.name(), err);
    } else {
        warn!("{} failed: {}", operation.name(), err);
    }
}
