//! Credential type definitions

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A credential exchanged with git over the helper protocol.
///
/// Every field is optional; an empty string means "unknown". All fields are
/// zeroed when the record is dropped.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    /// Protocol, e.g. `https`
    pub protocol: String,
    /// Host name, possibly with a port
    pub host: String,
    /// User name
    pub username: String,
    /// Secret value
    pub password: String,
}

impl Credential {
    /// Create a credential for a protocol and host, with no user yet
    pub fn new(protocol: &str, host: &str) -> Self {
        Self {
            protocol: protocol.to_string(),
            host: host.to_string(),
            username: String::new(),
            password: String::new(),
        }
    }

    /// Builder-style setter for the username
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    /// Builder-style setter for the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        self.protocol.is_empty()
            && self.host.is_empty()
            && self.username.is_empty()
            && self.password.is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "[REDACTED]" };
        f.debug_struct("Credential")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}
