//! git credential helper line protocol
//!
//! Requests are newline-separated `key=value` lines read until EOF. Only the
//! fields in [`Field`] are understood; anything else is skipped. Responses
//! carry the username and password, and omit empty values.

use std::io::{BufRead, Write};

use tracing::debug;
use zeroize::Zeroize;

use super::types::Credential;

/// Named credential field, mapped explicitly to its protocol key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Protocol,
    Host,
    Username,
    Password,
}

impl Field {
    /// Every field the protocol understands
    pub const ALL: [Field; 4] = [Field::Protocol, Field::Host, Field::Username, Field::Password];

    /// Fields written back for a `get` response, in output order
    pub const RESPONSE: [Field; 2] = [Field::Username, Field::Password];

    /// Protocol key for this field
    pub fn name(self) -> &'static str {
        match self {
            Field::Protocol => "protocol",
            Field::Host => "host",
            Field::Username => "username",
            Field::Password => "password",
        }
    }

    /// Look up a field by protocol key (exact, case-sensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    fn value(self, credential: &Credential) -> &str {
        match self {
            Field::Protocol => &credential.protocol,
            Field::Host => &credential.host,
            Field::Username => &credential.username,
            Field::Password => &credential.password,
        }
    }

    fn value_mut(self, credential: &mut Credential) -> &mut String {
        match self {
            Field::Protocol => &mut credential.protocol,
            Field::Host => &mut credential.host,
            Field::Username => &mut credential.username,
            Field::Password => &mut credential.password,
        }
    }
}

/// Decode a credential from `key=value` lines until EOF.
///
/// A repeated key overwrites the earlier value. The value is everything after
/// the first `=`, so it may itself contain `=`. Lines are handled as bytes:
/// a line that isn't valid UTF-8 is skipped instead of failing the request.
pub fn read_credential<R: BufRead>(mut reader: R) -> std::io::Result<Credential> {
    let mut credential = Credential::default();
    let mut line: Vec<u8> = Vec::new();

    loop {
        line.zeroize();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let mut entry = line.as_slice();
        while let Some((b'\n' | b'\r', rest)) = entry.split_last() {
            entry = rest;
        }

        let Some(split) = entry.iter().position(|&b| b == b'=') else {
            continue;
        };
        let (name, value) = (&entry[..split], &entry[split + 1..]);

        let Some(field) = std::str::from_utf8(name).ok().and_then(Field::from_name) else {
            debug!("Ignoring unknown field: {}", String::from_utf8_lossy(name));
            continue;
        };

        match std::str::from_utf8(value) {
            Ok(value) => {
                let slot = field.value_mut(&mut credential);
                slot.zeroize();
                slot.push_str(value);
            }
            Err(_) => debug!("Ignoring {} with a value that isn't valid UTF-8", field.name()),
        }
    }

    line.zeroize();
    Ok(credential)
}

/// Encode the response fields of a credential, skipping empty ones.
pub fn write_credential<W: Write>(mut writer: W, credential: &Credential) -> std::io::Result<()> {
    for field in Field::RESPONSE {
        let value = field.value(credential);
        if !value.is_empty() {
            writeln!(writer, "{}={}", field.name(), value)?;
        }
    }
    writer.flush()
}
