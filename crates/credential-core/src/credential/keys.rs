//! Store key composition
//!
//! Keys are built from the credential fields in a fixed order: protocol,
//! username, host. A segment is only emitted when its field is non-empty.

use super::types::Credential;

/// Full key: `protocol://username@host/`, used to store the password.
pub fn compose_full_key(credential: &Credential) -> String {
    compose(credential, true)
}

/// Discovery key: `protocol://host/`, used to store which username owns the
/// credentials for a protocol and host.
pub fn compose_discovery_key(credential: &Credential) -> String {
    compose(credential, false)
}

fn compose(credential: &Credential, with_username: bool) -> String {
    let mut key = String::new();

    if !credential.protocol.is_empty() {
        key.push_str(&credential.protocol);
        key.push_str("://");
    }

    if with_username && !credential.username.is_empty() {
        key.push_str(&credential.username);
        key.push('@');
    }

    if !credential.host.is_empty() {
        key.push_str(&credential.host);
        key.push('/');
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_discovery_keys() {
        let cred = Credential::new("https", "example.com").with_username("alice");

        assert_eq!(compose_full_key(&cred), "https://alice@example.com/");
        assert_eq!(compose_discovery_key(&cred), "https://example.com/");
    }

    #[test]
    fn test_empty_credential_gives_empty_keys() {
        let cred = Credential::default();

        assert_eq!(compose_full_key(&cred), "");
        assert_eq!(compose_discovery_key(&cred), "");
    }

    #[test]
    fn test_missing_segments_are_skipped() {
        let host_only = Credential::new("", "example.com");
        assert_eq!(compose_full_key(&host_only), "example.com/");

        let user_only = Credential::default().with_username("alice");
        assert_eq!(compose_full_key(&user_only), "alice@");
        assert_eq!(compose_discovery_key(&user_only), "");

        let no_host = Credential::new("ssh", "").with_username("git");
        assert_eq!(compose_full_key(&no_host), "ssh://git@");
        assert_eq!(compose_discovery_key(&no_host), "ssh://");
    }

    #[test]
    fn test_without_username_keys_match() {
        let cred = Credential::new("https", "example.com:8443");
        assert_eq!(compose_full_key(&cred), compose_discovery_key(&cred));
    }

    #[test]
    fn test_no_case_normalization() {
        let cred = Credential::new("HTTPS", "Example.COM").with_username("Alice");
        assert_eq!(compose_full_key(&cred), "HTTPS://Alice@Example.COM/");
    }

    #[test]
    fn test_password_does_not_affect_keys() {
        let a = Credential::new("https", "example.com").with_username("alice");
        let b = a.clone().with_password("secret");

        assert_eq!(compose_full_key(&a), compose_full_key(&b));
        assert_eq!(compose_full_key(&b), compose_full_key(&b));
    }
}
