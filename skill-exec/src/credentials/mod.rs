use std::collections::BTreeMap;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use skill_core::AuthScheme;

pub const REDACTED: &str = "<redacted>";

/// The process-wide credential attached to every outbound call.
///
/// Not printable through `Debug`; the bytes are zeroized when the last clone drops.
#[derive(Clone)]
pub struct Credential(Arc<SecretString>);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::from(value.into())))
    }

    /// Reads the credential from an environment variable; empty values count as unset.
    pub fn from_env(var: &str) -> Option<Self> {
        match std::env::var(var) {
            Ok(v) if !v.trim().is_empty() => Some(Self::new(v)),
            _ => None,
        }
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Header carrying this credential under `scheme`, if the scheme attaches one.
    pub fn header_for(&self, scheme: &AuthScheme) -> Option<AuthHeader> {
        scheme
            .header_for(self.expose())
            .map(|(name, value)| AuthHeader {
                name,
                value: Credential::new(value),
            })
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[derive(Debug, Clone)]
pub struct AuthHeader {
    pub name: String,
    pub value: Credential,
}

/// Copy of `headers` safe for logs: `authorization` and `secret_header` values are replaced.
pub fn redact_headers(
    headers: &BTreeMap<String, String>,
    secret_header: Option<&str>,
) -> BTreeMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            let secret = k.eq_ignore_ascii_case("authorization")
                || secret_header.is_some_and(|s| k.eq_ignore_ascii_case(s));
            let v = if secret { REDACTED.to_string() } else { v.clone() };
            (k.clone(), v)
        })
        .collect()
}
