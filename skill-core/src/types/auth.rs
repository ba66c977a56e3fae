pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

/// How the process-wide credential is attached to outbound requests.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum AuthScheme {
    /// The bare credential in a named header.
    ApiKey {
        #[serde(default = "default_api_key_header")]
        header: String,
    },
    /// `Authorization: Bearer <credential>`.
    Bearer,
    None,
}

fn default_api_key_header() -> String {
    DEFAULT_API_KEY_HEADER.to_string()
}

impl Default for AuthScheme {
    fn default() -> Self {
        AuthScheme::ApiKey {
            header: default_api_key_header(),
        }
    }
}

impl AuthScheme {
    pub fn api_key(header: impl Into<String>) -> Self {
        AuthScheme::ApiKey {
            header: header.into(),
        }
    }

    /// Header name and value for `credential`, or `None` when nothing should be attached.
    pub fn header_for(&self, credential: &str) -> Option<(String, String)> {
        match self {
            AuthScheme::ApiKey { header } => Some((header.clone(), credential.to_string())),
            AuthScheme::Bearer => Some(("Authorization".to_string(), format!("Bearer {credential}"))),
            AuthScheme::None => None,
        }
    }
}
