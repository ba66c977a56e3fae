use std::time::Duration;

use skill_core::AuthScheme;

use crate::credentials::Credential;
use crate::executor::DEFAULT_TIMEOUT;

/// Process-wide settings, fixed when the engine is built.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub credential: Option<Credential>,
    /// Used for actions that do not declare their own `auth`.
    pub auth: AuthScheme,
    pub timeout: Duration,
    /// Missing template fields become render errors instead of empty strings.
    pub strict_templates: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            credential: None,
            auth: AuthScheme::default(),
            timeout: DEFAULT_TIMEOUT,
            strict_templates: false,
        }
    }
}

impl EngineConfig {
    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_strict_templates(mut self, strict: bool) -> Self {
        self.strict_templates = strict;
        self
    }
}
