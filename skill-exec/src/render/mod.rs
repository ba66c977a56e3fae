pub mod decode;
mod template;

use serde_json::json;
use skill_core::ResponseTemplate;
use tracing::{debug, error, warn};

use crate::executor::{ExecutionFailure, ExecutionResult};
use decode::{decode_success_payload, ContextSource, TextSource};

pub use template::{normalize_dot_paths, TemplateError, TemplateRenderer};

/// Caller-facing text for one finished call.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    /// The success template rendered against the decoded payload.
    Success(String),
    /// The failure template rendered for `cause`.
    Failure { text: String, cause: ExecutionFailure },
    /// The success template failed; `raw` is the upstream payload untouched.
    Unrendered { raw: String, error: TemplateError },
}

impl Rendered {
    pub fn text(&self) -> &str {
        match self {
            Rendered::Success(text) => text,
            Rendered::Failure { text, .. } => text,
            Rendered::Unrendered { raw, .. } => raw,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Rendered::Success(_))
    }
}

#[derive(Debug, Clone)]
pub struct ResponseRenderer {
    templates: TemplateRenderer,
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ResponseRenderer {
    pub fn new(strict: bool) -> Self {
        Self {
            templates: TemplateRenderer::new(strict),
        }
    }

    /// Render `result` through `templates`.
    ///
    /// Returns `Err` only when the failure template cannot be rendered; the original execution
    /// failure is handed back so the true cause is never masked.
    pub fn render(
        &self,
        result: ExecutionResult,
        templates: &ResponseTemplate,
    ) -> Result<Rendered, ExecutionFailure> {
        match result {
            ExecutionResult::Success(raw) => Ok(self.render_success(raw, &templates.success)),
            ExecutionResult::Failure(cause) => self.render_failure(cause, &templates.failure),
        }
    }

    fn render_success(&self, raw: String, template: &str) -> Rendered {
        let decoded = decode_success_payload(&raw);
        if decoded.text_source == TextSource::Raw {
            debug!("payload is not a quoted string, using it as-is");
        }
        if decoded.context_source == ContextSource::Wrapped {
            warn!("payload is not a JSON object, wrapping it under \"result\"");
        }
        match self.templates.render(template, &decoded.context) {
            Ok(text) => Rendered::Success(text),
            Err(error) => {
                error!(%error, "success template failed, returning raw payload");
                Rendered::Unrendered { raw, error }
            }
        }
    }

    fn render_failure(
        &self,
        cause: ExecutionFailure,
        template: &str,
    ) -> Result<Rendered, ExecutionFailure> {
        let mut context = json!({ "Error": cause.to_string() });
        if let (Some(status), Some(body)) = (cause.status(), cause.body()) {
            context["status"] = json!(status);
            context["body"] = json!(body);
        }
        match self.templates.render(template, &context) {
            Ok(text) => Ok(Rendered::Failure { text, cause }),
            Err(error) => {
                error!(%error, "failure template failed, surfacing the original error");
                Err(cause)
            }
        }
    }
}
