mod config;
mod error;
mod registry;

use std::sync::Arc;

use skill_core::AuthScheme;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::binder::{bind, ArgumentBag};
use crate::executor::{CancellationSignal, ExecutionOutcome, Executor, HttpClient, HttpError, ReqwestHttpClient};
use crate::render::{Rendered, ResponseRenderer};
use crate::request::build_request;

pub use config::EngineConfig;
pub use error::DispatchError;
pub use registry::{ActionRegistry, ActionSummary};

/// The boundary the transport talks to: `list_actions` and `dispatch`.
pub struct ActionEngine {
    registry: Arc<ActionRegistry>,
    executor: Executor,
    renderer: ResponseRenderer,
    config: EngineConfig,
}

impl ActionEngine {
    pub fn new(registry: ActionRegistry, http: Arc<dyn HttpClient>, config: EngineConfig) -> Self {
        if config.credential.is_none() && config.auth != AuthScheme::None {
            warn!("no credential configured; requests are sent without an auth header");
        }
        Self {
            registry: Arc::new(registry),
            executor: Executor::new(http).with_timeout(config.timeout),
            renderer: ResponseRenderer::new(config.strict_templates),
            config,
        }
    }

    /// Engine backed by a shared `reqwest` client.
    pub fn with_reqwest(registry: ActionRegistry, config: EngineConfig) -> Result<Self, HttpError> {
        let http = ReqwestHttpClient::new(config.timeout)?;
        Ok(Self::new(registry, Arc::new(http), config))
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn list_actions(&self) -> Vec<ActionSummary> {
        self.registry.summaries()
    }

    /// Bind, send, and render one action.
    ///
    /// Binding and build errors return before any network I/O. Upstream and transport
    /// failures come back as `Ok(Rendered::Failure)` unless the failure template itself breaks.
    pub async fn dispatch(
        &self,
        name: &str,
        args: ArgumentBag,
        cancel: &CancellationSignal,
    ) -> Result<Rendered, DispatchError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("dispatch", %request_id, action = %name);
        self.dispatch_inner(name, args, cancel).instrument(span).await
    }

    async fn dispatch_inner(
        &self,
        name: &str,
        args: ArgumentBag,
        cancel: &CancellationSignal,
    ) -> Result<Rendered, DispatchError> {
        let def = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::UnknownAction(name.to_string()))?;

        let bound = bind(def, &args)?;
        debug!(path = ?bound.path, query = ?bound.query, body_keys = bound.body.len(), "arguments bound");

        let scheme = def.auth.as_ref().unwrap_or(&self.config.auth);
        let auth = self
            .config
            .credential
            .as_ref()
            .and_then(|c| c.header_for(scheme));
        let req = build_request(def, &bound, auth.as_ref())?;
        debug!(headers = ?req.redacted_headers(), "request built");

        let result = match self.executor.execute(req, cancel).await {
            ExecutionOutcome::Completed(result) => result,
            ExecutionOutcome::Cancelled(reason) => {
                info!(%reason, "dispatch cancelled");
                return Err(DispatchError::Cancelled(reason));
            }
        };

        let rendered = self.renderer.render(result, &def.response_template)?;
        info!(success = rendered.is_success(), "dispatch finished");
        Ok(rendered)
    }
}
