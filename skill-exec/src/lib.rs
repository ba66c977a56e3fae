#![forbid(unsafe_code)]

//! Runtime engine for skill actions.
//!
//! `dispatch` = bind arguments → build request → execute (cancellable) → render text.
//! Manifest parsing and validation live in `skill-core`.

pub mod binder;
pub mod credentials;
pub mod engine;
pub mod executor;
pub mod render;
pub mod request;

pub use crate::binder::{bind, ArgumentBag, BindingError, BoundArguments};
pub use crate::credentials::{AuthHeader, Credential};
pub use crate::engine::{ActionEngine, ActionRegistry, ActionSummary, DispatchError, EngineConfig};
pub use crate::executor::{
    CancelReason, CancellationSignal, ExecutionFailure, ExecutionOutcome, ExecutionResult,
    Executor, HttpClient, HttpError, ReqwestHttpClient,
};
pub use crate::render::{Rendered, ResponseRenderer, TemplateError};
pub use crate::request::{build_request, BoundRequest, BuildError};
