use crate::binder::BindingError;
use crate::executor::{CancelReason, ExecutionFailure};
use crate::request::BuildError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("action '{0}' not found")]
    UnknownAction(String),
    #[error(transparent)]
    Binding(#[from] BindingError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("action cancelled: {0}")]
    Cancelled(CancelReason),
    /// The failure template could not be rendered; this is the underlying failure.
    #[error(transparent)]
    Execution(#[from] ExecutionFailure),
}
