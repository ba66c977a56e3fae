mod cancel;
pub mod http;
mod result;
mod runner;

pub use cancel::{CancelReason, CancellationSignal};
pub use http::{HttpClient, HttpError, HttpResponseParts, ReqwestHttpClient, DEFAULT_TIMEOUT};
pub use result::{ExecutionFailure, ExecutionOutcome, ExecutionResult, ExecutionState};
pub use runner::Executor;
