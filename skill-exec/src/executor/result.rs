use crate::executor::cancel::CancelReason;
use crate::executor::http::{HttpError, HttpResponseParts};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExecutionFailure {
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),
    #[error("HTTP error: {status_line}, body: {body}")]
    Upstream {
        status: u16,
        status_line: String,
        body: String,
    },
}

impl ExecutionFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            ExecutionFailure::Upstream { status, .. } => Some(*status),
            ExecutionFailure::Transport(_) => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            ExecutionFailure::Upstream { body, .. } => Some(body),
            ExecutionFailure::Transport(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
    /// Raw upstream body, undecoded.
    Success(String),
    Failure(ExecutionFailure),
}

impl ExecutionResult {
    /// Status >= 400 is an upstream failure; everything else is a success payload.
    pub fn from_response(resp: HttpResponseParts) -> Self {
        let body = String::from_utf8_lossy(&resp.body).into_owned();
        if resp.status >= 400 {
            return ExecutionResult::Failure(ExecutionFailure::Upstream {
                status: resp.status,
                status_line: resp.status_line,
                body,
            });
        }
        ExecutionResult::Success(body)
    }
}

impl From<Result<HttpResponseParts, HttpError>> for ExecutionResult {
    fn from(r: Result<HttpResponseParts, HttpError>) -> Self {
        match r {
            Ok(resp) => ExecutionResult::from_response(resp),
            Err(e) => ExecutionResult::Failure(ExecutionFailure::Transport(e)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Completed(ExecutionResult),
    Cancelled(CancelReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Pending,
    Running,
    Completed,
    Cancelled,
}
