use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::executor::cancel::CancellationSignal;
use crate::executor::http::{HttpClient, HttpError, DEFAULT_TIMEOUT};
use crate::executor::result::{ExecutionFailure, ExecutionOutcome, ExecutionResult, ExecutionState};
use crate::request::BoundRequest;

/// Runs one request per call on its own task and races it against the caller's signal.
///
/// Cancellation only stops the wait. The spawned call keeps going until the transport gives up
/// or the timeout hits, and its result is dropped.
#[derive(Clone)]
pub struct Executor {
    http: Arc<dyn HttpClient>,
    timeout: Duration,
}

impl Executor {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn execute(&self, req: BoundRequest, cancel: &CancellationSignal) -> ExecutionOutcome {
        debug!(state = ?ExecutionState::Pending, "execution requested");
        if let Some(reason) = cancel.fired() {
            debug!(state = ?ExecutionState::Cancelled, %reason, "cancelled before start");
            return ExecutionOutcome::Cancelled(reason);
        }

        let (tx, rx) = oneshot::channel::<ExecutionResult>();
        let http = Arc::clone(&self.http);
        let timeout = self.timeout;
        debug!(state = ?ExecutionState::Running, method = %req.method, url = %req.url, "sending request");

        tokio::spawn(async move {
            let sent: Result<_, HttpError> =
                match tokio::time::timeout(timeout, http.send(req, timeout)).await {
                    Ok(r) => r,
                    Err(_) => Err(HttpError::Timeout),
                };
            // The receiver is gone if the caller was cancelled first.
            let _ = tx.send(ExecutionResult::from(sent));
        });

        tokio::select! {
            biased;
            reason = cancel.cancelled() => {
                debug!(state = ?ExecutionState::Cancelled, %reason, "caller cancelled");
                ExecutionOutcome::Cancelled(reason)
            }
            received = rx => {
                let result = match received {
                    Ok(result) => result,
                    Err(_) => {
                        warn!("execution task ended without a result");
                        ExecutionResult::Failure(ExecutionFailure::Transport(HttpError::Other(
                            "execution task ended without a result".to_string(),
                        )))
                    }
                };
                debug!(state = ?ExecutionState::Completed, "request finished");
                ExecutionOutcome::Completed(result)
            }
        }
    }
}
