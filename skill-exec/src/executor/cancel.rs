use std::sync::{Arc, OnceLock};
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelReason {
    Cancelled(String),
    DeadlineExceeded,
}

impl std::fmt::Display for CancelReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CancelReason::Cancelled(reason) => f.write_str(reason),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Caller-side cancellation for one dispatch.
///
/// Single-shot: the first `cancel` wins and later reasons are ignored. Clones share state, so
/// one clone can be handed to a signal handler while another is awaited.
#[derive(Debug, Clone, Default)]
pub struct CancellationSignal {
    token: CancellationToken,
    reason: Arc<OnceLock<CancelReason>>,
    deadline: Option<Instant>,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self, reason: impl Into<String>) {
        let _ = self.reason.set(CancelReason::Cancelled(reason.into()));
        self.token.cancel();
    }

    /// The reason, if the signal has already fired.
    pub fn fired(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(self.reason());
        }
        match self.deadline {
            Some(d) if Instant::now() >= d => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.fired().is_some()
    }

    /// Resolves once the signal fires or the deadline passes.
    pub async fn cancelled(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => self.reason(),
                    _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                self.reason()
            }
        }
    }

    fn reason(&self) -> CancelReason {
        self.reason
            .get()
            .cloned()
            .unwrap_or_else(|| CancelReason::Cancelled("cancelled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_reason_wins() {
        let signal = CancellationSignal::new();
        let other = signal.clone();
        other.cancel("client went away");
        signal.cancel("shutdown");
        assert_eq!(
            signal.cancelled().await,
            CancelReason::Cancelled("client went away".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_fires() {
        let signal = CancellationSignal::new().with_timeout(Duration::from_secs(2));
        assert!(!signal.is_cancelled());
        assert_eq!(signal.cancelled().await, CancelReason::DeadlineExceeded);
        assert!(signal.is_cancelled());
    }
}
