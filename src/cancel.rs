//! Cooperative cancellation for in-flight fetch orchestrations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::FetchError;

/// Cloneable cancellation handle shared between a caller and an
/// orchestration run.
///
/// The orchestrator checks the token at every suspension point (before each
/// network call and around each delay); once `cancel` is called, no further
/// network requests are issued and the run resolves to
/// [`FetchError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. All clones observe the change.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Return `Err(FetchError::Cancelled)` if cancellation has fired.
    pub fn check(&self) -> Result<(), FetchError> {
        if self.is_cancelled() {
            Err(FetchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_cancel_is_observed_by_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        token.cancel();

        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(FetchError::Cancelled)));
    }
}
