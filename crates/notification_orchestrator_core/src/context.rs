use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Caller-supplied bound on the outbound calls of one invocation.
///
/// Every page query and publish runs under the context; once the deadline has
/// passed the in-flight call is dropped and [`Canceled`] is returned. Dropping
/// the dispatch future itself cancels the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchContext {
    deadline: Option<Instant>,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invocation deadline exceeded")]
pub struct Canceled;

impl DispatchContext {
    /// A context without a deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn is_expired(&self) -> bool {
        self.deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }

    pub async fn run<F, T>(&self, call: F) -> Result<T, Canceled>
    where
        F: Future<Output = T>,
    {
        match self.deadline {
            None => Ok(call.await),
            Some(deadline) => tokio::time::timeout_at(deadline, call)
                .await
                .map_err(|_| Canceled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_context_never_cancels() {
        let ctx = DispatchContext::background();

        assert!(!ctx.is_expired());
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_call_is_canceled_at_deadline() {
        let ctx = DispatchContext::with_timeout(Duration::from_millis(50));

        let result = ctx.run(std::future::pending::<()>()).await;

        assert_eq!(result, Err(Canceled));
        assert!(ctx.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn call_finishing_before_deadline_succeeds() {
        let ctx = DispatchContext::with_timeout(Duration::from_secs(5));

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_millis(10)).await;
                "done"
            })
            .await;

        assert_eq!(result, Ok("done"));
    }
}
