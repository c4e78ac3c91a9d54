//! Cooperative cancellation for in-flight requests
//!
//! A [`CancelContext`] combines an optional cancellation token with an
//! optional deadline. The default context is "background": it is never
//! canceled and has no deadline.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error;

#[derive(Debug, Clone, Default)]
pub struct CancelContext {
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
}

impl CancelContext {
    /// A context that never cancels and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A fresh context with its own token. Cancel it through
    /// [`CancelContext::cancel`] or any clone of the returned context.
    #[must_use]
    pub fn cancellable() -> Self {
        Self::with_token(CancellationToken::new())
    }

    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token: Some(token),
            deadline: None,
        }
    }

    /// Fail the request once `timeout` has elapsed from now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    #[must_use]
    pub fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Request cancellation. A no-op for contexts without a token.
    pub fn cancel(&self) {
        if let Some(token) = &self.token {
            token.cancel();
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.as_ref().is_some_and(CancellationToken::is_cancelled)
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Drive `fut` to completion unless the token fires or the deadline
    /// passes first. The losing future is dropped.
    pub async fn run<F, T>(&self, fut: F) -> crate::Result<T>
    where
        F: Future<Output = crate::Result<T>>,
    {
        let canceled = async {
            match &self.token {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            biased;
            () = canceled => Err(error::canceled()),
            () = expired => Err(error::timed_out()),
            result = fut => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_context_runs_to_completion() {
        let ctx = CancelContext::background();
        let value = ctx.run(async { Ok(7) }).await.expect("not canceled");
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn canceled_token_wins_over_pending_work() {
        let ctx = CancelContext::cancellable();
        ctx.cancel();
        let err = ctx
            .run(std::future::pending::<crate::Result<()>>())
            .await
            .expect_err("canceled");
        assert!(err.is_canceled());
    }

    #[tokio::test]
    async fn deadline_expires() {
        let ctx = CancelContext::background().with_timeout(Duration::from_millis(10));
        let err = ctx
            .run(std::future::pending::<crate::Result<()>>())
            .await
            .expect_err("deadline");
        assert!(err.is_timeout());
    }

    #[test]
    fn earlier_deadline_wins() {
        let now = Instant::now();
        let ctx = CancelContext::background()
            .with_deadline(now + Duration::from_secs(5))
            .with_deadline(now + Duration::from_secs(1));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
    }
}
