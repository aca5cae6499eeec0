//! Cancellable, deadline-bound execution context
//!
//! Every public service operation takes an [`OpContext`] and runs each
//! collaborator call through [`OpContext::run`]. A context that is already
//! canceled or past its deadline fails before any call is issued, so a
//! canceled operation never performs a write.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone)]
pub struct OpContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl OpContext {
    /// Context with no deadline that is never canceled unless its token is
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Context that expires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().deadline_at(Instant::now() + timeout)
    }

    /// Context canceled together with `token`
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            deadline: None,
            cancel: token,
        }
    }

    /// Set or tighten the deadline
    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) => existing.min(deadline),
            None => deadline,
        });
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// True once canceled or past the deadline
    pub fn is_done(&self) -> bool {
        self.cancel.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Fail fast with `Canceled` if the context is done
    pub fn check(&self) -> DomainResult<()> {
        if self.is_done() {
            return Err(DomainError::Canceled);
        }
        Ok(())
    }

    /// Drive `fut` until it completes, the context is canceled, or the deadline passes
    pub async fn run<F, T>(&self, fut: F) -> DomainResult<T>
    where
        F: Future<Output = T>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(DomainError::Canceled),
            _ = deadline => Err(DomainError::Canceled),
            output = fut => Ok(output),
        }
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::background()
    }
}
