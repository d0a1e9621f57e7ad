//! Bounded retry with exponential backoff.
//!
//! A small policy object shared by client initialization and the generation
//! call path. The policy owns the delay schedule; which errors are worth
//! retrying is the caller's predicate, so the policy itself is testable
//! without touching the network.

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio_retry::RetryIf;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: usize,
    base_delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before each retry, doubling from the base. One fewer entry than
    /// `max_attempts`: the first attempt happens immediately.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        std::iter::successors(Some(self.base_delay), |delay| {
            delay.checked_mul(2)
        })
        .take(self.max_attempts.saturating_sub(1))
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Run `action` until it succeeds, `retryable` rejects the error, or the
    /// attempt bound is exhausted. The sleep between attempts is an awaited
    /// pause on the calling task.
    pub async fn run<T, A, F, C>(&self, action: A, retryable: C) -> Result<T>
    where
        A: FnMut() -> F,
        F: Future<Output = Result<T>>,
        C: FnMut(&Error) -> bool,
    {
        RetryIf::spawn(self.delays(), action, retryable).await
    }
}
