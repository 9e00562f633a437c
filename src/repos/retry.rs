//! Retry wrapper for idempotent reads.
//!
//! Only transient failures (I/O, pool timeout) are retried, with a fixed delay.
//! Writes never go through here.
use std::future::Future;
use std::time::Duration;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero is treated as one.
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }
}

pub async fn with_retry<T, F, Fut>(policy: RetryPolicy, op: &'static str, f: F) -> Result<T, RepoError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, RepoError>>,
{
    let attempts = policy.attempts.max(1);

    for attempt in 1..attempts {
        match f().await {
            Err(e) if e.is_transient() => {
                tracing::warn!(
                    op,
                    attempt,
                    max_attempts = attempts,
                    error = %e,
                    "transient database error, retrying in {:?}",
                    policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
            other => return other,
        }
    }

    // last attempt
    f().await
}
