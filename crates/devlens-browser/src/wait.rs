//! Implicit-wait policy for point lookups.
//!
//! A single session-wide bound limits how long any point lookup may poll
//! for an element to appear; a lookup that does not resolve within the
//! bound fails with [`UiError::LookupTimeout`]. There is no automatic retry
//! anywhere above this layer; scenario code decides whether to re-read.

use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::error::{Result, UiError};

/// Default implicit wait (10 seconds, matching the usual driver default).
pub const DEFAULT_IMPLICIT_WAIT: Duration = Duration::from_secs(10);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration for polled lookups.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Maximum time to wait for a lookup to resolve.
    pub timeout: Duration,
    /// How often to re-attempt the lookup.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with a custom timeout and the default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMPLICIT_WAIT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `attempt` until it yields a value or the bound elapses.
///
/// Errors from individual attempts are treated as "not there yet": an
/// element that has not rendered looks the same as one that never will, and
/// only the elapsed bound distinguishes them. The terminal error is always
/// [`UiError::LookupTimeout`] carrying `target`.
pub async fn poll_until<T, F, Fut>(attempt: F, config: WaitConfig, target: &str) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();

    loop {
        if let Ok(value) = attempt().await {
            return Ok(value);
        }

        if start.elapsed() >= config.timeout {
            return Err(UiError::LookupTimeout {
                target: target.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}
