use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::client::RetryEvent;

/// Inspects a decoded payload; `true` means "not ready, try again later".
pub type ShouldRetryData = Arc<dyn Fn(&JsonValue) -> bool + Send + Sync>;

/// Called synchronously right before the loop sleeps between attempts.
pub type OnRetry = Arc<dyn Fn(&RetryEvent) + Send + Sync>;

#[derive(Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
    /// Per-attempt budget. `None` or a zero duration disables the per-attempt timeout.
    pub timeout: Option<Duration>,
    pub should_retry_data: ShouldRetryData,
    pub on_retry: OnRetry,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(15_000),
            timeout: Some(Duration::from_millis(10_000)),
            should_retry_data: crate::retry::never_retry(),
            on_retry: Arc::new(|_: &RetryEvent| {}),
        }
    }
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl RetryConfig {
    pub fn with_should_retry_data<F>(mut self, f: F) -> Self
    where
        F: Fn(&JsonValue) -> bool + Send + Sync + 'static,
    {
        self.should_retry_data = Arc::new(f);
        self
    }

    pub fn with_on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(&RetryEvent) + Send + Sync + 'static,
    {
        self.on_retry = Arc::new(f);
        self
    }

    /// Millisecond form used by config files and flags: `0` means no timeout.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout = (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms));
        self
    }

    /// The per-attempt budget actually enforced; a zero duration counts as none.
    pub fn effective_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|t| !t.is_zero())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.base_delay > self.max_delay {
            return Err(ConfigError::BaseExceedsMax {
                base_ms: self.base_delay.as_millis(),
                max_ms: self.max_delay.as_millis(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("base delay ({base_ms} ms) exceeds max delay ({max_ms} ms)")]
    BaseExceedsMax { base_ms: u128, max_ms: u128 },
}
