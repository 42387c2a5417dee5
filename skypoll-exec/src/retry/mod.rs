mod backoff;
mod config;
mod decision;
mod predicate;

pub use backoff::{backoff_delay, backoff_schedule, BackoffSchedule};
pub use config::{ConfigError, OnRetry, RetryConfig, ShouldRetryData};
pub use decision::{decide_retry, AttemptOutcome, RetryDecision, RetryReason};
pub use predicate::{field_equals, never_retry};
