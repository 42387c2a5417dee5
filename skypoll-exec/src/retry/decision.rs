use std::time::Duration;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::client::AttemptError;
use crate::retry::{backoff_delay, RetryConfig};

/// Outcome of a single attempt, before the retry policy is applied.
#[derive(Debug)]
pub enum AttemptOutcome {
    Success(JsonValue),
    Failed(AttemptError),
    Pending(JsonValue),
}

impl AttemptOutcome {
    pub fn reason(&self) -> Option<RetryReason> {
        match self {
            AttemptOutcome::Success(_) => None,
            AttemptOutcome::Failed(e) if e.is_timeout() => Some(RetryReason::Timeout),
            AttemptOutcome::Failed(_) => Some(RetryReason::Transport),
            AttemptOutcome::Pending(_) => Some(RetryReason::Data),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RetryReason {
    Transport,
    Timeout,
    Data,
}

impl RetryReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetryReason::Transport => "transport",
            RetryReason::Timeout => "timeout",
            RetryReason::Data => "data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    Done,
    RetryAfter { delay: Duration, reason: RetryReason },
    Stop { reason: RetryReason },
}

/// Decide what follows attempt `attempt_no` (1-based).
pub fn decide_retry(cfg: &RetryConfig, attempt_no: usize, outcome: &AttemptOutcome) -> RetryDecision {
    let Some(reason) = outcome.reason() else {
        return RetryDecision::Done;
    };

    if attempt_no >= cfg.max_attempts {
        return RetryDecision::Stop { reason };
    }

    RetryDecision::RetryAfter {
        delay: backoff_delay(cfg.base_delay, cfg.max_delay, attempt_no),
        reason,
    }
}
