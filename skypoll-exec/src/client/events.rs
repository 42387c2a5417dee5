use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::retry::RetryReason;

/// Handed to `on_retry` immediately before the loop sleeps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetryEvent {
    pub reason: RetryReason,
    /// 1-based index of the attempt that just finished.
    pub attempt: usize,
    pub max_attempts: usize,
    pub wait_ms: u64,
    /// The pending payload for `RetryReason::Data`, otherwise `None`.
    pub data: Option<JsonValue>,
}

impl RetryEvent {
    /// Human-readable progress message carried by a pending payload, if any.
    pub fn message(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }
}
