use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::client::http::HttpError;
use crate::retry::ConfigError;

/// Why a single attempt produced no payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptError {
    #[error(transparent)]
    Transport(#[from] HttpError),
    #[error("no response within {} ms", timeout.as_millis())]
    Timeout { timeout: Duration },
}

impl AttemptError {
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            AttemptError::Timeout { .. } | AttemptError::Transport(HttpError::Timeout)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid retry configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("retries exhausted after {attempts} attempt(s): {last}")]
    RetriesExhausted {
        attempts: usize,
        #[source]
        last: AttemptError,
    },
    #[error("still pending after {attempts} attempt(s)")]
    PendingExhausted { attempts: usize, payload: JsonValue },
    #[error("cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: usize },
}

impl FetchError {
    /// Attempts actually issued; zero for errors raised before the first request.
    pub fn attempts(&self) -> usize {
        match self {
            FetchError::InvalidConfig(_) | FetchError::InvalidUrl { .. } => 0,
            FetchError::RetriesExhausted { attempts, .. }
            | FetchError::PendingExhausted { attempts, .. }
            | FetchError::Cancelled { attempts } => *attempts,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::RetriesExhausted { last, .. } if last.is_timeout())
    }

    pub fn pending_payload(&self) -> Option<&JsonValue> {
        match self {
            FetchError::PendingExhausted { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn pending_message(&self) -> Option<&str> {
        self.pending_payload()?.get("message")?.as_str()
    }
}
