use std::sync::Arc;

use serde_json::Value as JsonValue;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use url::Url;

use crate::client::error::{AttemptError, FetchError};
use crate::client::events::RetryEvent;
use crate::client::http::{HttpClient, ReqwestHttpClient, DEFAULT_MAX_RESPONSE_BYTES};
use crate::client::response::decode_json;
use crate::retry::{decide_retry, AttemptOutcome, RetryConfig, RetryDecision};

/// Polls a JSON endpoint until it returns a payload the caller accepts.
///
/// One attempt is in flight at a time. Transport failures, timeouts and pending
/// payloads all consume an attempt and share the same backoff schedule. Calls are
/// independent; the client holds no per-call state.
pub struct PollingFetchClient {
    http: Arc<dyn HttpClient>,
    max_response_bytes: usize,
}

impl Default for PollingFetchClient {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()))
    }
}

impl PollingFetchClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }

    pub fn with_max_response_bytes(mut self, max_response_bytes: usize) -> Self {
        self.max_response_bytes = max_response_bytes;
        self
    }

    pub async fn fetch_with_retry(&self, url: &str, cfg: &RetryConfig) -> Result<JsonValue, FetchError> {
        self.fetch_with_retry_cancellable(url, cfg, &CancellationToken::new())
            .await
    }

    /// Like [`fetch_with_retry`](Self::fetch_with_retry), but `cancel` aborts the
    /// in-flight request or the pending backoff wait and returns
    /// [`FetchError::Cancelled`] without calling `on_retry` again.
    #[tracing::instrument(name = "fetch_with_retry", skip(self, cfg, cancel), fields(max_attempts = cfg.max_attempts))]
    pub async fn fetch_with_retry_cancellable(
        &self,
        url: &str,
        cfg: &RetryConfig,
        cancel: &CancellationToken,
    ) -> Result<JsonValue, FetchError> {
        cfg.validate()?;
        let url = parse_url(url)?;

        let mut attempt_no = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled { attempts: attempt_no });
            }
            attempt_no += 1;
            debug!(attempt = attempt_no, "starting attempt");

            let Some(outcome) = self.attempt(&url, cfg, cancel).await else {
                debug!(attempt = attempt_no, "cancelled while in flight");
                return Err(FetchError::Cancelled { attempts: attempt_no });
            };

            let (delay, reason) = match decide_retry(cfg, attempt_no, &outcome) {
                RetryDecision::RetryAfter { delay, reason } => (delay, reason),
                RetryDecision::Done | RetryDecision::Stop { .. } => {
                    return finish(outcome, attempt_no);
                }
            };

            let data = match outcome {
                AttemptOutcome::Pending(payload) => Some(payload),
                AttemptOutcome::Failed(err) => {
                    debug!(attempt = attempt_no, error = %err, "attempt failed");
                    None
                }
                AttemptOutcome::Success(_) => None,
            };
            let event = RetryEvent {
                reason,
                attempt: attempt_no,
                max_attempts: cfg.max_attempts,
                wait_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                data,
            };
            info!(
                attempt = attempt_no,
                reason = reason.as_str(),
                wait_ms = event.wait_ms,
                "retry scheduled"
            );
            (cfg.on_retry)(&event);

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(attempt = attempt_no, "cancelled during backoff");
                    return Err(FetchError::Cancelled { attempts: attempt_no });
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Runs one request under the per-attempt budget. `None` means cancelled.
    async fn attempt(
        &self,
        url: &Url,
        cfg: &RetryConfig,
        cancel: &CancellationToken,
    ) -> Option<AttemptOutcome> {
        let request = self.http.send(url.clone(), self.max_response_bytes);

        // Whichever branch loses is dropped, which aborts the request.
        let sent = match cfg.effective_timeout() {
            Some(timeout) => tokio::select! {
                biased;
                _ = cancel.cancelled() => return None,
                r = tokio::time::timeout(timeout, request) => match r {
                    Ok(r) => r,
                    Err(_) => return Some(AttemptOutcome::Failed(AttemptError::Timeout { timeout })),
                },
            },
            None => tokio::select! {
                biased;
                _ = cancel.cancelled() => return None,
                r = request => r,
            },
        };

        let payload = match sent.and_then(|resp| decode_json(&resp)) {
            Ok(p) => p,
            Err(e) => return Some(AttemptOutcome::Failed(AttemptError::Transport(e))),
        };

        if (cfg.should_retry_data)(&payload) {
            Some(AttemptOutcome::Pending(payload))
        } else {
            Some(AttemptOutcome::Success(payload))
        }
    }
}

fn finish(outcome: AttemptOutcome, attempts: usize) -> Result<JsonValue, FetchError> {
    match outcome {
        AttemptOutcome::Success(payload) => {
            info!(attempts, "fetch succeeded");
            Ok(payload)
        }
        AttemptOutcome::Pending(payload) => Err(FetchError::PendingExhausted { attempts, payload }),
        AttemptOutcome::Failed(last) => Err(FetchError::RetriesExhausted { attempts, last }),
    }
}

fn parse_url(raw: &str) -> Result<Url, FetchError> {
    let invalid = |reason: String| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    if raw.trim().is_empty() {
        return Err(invalid("empty url".to_string()));
    }
    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
