#![forbid(unsafe_code)]

//! Resilient polling fetch client.
//!
//! Calls a JSON endpoint that may fail transiently, time out, or answer with a
//! "not ready yet" payload, and retries all three under one bounded backoff policy.

pub mod client;
pub mod retry;

pub use crate::client::{
    AttemptError, FetchError, HttpClient, HttpError, HttpResponseParts, PollingFetchClient,
    ReqwestHttpClient, RetryEvent,
};
pub use crate::retry::{ConfigError, RetryConfig, RetryReason};
