mod error;
mod events;
mod fetch;
pub mod http;
pub mod response;

pub use error::{AttemptError, FetchError};
pub use events::RetryEvent;
pub use fetch::PollingFetchClient;
pub use http::{HttpClient, HttpError, HttpResponseParts, ReqwestHttpClient};
