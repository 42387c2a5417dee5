use async_trait::async_trait;
use url::Url;

/// Default cap on a response body.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseParts {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("http error: {0}")]
    Other(String),
}

/// One GET request. Implementations must not retry on their own and must stop
/// all work when the returned future is dropped.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(&self, url: Url, max_response_bytes: usize) -> Result<HttpResponseParts, HttpError>;
}

pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        // Timeouts are owned by the polling loop, not by reqwest.
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("skypoll-exec/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                panic!("failed to create reqwest HTTP client: {e}. This is a bug - please report it.");
            });
        Self { client }
    }
}

impl ReqwestHttpClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, url: Url, max_response_bytes: usize) -> Result<HttpResponseParts, HttpError> {
        let mut resp = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        if resp
            .content_length()
            .is_some_and(|len| len > max_response_bytes as u64)
        {
            return Err(HttpError::ResponseTooLarge { max_bytes: max_response_bytes });
        }

        // Chunked bodies carry no length; the cap is enforced per chunk.
        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(map_reqwest_error)? {
            if body.len().saturating_add(chunk.len()) > max_response_bytes {
                return Err(HttpError::ResponseTooLarge { max_bytes: max_response_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponseParts { status, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    if e.is_decode() || e.is_body() {
        return HttpError::Decode(e.to_string());
    }
    HttpError::Other(e.to_string())
}
