use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("backend reported an error: {0}")]
    Backend(String),
    #[error("data is still pending: {}", message.as_deref().unwrap_or("no message"))]
    StillPending { message: Option<String> },
    #[error("payload has no horizon_data")]
    MissingData,
    #[error("payload does not match the horizon response shape: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("invalid horizon date {value:?}: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
