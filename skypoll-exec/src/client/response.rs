use serde_json::Value as JsonValue;

use crate::client::http::{HttpError, HttpResponseParts};

const STATUS_BODY_EXCERPT_CHARS: usize = 200;

/// Any 2xx body that parses as JSON is a payload; everything else is a transport error.
///
/// `202 Accepted` is included: backends answer "not ready yet" with it.
pub fn decode_json(resp: &HttpResponseParts) -> Result<JsonValue, HttpError> {
    if !(200..300).contains(&resp.status) {
        return Err(HttpError::Status {
            status: resp.status,
            body: body_excerpt(&resp.body),
        });
    }
    let s = std::str::from_utf8(&resp.body).map_err(|e| HttpError::Decode(e.to_string()))?;
    serde_json::from_str(s).map_err(|e| HttpError::Decode(e.to_string()))
}

fn body_excerpt(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    match trimmed.char_indices().nth(STATUS_BODY_EXCERPT_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
