use serde_json::Value as JsonValue;

use crate::error::PayloadError;
use crate::types::{HorizonData, HorizonResponse};

pub const PENDING_STATUS: &str = "pending";

/// Backend convention for "computation not finished yet".
pub fn is_pending(payload: &JsonValue) -> bool {
    payload.get("status").and_then(JsonValue::as_str) == Some(PENDING_STATUS)
}

/// Final check on a payload the polling client handed back as a success.
///
/// The client only knows about the retry predicate it was given, so a payload can
/// still carry a backend `error`, or still be pending once every attempt is spent.
/// Both are surfaced as errors; this never yields an empty success.
pub fn guard_payload(payload: &JsonValue) -> Result<HorizonData, PayloadError> {
    if let Some(err) = payload.get("error").filter(|v| !is_falsy(v)) {
        let msg = match err {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(PayloadError::Backend(msg));
    }

    let resp: HorizonResponse = serde_json::from_value(payload.clone())?;
    if resp.status.as_deref() == Some(PENDING_STATUS) {
        return Err(PayloadError::StillPending {
            message: resp.message,
        });
    }

    resp.horizon_data.ok_or(PayloadError::MissingData)
}

fn is_falsy(v: &JsonValue) -> bool {
    match v {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}
