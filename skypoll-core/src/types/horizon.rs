use serde::{Deserialize, Serialize};

/// Envelope returned by the horizon endpoint.
///
/// Every field is optional: a ready response carries `horizon_data`, a not-ready one
/// carries `status: "pending"` plus a `message`, and a failed one carries `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizonResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Any JSON value; `null`, `false`, `0` and `""` mean no error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_data: Option<HorizonData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonData {
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,

    #[serde(default)]
    pub sun_data: Vec<HorizonPoint>,

    #[serde(default)]
    pub moon_data: Vec<HorizonPoint>,
}

/// One altitude sample against local time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonPoint {
    pub hour: f64,
    pub altitude_deg: f64,

    /// `HH:MM` label as emitted by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azimuth_deg: Option<f64>,
}
