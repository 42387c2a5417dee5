#![forbid(unsafe_code)]

//! Payload shapes and caller-side handling for precomputed sky data.
//!
//! The polling client in `skypoll-exec` treats payloads as opaque JSON; this crate is
//! where the horizon response gets a shape, a final guard and a chart-ready form.

pub mod error;
pub mod guard;
pub mod series;
pub mod types;

pub use crate::error::PayloadError;
pub use crate::guard::{guard_payload, is_pending, PENDING_STATUS};
pub use crate::series::{build_chart, HorizonChart, Series, SeriesPoint};
pub use crate::types::{HorizonData, HorizonPoint, HorizonResponse};
