use chrono::NaiveDate;
use serde::Serialize;

use crate::error::PayloadError;
use crate::types::{HorizonData, HorizonPoint};

pub const MIN_ALTITUDE_DEG: f64 = -90.0;
pub const MAX_ALTITUDE_DEG: f64 = 90.0;
pub const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub hour: f64,
    pub altitude_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    /// Samples outside `[0, 24)` hours or with non-finite values are dropped,
    /// altitudes are clamped to `[-90, 90]` and the result is ordered by hour.
    pub fn from_samples(label: impl Into<String>, samples: &[HorizonPoint]) -> Self {
        let mut points: Vec<SeriesPoint> = samples
            .iter()
            .filter(|p| p.hour.is_finite() && p.altitude_deg.is_finite())
            .filter(|p| (0.0..HOURS_PER_DAY).contains(&p.hour))
            .map(|p| SeriesPoint {
                hour: p.hour,
                altitude_deg: p.altitude_deg.clamp(MIN_ALTITUDE_DEG, MAX_ALTITUDE_DEG),
            })
            .collect();
        points.sort_by(|a, b| a.hour.total_cmp(&b.hour));
        Self {
            label: label.into(),
            points,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Highest sample; the earliest one wins on ties.
    pub fn peak(&self) -> Option<SeriesPoint> {
        self.points.iter().copied().fold(None, |best, p| match best {
            Some(b) if b.altitude_deg >= p.altitude_deg => Some(b),
            _ => Some(p),
        })
    }

    /// Samples with altitude above zero; equals hours only on an hourly grid.
    pub fn samples_above_horizon(&self) -> usize {
        self.points.iter().filter(|p| p.altitude_deg > 0.0).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonChart {
    pub date: NaiveDate,
    pub sun: Series,
    pub moon: Series,
}

pub fn build_chart(data: &HorizonData) -> Result<HorizonChart, PayloadError> {
    let date = NaiveDate::parse_from_str(data.date.trim(), "%Y-%m-%d").map_err(|source| {
        PayloadError::InvalidDate {
            value: data.date.clone(),
            source,
        }
    })?;

    Ok(HorizonChart {
        date,
        sun: Series::from_samples("Sun", &data.sun_data),
        moon: Series::from_samples("Moon", &data.moon_data),
    })
}
