use std::time::Duration;

use crate::retry::RetryConfig;

/// Wait after attempt `attempt_no` (1-based): `min(base * 2^(attempt_no-1), max)`.
///
/// Whole milliseconds only; saturates instead of overflowing for large attempt numbers.
pub fn backoff_delay(base: Duration, max: Duration, attempt_no: usize) -> Duration {
    let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);

    let exp = attempt_no.saturating_sub(1);
    let raw_ms = if exp < 64 {
        base_ms.saturating_mul(1u64 << exp)
    } else if base_ms == 0 {
        0
    } else {
        u64::MAX
    };
    Duration::from_millis(raw_ms.min(max_ms))
}

/// Waits preceding attempts `2..=max_attempts`.
///
/// Delays only grow until they reach `max_delay`, so the schedule is kept as the
/// growing prefix plus a count of identical trailing waits. Its size does not depend
/// on `max_attempts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    ramp: Vec<Duration>,
    steady: Duration,
    steady_count: usize,
}

impl BackoffSchedule {
    /// Waits that differ from the steady wait, in order.
    pub fn ramp(&self) -> &[Duration] {
        &self.ramp
    }

    /// The wait every attempt after the ramp uses.
    pub fn steady(&self) -> Duration {
        self.steady
    }

    pub fn steady_count(&self) -> usize {
        self.steady_count
    }

    pub fn len(&self) -> usize {
        self.ramp.len().saturating_add(self.steady_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Duration> + '_ {
        self.ramp
            .iter()
            .copied()
            .chain(std::iter::repeat(self.steady).take(self.steady_count))
    }

    /// Sum of all waits, saturating at `u64::MAX` milliseconds.
    pub fn total(&self) -> Duration {
        let ramp_ms = self
            .ramp
            .iter()
            .fold(0u64, |acc, d| acc.saturating_add(as_millis_u64(*d)));
        let steady_ms = as_millis_u64(self.steady)
            .saturating_mul(u64::try_from(self.steady_count).unwrap_or(u64::MAX));
        Duration::from_millis(ramp_ms.saturating_add(steady_ms))
    }
}

pub fn backoff_schedule(cfg: &RetryConfig) -> BackoffSchedule {
    let waits = cfg.max_attempts.saturating_sub(1);
    let mut ramp = Vec::new();
    let mut attempt_no = 1;
    while ramp.len() < waits {
        let delay = backoff_delay(cfg.base_delay, cfg.max_delay, attempt_no);
        // Capped, or a zero base that never grows.
        if delay >= cfg.max_delay || delay.is_zero() {
            return BackoffSchedule {
                steady_count: waits - ramp.len(),
                ramp,
                steady: delay,
            };
        }
        ramp.push(delay);
        attempt_no += 1;
    }
    BackoffSchedule {
        ramp,
        steady: cfg.max_delay,
        steady_count: 0,
    }
}

fn as_millis_u64(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
