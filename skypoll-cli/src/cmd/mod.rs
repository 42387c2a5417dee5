pub mod fetch;
pub mod horizon;
pub mod progress;
pub mod schedule;
