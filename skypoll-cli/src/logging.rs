use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "SKYPOLL_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr text logger. Stdout stays reserved for results.
pub fn init(level: Option<&str>) -> Result<(), String> {
    let directive = level
        .map(str::to_string)
        .or_else(|| std::env::var(LOG_ENV).ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());
    let filter = EnvFilter::try_new(&directive).map_err(|e| format!("invalid log filter {directive:?}: {e}"))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| e.to_string())
}
