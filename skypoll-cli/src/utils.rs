use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use skypoll_exec::retry::{field_equals, RetryConfig};

use crate::RetryArgs;

/// On-disk retry settings; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetryFile {
    pub max_attempts: Option<usize>,
    pub base_delay_ms: Option<u64>,
    pub max_delay_ms: Option<u64>,
    pub timeout_ms: Option<u64>,
    pub pending_field: Option<String>,
}

pub fn load_retry_file(path: &Path) -> Result<RetryFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {e}", path.display()))?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    serde_yaml::from_str(&content)
        .map_err(|e| format!("config {} is neither valid JSON nor YAML: {e}", path.display()))
}

/// Merges defaults, the optional config file and flags. Returns the config and the
/// file's `pending_field`, if any.
pub fn build_retry_config(args: &RetryArgs) -> Result<(RetryConfig, Option<String>), String> {
    let file = match &args.config {
        Some(path) => load_retry_file(path)?,
        None => RetryFile::default(),
    };

    let mut cfg = RetryConfig::default();
    if let Some(n) = args.max_attempts.or(file.max_attempts) {
        cfg.max_attempts = n;
    }
    if let Some(ms) = args.base_delay_ms.or(file.base_delay_ms) {
        cfg.base_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = args.max_delay_ms.or(file.max_delay_ms) {
        cfg.max_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = args.timeout_ms.or(file.timeout_ms) {
        cfg = cfg.with_timeout_ms(ms);
    }

    cfg.validate().map_err(|e| e.to_string())?;
    Ok((cfg, file.pending_field))
}

/// Parses `FIELD=VALUE` into a pending predicate and installs it.
pub fn apply_pending_field(cfg: RetryConfig, pending: &str) -> Result<RetryConfig, String> {
    let (field, value) = pending
        .split_once('=')
        .filter(|(f, _)| !f.trim().is_empty())
        .ok_or_else(|| format!("invalid pending field {pending:?}, expected FIELD=VALUE"))?;
    Ok(RetryConfig {
        should_retry_data: field_equals(field.trim(), value.trim()),
        ..cfg
    })
}

pub fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
