use skypoll_exec::retry::{RetryConfig, RetryReason};
use skypoll_exec::RetryEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProgressMode {
    /// One stderr line per retry.
    Text,
    /// Each retry event as a JSON line on stdout.
    Json,
    None,
}

pub fn describe(event: &RetryEvent) -> String {
    let what = match event.reason {
        RetryReason::Data => format!("pending: {}", event.message().unwrap_or("not ready yet")),
        RetryReason::Timeout => "timed out".to_string(),
        RetryReason::Transport => "request failed".to_string(),
    };
    format!(
        "attempt {}/{} {what}, retrying in {} ms",
        event.attempt, event.max_attempts, event.wait_ms
    )
}

/// Installs the progress renderer as the config's `on_retry` hook.
pub fn attach(cfg: RetryConfig, mode: ProgressMode, quiet: bool) -> RetryConfig {
    if quiet {
        return cfg;
    }
    match mode {
        ProgressMode::Text => cfg.with_on_retry(|e| eprintln!("{}", describe(e))),
        ProgressMode::Json => cfg.with_on_retry(|e| {
            if let Ok(line) = serde_json::to_string(e) {
                println!("{line}");
            }
        }),
        ProgressMode::None => cfg,
    }
}
