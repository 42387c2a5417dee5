use std::path::PathBuf;

use clap::Args;

use crate::cmd::progress::ProgressMode;
use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Retry settings. Flags win over `--config`, which wins over built-in defaults.
#[derive(Debug, Args, Clone, Default)]
pub struct RetryArgs {
    /// JSON or YAML file with retry settings.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub max_attempts: Option<usize>,
    #[arg(long)]
    pub base_delay_ms: Option<u64>,
    #[arg(long)]
    pub max_delay_ms: Option<u64>,
    /// Per-attempt timeout; 0 disables it.
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct ProgressArgs {
    #[arg(long, value_enum, default_value_t = ProgressMode::Text)]
    pub progress: ProgressMode,
}
