use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll any JSON endpoint and print the final payload.
    Fetch {
        url: String,
        /// Treat payloads whose top-level FIELD equals VALUE as pending.
        #[arg(long, value_name = "FIELD=VALUE")]
        pending_field: Option<String>,
        #[command(flatten)]
        retry: RetryArgs,
        #[command(flatten)]
        progress: ProgressArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Poll a horizon endpoint and print the sun/moon altitude series.
    Horizon {
        url: String,
        #[command(flatten)]
        retry: RetryArgs,
        #[command(flatten)]
        progress: ProgressArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the wait schedule for a retry configuration without any network calls.
    Schedule {
        #[command(flatten)]
        retry: RetryArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
