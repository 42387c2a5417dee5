use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod logging;
mod output;
mod utils;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "skypoll", version, about = "Poll precomputed sky data endpoints")]
struct Cli {
    /// Log filter (e.g. `info`, `skypoll_exec=debug`). Falls back to SKYPOLL_LOG, then `warn`.
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.log_level.as_deref()) {
        eprintln!("warning: logging disabled: {e}");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Fetch {
            url,
            pending_field,
            retry,
            progress,
            output,
        } => cmd::fetch::fetch_cmd(&url, pending_field.as_deref(), retry, progress, output).await,
        Command::Horizon {
            url,
            retry,
            progress,
            output,
        } => cmd::horizon::horizon_cmd(&url, retry, progress, output).await,
        Command::Schedule { retry, output } => cmd::schedule::schedule_cmd(retry, output),
    }
}
