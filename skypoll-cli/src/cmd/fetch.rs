use serde_json::Value as JsonValue;
use skypoll_exec::retry::RetryConfig;
use skypoll_exec::{FetchError, PollingFetchClient};
use tokio_util::sync::CancellationToken;

use crate::cmd::progress;
use crate::exit_codes;
use crate::output::{print_error, print_result};
use crate::utils::{apply_pending_field, build_retry_config};
use crate::{OutputArgs, ProgressArgs, RetryArgs};

pub async fn fetch_cmd(
    url: &str,
    pending_field: Option<&str>,
    retry: RetryArgs,
    progress: ProgressArgs,
    output: OutputArgs,
) -> i32 {
    let (cfg, file_pending) = match build_retry_config(&retry) {
        Ok(v) => v,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::CONFIG_INVALID;
        }
    };

    let cfg = match pending_field.or(file_pending.as_deref()) {
        Some(pending) => match apply_pending_field(cfg, pending) {
            Ok(cfg) => cfg,
            Err(e) => {
                print_error(output.format, output.quiet, &e);
                return exit_codes::CONFIG_INVALID;
            }
        },
        None => cfg,
    };
    let cfg = progress::attach(cfg, progress.progress, output.quiet);

    match run_fetch(url, &cfg).await {
        Ok(payload) => {
            print_result(output.format, output.quiet, &payload);
            exit_codes::SUCCESS
        }
        Err(e) => report_fetch_error(&e, &output),
    }
}

/// Runs one polling call; Ctrl-C cancels it.
pub(crate) async fn run_fetch(url: &str, cfg: &RetryConfig) -> Result<JsonValue, FetchError> {
    let client = PollingFetchClient::default();
    let cancel = CancellationToken::new();

    let on_signal = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling");
            on_signal.cancel();
        }
    });

    let result = client.fetch_with_retry_cancellable(url, cfg, &cancel).await;
    signal_task.abort();
    result
}

pub(crate) fn report_fetch_error(err: &FetchError, output: &OutputArgs) -> i32 {
    let message = match err.pending_message() {
        Some(msg) => format!("{err}: {msg}"),
        None => err.to_string(),
    };
    print_error(output.format, output.quiet, &message);
    match err {
        FetchError::InvalidConfig(_) | FetchError::InvalidUrl { .. } => exit_codes::CONFIG_INVALID,
        _ => exit_codes::FETCH_FAILED,
    }
}
