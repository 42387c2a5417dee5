use skypoll_core::{build_chart, guard_payload, HorizonChart, Series, PENDING_STATUS};
use skypoll_exec::retry::field_equals;

use crate::cmd::fetch::{report_fetch_error, run_fetch};
use crate::cmd::progress;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::build_retry_config;
use crate::{OutputArgs, ProgressArgs, RetryArgs};

pub async fn horizon_cmd(url: &str, retry: RetryArgs, progress: ProgressArgs, output: OutputArgs) -> i32 {
    // The horizon endpoint always uses the backend's pending convention.
    let cfg = match build_retry_config(&retry) {
        Ok((cfg, _)) => skypoll_exec::RetryConfig {
            should_retry_data: field_equals("status", PENDING_STATUS),
            ..cfg
        },
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::CONFIG_INVALID;
        }
    };
    let cfg = progress::attach(cfg, progress.progress, output.quiet);

    let payload = match run_fetch(url, &cfg).await {
        Ok(p) => p,
        Err(e) => return report_fetch_error(&e, &output),
    };

    let chart = match guard_payload(&payload).and_then(|data| build_chart(&data)) {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::PAYLOAD_REJECTED;
        }
    };

    match output.format {
        OutputFormat::Json => print_result(output.format, output.quiet, &chart),
        OutputFormat::Text if !output.quiet => print!("{}", render_text(&chart)),
        OutputFormat::Text => {}
    }
    exit_codes::SUCCESS
}

fn render_text(chart: &HorizonChart) -> String {
    let mut out = format!("Horizon {}\n", chart.date);
    for series in [&chart.sun, &chart.moon] {
        out.push_str(&summary_line(series));
    }
    for series in [&chart.sun, &chart.moon] {
        out.push_str(&format!("\n{}\n  hour  altitude\n", series.label));
        for p in &series.points {
            out.push_str(&format!("  {:>4.1}  {:>7.1}\n", p.hour, p.altitude_deg));
        }
    }
    out
}

fn summary_line(series: &Series) -> String {
    match series.peak() {
        Some(peak) => format!(
            "{:<5} peak {:.1} deg at {:.1} h, {} sample(s) above horizon\n",
            format!("{}:", series.label),
            peak.altitude_deg,
            peak.hour,
            series.samples_above_horizon()
        ),
        None => format!("{}: no samples\n", series.label),
    }
}
