use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::utils::{build_retry_config, duration_ms};
use crate::{OutputArgs, RetryArgs};

#[derive(Serialize)]
struct ScheduleResult {
    max_attempts: usize,
    timeout_ms: Option<u64>,
    /// Growing waits before the delay reaches its cap.
    waits_ms: Vec<u64>,
    steady_wait_ms: u64,
    steady_waits: usize,
    total_wait_ms: u64,
}

pub fn schedule_cmd(retry: RetryArgs, output: OutputArgs) -> i32 {
    let cfg = match build_retry_config(&retry) {
        Ok((cfg, _)) => cfg,
        Err(e) => {
            print_error(output.format, output.quiet, &e);
            return exit_codes::CONFIG_INVALID;
        }
    };

    let schedule = skypoll_exec::retry::backoff_schedule(&cfg);
    let result = ScheduleResult {
        max_attempts: cfg.max_attempts,
        timeout_ms: cfg.effective_timeout().map(duration_ms),
        waits_ms: schedule.ramp().iter().copied().map(duration_ms).collect(),
        steady_wait_ms: duration_ms(schedule.steady()),
        steady_waits: schedule.steady_count(),
        total_wait_ms: duration_ms(schedule.total()),
    };

    if output.format == OutputFormat::Text && !output.quiet {
        println!("attempt 1: immediately");
        for (i, w) in result.waits_ms.iter().enumerate() {
            println!("attempt {}: after {w} ms", i + 2);
        }
        let first_steady = result.waits_ms.len() + 2;
        match result.steady_waits {
            0 => {}
            1 => println!("attempt {first_steady}: after {} ms", result.steady_wait_ms),
            _ => println!(
                "attempts {first_steady}..{}: after {} ms each",
                result.max_attempts, result.steady_wait_ms
            ),
        }
        match result.timeout_ms {
            Some(t) => println!("per-attempt timeout: {t} ms"),
            None => println!("per-attempt timeout: none"),
        }
        println!("total backoff: {} ms", result.total_wait_ms);
    } else {
        print_result(output.format, output.quiet, &result);
    }
    exit_codes::SUCCESS
}
