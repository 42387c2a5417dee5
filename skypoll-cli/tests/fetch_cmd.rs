use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use assert_cmd::Command;

// Serves the given (status, body) pairs in order, one connection each.
fn serve(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for (status, body) in responses {
            let Ok((mut socket, _)) = listener.accept() else {
                return;
            };
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let resp = format!(
                "HTTP/1.1 {status} Status\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(resp.as_bytes());
        }
    });
    format!("http://{addr}/api/sun/horizon")
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/")
}

const HORIZON: &str = r#"{"horizon_data":{"date":"2026-02-14","sun_data":[{"hour":11,"time":"11:00","altitude_deg":28.4,"azimuth_deg":160.1},{"hour":12,"time":"12:00","altitude_deg":31.0,"azimuth_deg":180.0}],"moon_data":[{"hour":12,"altitude_deg":-4.0}]}}"#;

#[test]
fn fetch_prints_payload() {
    let url = serve(vec![(200, r#"{"ok":true}"#)]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd.args(["fetch", &url, "--format", "json"]).assert().success();

    let v: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(v, serde_json::json!({"ok": true}));
}

#[test]
fn fetch_retries_pending_field_and_reports_progress() {
    let url = serve(vec![
        (202, r#"{"state":"queued","message":"computing"}"#),
        (200, r#"{"state":"done"}"#),
    ]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd
        .args([
            "fetch",
            &url,
            "--pending-field",
            "state=queued",
            "--base-delay-ms",
            "10",
            "--format",
            "json",
        ])
        .assert()
        .success();

    let output = assert.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("attempt 1/5 pending: computing, retrying in 10 ms"));
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(v["state"], "done");
}

#[test]
fn fetch_exhausts_on_unreachable_host() {
    let url = closed_port_url();
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd
        .args(["fetch", &url, "--max-attempts", "2", "--base-delay-ms", "1"])
        .assert()
        .failure()
        .code(3);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("attempt 1/2 request failed"));
    assert!(stderr.contains("retries exhausted after 2 attempt(s)"));
}

#[test]
fn fetch_rejects_invalid_url() {
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    cmd.args(["fetch", "not a url"]).assert().failure().code(2);
}

#[test]
fn fetch_rejects_malformed_pending_field() {
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    cmd.args(["fetch", "http://127.0.0.1:1/", "--pending-field", "=pending"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn horizon_renders_chart_after_pending() {
    let url = serve(vec![
        (202, r#"{"status":"pending","message":"Horizon cache is not ready yet."}"#),
        (200, HORIZON),
    ]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd
        .args(["horizon", &url, "--base-delay-ms", "10"])
        .assert()
        .success();

    let output = assert.get_output();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Horizon 2026-02-14"));
    assert!(stdout.contains("peak 31.0 deg at 12.0 h"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pending: Horizon cache is not ready yet."));
}

#[test]
fn horizon_json_output() {
    let url = serve(vec![(200, HORIZON)]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd
        .args(["horizon", &url, "--format", "json"])
        .assert()
        .success();

    let v: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(v["date"], "2026-02-14");
    assert_eq!(v["sun"]["points"].as_array().unwrap().len(), 2);
    assert_eq!(v["moon"]["label"], "Moon");
}

#[test]
fn horizon_backend_error_is_visible_failure() {
    let url = serve(vec![(200, r#"{"error":"db unavailable"}"#)]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd.args(["horizon", &url]).assert().failure().code(5);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("db unavailable"));
}

#[test]
fn horizon_still_pending_after_exhaustion() {
    let url = serve(vec![
        (202, r#"{"status":"pending","message":"computing"}"#),
        (202, r#"{"status":"pending","message":"computing"}"#),
    ]);
    let mut cmd = Command::cargo_bin("skypoll").unwrap();
    let assert = cmd
        .args(["horizon", &url, "--max-attempts", "2", "--base-delay-ms", "1"])
        .assert()
        .failure()
        .code(3);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    assert!(stderr.contains("still pending after 2 attempt(s): computing"));
}
