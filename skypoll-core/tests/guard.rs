use serde_json::json;
use skypoll_core::{guard_payload, is_pending, PayloadError};

#[test]
fn pending_status_is_detected() {
    assert!(is_pending(&json!({"status": "pending", "message": "computing"})));
    assert!(!is_pending(&json!({"status": "ready"})));
    assert!(!is_pending(&json!({"horizon_data": {"date": "2026-02-14"}})));
    assert!(!is_pending(&json!(["pending"])));
}

#[test]
fn guard_returns_horizon_data() {
    let payload = json!({
        "horizon_data": {
            "date": "2026-02-14",
            "sun_data": [{"hour": 0, "time": "00:00", "altitude_deg": -42.5, "azimuth_deg": 180.2}],
            "moon_data": [{"hour": 0, "altitude_deg": 15.2}]
        }
    });
    let data = guard_payload(&payload).unwrap();
    assert_eq!(data.date, "2026-02-14");
    assert_eq!(data.sun_data.len(), 1);
    assert_eq!(data.sun_data[0].time.as_deref(), Some("00:00"));
    assert_eq!(data.moon_data[0].azimuth_deg, None);
}

#[test]
fn guard_rejects_backend_error_even_when_not_pending() {
    let err = guard_payload(&json!({"error": "db unavailable"})).unwrap_err();
    match err {
        PayloadError::Backend(msg) => assert_eq!(msg, "db unavailable"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[test]
fn guard_checks_error_before_pending() {
    let err = guard_payload(&json!({"status": "pending", "error": "boom"})).unwrap_err();
    assert!(matches!(err, PayloadError::Backend(_)));
}

#[test]
fn guard_ignores_empty_error_field() {
    let payload = json!({"error": null, "horizon_data": {"date": "2026-02-14"}});
    assert!(guard_payload(&payload).is_ok());
    let payload = json!({"error": "", "horizon_data": {"date": "2026-02-14"}});
    assert!(guard_payload(&payload).is_ok());
}

#[test]
fn guard_treats_false_and_zero_error_as_absent() {
    for error in [json!(false), json!(0), json!(0.0)] {
        let payload = json!({"error": error, "horizon_data": {"date": "2026-02-14"}});
        let data = guard_payload(&payload).unwrap();
        assert_eq!(data.date, "2026-02-14");
    }
}

#[test]
fn guard_reports_non_string_errors() {
    let err = guard_payload(&json!({"error": {"code": 7}})).unwrap_err();
    match err {
        PayloadError::Backend(msg) => assert!(msg.contains("7")),
        other => panic!("expected backend error, got {other:?}"),
    }
    let err = guard_payload(&json!({"error": 1, "horizon_data": {"date": "2026-02-14"}})).unwrap_err();
    assert!(matches!(err, PayloadError::Backend(_)));
    let err = guard_payload(&json!({"error": true})).unwrap_err();
    assert!(matches!(err, PayloadError::Backend(_)));
}

#[test]
fn guard_surfaces_still_pending_with_message() {
    let err = guard_payload(&json!({"status": "pending", "message": "computing"})).unwrap_err();
    match err {
        PayloadError::StillPending { message } => assert_eq!(message.as_deref(), Some("computing")),
        other => panic!("expected still pending, got {other:?}"),
    }
    assert!(format!("{}", guard_payload(&json!({"status": "pending"})).unwrap_err())
        .contains("no message"));
}

#[test]
fn guard_rejects_missing_data() {
    let err = guard_payload(&json!({})).unwrap_err();
    assert!(matches!(err, PayloadError::MissingData));
}

#[test]
fn guard_rejects_malformed_shape() {
    let err = guard_payload(&json!({"horizon_data": {"date": 42}})).unwrap_err();
    assert!(matches!(err, PayloadError::Shape(_)));
    let err = guard_payload(&json!("not an object")).unwrap_err();
    assert!(matches!(err, PayloadError::Shape(_)));
}
