// ABOUTME: Wire format tests for telemetry payloads
// ABOUTME: Integer truncation, omitted fields, timestamp format and the summary placeholder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use vitaledge_relay::TelemetryPayload;

fn decode(payload: &TelemetryPayload) -> Value {
    serde_json::from_slice(&payload.to_json_bytes().unwrap()).unwrap()
}

#[test]
fn test_daily_summary_decodes_to_truncated_integers() {
    let at = Utc.with_ymd_and_hms(2024, 3, 9, 18, 45, 7).unwrap();
    let payload = TelemetryPayload::daily_summary("501", 10_432.99, 612.999, at);

    let body = decode(&payload);

    assert_eq!(body["stepCount"], json!(10_432));
    assert_eq!(body["caloriesBurned"], json!(612));
    assert_eq!(body["heartRate"], json!(0));
    assert!(body["stepCount"].is_u64());
    assert!(body["caloriesBurned"].is_u64());
    assert_eq!(body["timestamp"], json!("2024-03-09T18:45:07Z"));
}

#[test]
fn test_heart_rate_body_omits_daily_fields() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let payload = TelemetryPayload::heart_rate("501", 72.0, at);

    assert_eq!(
        decode(&payload),
        json!({
            "userId": "501",
            "timestamp": "2024-01-01T00:00:00Z",
            "heartRate": 72
        })
    );
}

#[test]
fn test_sub_second_precision_is_dropped() {
    let at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .unwrap()
        .checked_add_signed(chrono::Duration::milliseconds(999))
        .unwrap();
    let payload = TelemetryPayload::heart_rate("501", 99.99, at);

    let body = decode(&payload);
    assert_eq!(body["timestamp"], json!("2024-01-01T00:00:00Z"));
    assert_eq!(body["heartRate"], json!(99));
}

#[test]
fn test_negative_and_nan_readings_clamp_to_zero() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let payload = TelemetryPayload::daily_summary("501", -4.0, f64::NAN, at);

    let body = decode(&payload);
    assert_eq!(body["stepCount"], json!(0));
    assert_eq!(body["caloriesBurned"], json!(0));
}
