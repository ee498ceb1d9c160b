// ABOUTME: Integration tests for the sequential daily summary job
// ABOUTME: Verifies fetch ordering, abort-on-failure, payload contents and delivery failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{test_date, RecordingTransmitter, Reply, ScriptedSource};
use std::sync::Arc;
use vitaledge_relay::jobs::{SummaryJob, SummaryOutcome, SummaryStage};
use vitaledge_relay::{Endpoint, MetricError, MetricKind};
use vitaledge_sources::MockSource;

fn job(source: &Arc<ScriptedSource>, transmitter: &Arc<RecordingTransmitter>) -> SummaryJob {
    SummaryJob::new(source.clone(), transmitter.clone(), "501")
}

#[tokio::test]
async fn test_summary_fetches_steps_then_calories_and_sends_once() {
    common::init_test_logging();
    let source = Arc::new(ScriptedSource::new(
        Reply::NoData,
        Reply::Value(8_123.7),
        Reply::Value(431.9),
    ));
    let transmitter = Arc::new(RecordingTransmitter::new());

    let outcome = job(&source, &transmitter).run(test_date()).await;

    let payload = match outcome {
        SummaryOutcome::Sent { payload } => payload,
        other => panic!("expected Sent, got {other:?}"),
    };
    assert_eq!(payload.user_id, "501");
    assert_eq!(payload.timestamp, "2024-06-01T12:00:00Z");
    assert_eq!(payload.heart_rate, Some(0));
    assert_eq!(payload.step_count, Some(8_123));
    assert_eq!(payload.calories_burned, Some(431));

    assert_eq!(
        *source.order.lock().unwrap(),
        vec![MetricKind::StepCount, MetricKind::ActiveCalories]
    );
    assert_eq!(source.heart_rate_calls(), 0);

    let sent = transmitter.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].1, Endpoint::Telemetry);
    assert_eq!(sent[0].0, payload);
}

#[tokio::test]
async fn test_failed_step_count_skips_calories_and_send() {
    common::init_test_logging();
    let source = Arc::new(ScriptedSource::new(
        Reply::NoData,
        Reply::Fail(MetricError::query_failed(
            MetricKind::StepCount,
            "Protected health data is inaccessible",
        )),
        Reply::Value(500.0),
    ));
    let transmitter = Arc::new(RecordingTransmitter::new());

    let outcome = job(&source, &transmitter).run(test_date()).await;

    match outcome {
        SummaryOutcome::FetchFailed { stage, error } => {
            assert_eq!(stage, SummaryStage::StepCount);
            assert_eq!(error.to_string(), "Protected health data is inaccessible");
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert_eq!(source.step_calls(), 1);
    assert_eq!(source.calorie_calls(), 0);
    assert_eq!(transmitter.send_count(), 0);
}

#[tokio::test]
async fn test_missing_step_data_aborts() {
    common::init_test_logging();
    let source = Arc::new(ScriptedSource::new(
        Reply::NoData,
        Reply::NoData,
        Reply::Value(500.0),
    ));
    let transmitter = Arc::new(RecordingTransmitter::new());

    let outcome = job(&source, &transmitter).run(test_date()).await;

    assert_eq!(outcome.failed_stage(), Some(SummaryStage::StepCount));
    assert_eq!(source.calorie_calls(), 0);
    assert_eq!(transmitter.send_count(), 0);
}

#[tokio::test]
async fn test_missing_calories_aborts_after_one_calorie_fetch() {
    common::init_test_logging();
    let source = Arc::new(ScriptedSource::new(
        Reply::NoData,
        Reply::Value(7_500.0),
        Reply::Fail(MetricError::unavailable(MetricKind::ActiveCalories)),
    ));
    let transmitter = Arc::new(RecordingTransmitter::new());

    let outcome = job(&source, &transmitter).run(test_date()).await;

    assert_eq!(outcome.failed_stage(), Some(SummaryStage::ActiveCalories));
    assert_eq!(source.calorie_calls(), 1);
    assert_eq!(transmitter.send_count(), 0);
}

#[tokio::test]
async fn test_delivery_failure_is_reported() {
    common::init_test_logging();
    let source = Arc::new(ScriptedSource::new(
        Reply::NoData,
        Reply::Value(1.0),
        Reply::Value(2.0),
    ));
    let transmitter = Arc::new(RecordingTransmitter::failing_with(503));

    let outcome = job(&source, &transmitter).run(test_date()).await;

    match outcome {
        SummaryOutcome::SendFailed(error) => assert_eq!(error.status(), Some(503)),
        other => panic!("expected SendFailed, got {other:?}"),
    }
    assert_eq!(transmitter.send_count(), 1);
}

#[tokio::test]
async fn test_mock_source_summary_is_constant() {
    common::init_test_logging();
    let transmitter = Arc::new(RecordingTransmitter::new());
    let job = SummaryJob::new(Arc::new(MockSource::seeded(1)), transmitter.clone(), "501");

    let outcome = job.run(test_date()).await;

    let payload = match outcome {
        SummaryOutcome::Sent { payload } => payload,
        other => panic!("expected Sent, got {other:?}"),
    };
    assert_eq!(payload.step_count, Some(7_500));
    assert_eq!(payload.calories_burned, Some(500));
}
