// ABOUTME: Shared test utilities for relay integration tests
// ABOUTME: Quiet logging setup, a recording transmitter and a scripted metric source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::unwrap_used
)]
//! Shared test utilities for `vitaledge_relay`

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use tokio::sync::Semaphore;
use vitaledge_relay::transmitter::Transmitter;
use vitaledge_relay::{
    Endpoint, MetricError, MetricKind, MetricSample, MetricSource, SendError, TelemetryPayload,
};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Noon on 2024-06-01, UTC
pub fn test_date() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .unwrap()
}

/// Transmitter that records every payload instead of sending it
#[derive(Default)]
pub struct RecordingTransmitter {
    sent: Mutex<Vec<(TelemetryPayload, Endpoint)>>,
    fail_with_status: Mutex<Option<u16>>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the payload but report this HTTP status as a failure
    pub fn failing_with(status: u16) -> Self {
        let transmitter = Self::default();
        *transmitter.fail_with_status.lock().unwrap() = Some(status);
        transmitter
    }

    pub fn sent(&self) -> Vec<(TelemetryPayload, Endpoint)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Transmitter for RecordingTransmitter {
    async fn send(&self, payload: &TelemetryPayload, endpoint: Endpoint) -> Result<(), SendError> {
        self.sent.lock().unwrap().push((payload.clone(), endpoint));
        match *self.fail_with_status.lock().unwrap() {
            Some(status) => Err(SendError::unexpected_status(endpoint.path(), status)),
            None => Ok(()),
        }
    }
}

/// Transmitter whose sends block until permits are released
pub struct GatedTransmitter {
    gate: Semaphore,
    in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl GatedTransmitter {
    pub fn new() -> Self {
        Self {
            gate: Semaphore::new(0),
            in_flight: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        }
    }

    /// Let `count` blocked sends finish
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transmitter for GatedTransmitter {
    async fn send(
        &self,
        _payload: &TelemetryPayload,
        _endpoint: Endpoint,
    ) -> Result<(), SendError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.gate.acquire().await.unwrap().forget();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Scripted answer for one metric
#[derive(Debug, Clone)]
pub enum Reply {
    Value(f64),
    NoData,
    Fail(MetricError),
}

impl Reply {
    fn resolve(&self, kind: MetricKind) -> Result<Option<MetricSample>, MetricError> {
        match self {
            Self::Value(value) => Ok(Some(MetricSample::now(kind, *value))),
            Self::NoData => Ok(None),
            Self::Fail(error) => Err(error.clone()),
        }
    }
}

/// Source with fixed replies that counts every call
pub struct ScriptedSource {
    heart_rate: Reply,
    steps: Reply,
    calories: Reply,
    heart_rate_calls: AtomicUsize,
    step_calls: AtomicUsize,
    calorie_calls: AtomicUsize,
    /// Order in which the daily fetches were issued
    pub order: Mutex<Vec<MetricKind>>,
}

impl ScriptedSource {
    pub fn new(heart_rate: Reply, steps: Reply, calories: Reply) -> Self {
        Self {
            heart_rate,
            steps,
            calories,
            heart_rate_calls: AtomicUsize::new(0),
            step_calls: AtomicUsize::new(0),
            calorie_calls: AtomicUsize::new(0),
            order: Mutex::new(Vec::new()),
        }
    }

    pub fn heart_rate_calls(&self) -> usize {
        self.heart_rate_calls.load(Ordering::SeqCst)
    }

    pub fn step_calls(&self) -> usize {
        self.step_calls.load(Ordering::SeqCst)
    }

    pub fn calorie_calls(&self) -> usize {
        self.calorie_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetricSource for ScriptedSource {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_latest_heart_rate(&self) -> Result<Option<MetricSample>, MetricError> {
        self.heart_rate_calls.fetch_add(1, Ordering::SeqCst);
        self.heart_rate.resolve(MetricKind::HeartRate)
    }

    async fn fetch_step_count(
        &self,
        _on: DateTime<FixedOffset>,
    ) -> Result<Option<MetricSample>, MetricError> {
        self.step_calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(MetricKind::StepCount);
        self.steps.resolve(MetricKind::StepCount)
    }

    async fn fetch_active_calories(
        &self,
        _on: DateTime<FixedOffset>,
    ) -> Result<Option<MetricSample>, MetricError> {
        self.calorie_calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().unwrap().push(MetricKind::ActiveCalories);
        self.calories.resolve(MetricKind::ActiveCalories)
    }
}
