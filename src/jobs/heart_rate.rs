// ABOUTME: Heart rate fetch-and-send cycle shared by the scheduler and the manual triggers
// ABOUTME: Publishes the latest reading to a watch-backed display and posts it to the chosen endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::messages;
use crate::logging::{FetchStatus, TelemetryLogger};
use crate::transmitter::Transmitter;
use chrono::Utc;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;
use vitaledge_core::errors::{MetricError, SendError};
use vitaledge_core::models::{Endpoint, MetricKind, TelemetryPayload};
use vitaledge_sources::MetricSource;

/// What a UI shows for heart rate
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HeartRateDisplay {
    /// Most recent reading in beats per minute
    Latest(f64),
    /// The last fetch failed with this message
    Error(String),
    /// The last fetch found no sample
    NoData,
    /// Nothing fetched yet
    #[default]
    Unavailable,
}

impl fmt::Display for HeartRateDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest(bpm) => write!(f, "Latest Heart Rate: {bpm:.1} BPM"),
            Self::Error(message) => write!(f, "Error: {message}"),
            Self::NoData => write!(f, "Error: {}", messages::NO_HEART_RATE_DATA),
            Self::Unavailable => f.write_str(messages::NO_HEART_RATE_DATA),
        }
    }
}

/// How one cycle ended
#[derive(Debug)]
pub enum CycleOutcome {
    /// The reading was delivered
    Sent {
        /// Reading that was sent, before truncation
        bpm: f64,
    },
    /// The source had no heart rate sample; nothing was sent
    NoData,
    /// The fetch failed; nothing was sent
    FetchFailed(MetricError),
    /// The reading was fetched but delivery failed
    SendFailed(SendError),
}

impl CycleOutcome {
    /// Whether a payload reached the endpoint
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Fetch the latest heart rate, publish it, and send it.
///
/// Cloning is cheap and every clone publishes to the same display.
#[derive(Clone)]
pub struct HeartRateCycle {
    source: Arc<dyn MetricSource>,
    transmitter: Arc<dyn Transmitter>,
    user_id: String,
    display: Arc<watch::Sender<HeartRateDisplay>>,
}

impl HeartRateCycle {
    /// Create a cycle with an `Unavailable` display
    #[must_use]
    pub fn new(
        source: Arc<dyn MetricSource>,
        transmitter: Arc<dyn Transmitter>,
        user_id: impl Into<String>,
    ) -> Self {
        let (display, _rx) = watch::channel(HeartRateDisplay::Unavailable);
        Self {
            source,
            transmitter,
            user_id: user_id.into(),
            display: Arc::new(display),
        }
    }

    /// Current display value
    #[must_use]
    pub fn display(&self) -> HeartRateDisplay {
        self.display.borrow().clone()
    }

    /// Receiver notified whenever a cycle publishes
    #[must_use]
    pub fn subscribe_display(&self) -> watch::Receiver<HeartRateDisplay> {
        self.display.subscribe()
    }

    /// Run one cycle against `endpoint`
    pub async fn run(&self, endpoint: Endpoint) -> CycleOutcome {
        let span = info_span!(
            "heart_rate_cycle",
            run_id = %Uuid::new_v4(),
            endpoint = %endpoint,
            source = self.source.name()
        );
        self.run_inner(endpoint).instrument(span).await
    }

    async fn run_inner(&self, endpoint: Endpoint) -> CycleOutcome {
        let sample = match self.source.fetch_latest_heart_rate().await {
            Ok(Some(sample)) => sample,
            Ok(None) => {
                TelemetryLogger::log_fetch(
                    MetricKind::HeartRate,
                    self.source.name(),
                    FetchStatus::NoData,
                    None,
                );
                self.publish(HeartRateDisplay::NoData);
                info!("{}", messages::NO_HEART_RATE_DATA);
                return CycleOutcome::NoData;
            }
            Err(error) => {
                TelemetryLogger::log_fetch(
                    MetricKind::HeartRate,
                    self.source.name(),
                    FetchStatus::Failed,
                    None,
                );
                warn!(error = %error, "Heart rate fetch failed");
                self.publish(HeartRateDisplay::Error(error.to_string()));
                return CycleOutcome::FetchFailed(error);
            }
        };

        TelemetryLogger::log_fetch(
            MetricKind::HeartRate,
            self.source.name(),
            FetchStatus::Value,
            Some(sample.value),
        );
        self.publish(HeartRateDisplay::Latest(sample.value));

        let payload = TelemetryPayload::heart_rate(&self.user_id, sample.value, Utc::now());
        match self.transmitter.send(&payload, endpoint).await {
            Ok(()) => CycleOutcome::Sent { bpm: sample.value },
            Err(error) => {
                warn!(error = %error, "Heart rate delivery failed");
                CycleOutcome::SendFailed(error)
            }
        }
    }

    fn publish(&self, value: HeartRateDisplay) {
        // send_replace never fails, even with no receivers
        self.display.send_replace(value);
    }
}
