// ABOUTME: On-demand daily summary job: steps, then calories, then one combined delivery
// ABOUTME: Aborts at the first failed or empty fetch so nothing partial is ever sent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Daily Summary
//!
//! The summary is strictly sequential. The calories fetch is issued only
//! after the step count fetch returned a value, and the payload is built
//! only after both succeeded. The payload timestamp comes from the date the
//! job was run for, and `heartRate` is always the placeholder `0`.

use crate::logging::{FetchStatus, TelemetryLogger};
use crate::transmitter::Transmitter;
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;
use vitaledge_core::errors::{MetricError, SendError};
use vitaledge_core::models::{Endpoint, MetricKind, MetricSample, TelemetryPayload};
use vitaledge_sources::MetricSource;

/// Step of the summary job that ended it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStage {
    /// Fetching today's step count
    StepCount,
    /// Fetching today's active calories
    ActiveCalories,
    /// Delivering the payload
    Send,
}

impl fmt::Display for SummaryStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StepCount => f.write_str("step_count"),
            Self::ActiveCalories => f.write_str("active_calories"),
            Self::Send => f.write_str("send"),
        }
    }
}

/// How a summary run ended
#[derive(Debug)]
pub enum SummaryOutcome {
    /// The combined payload was delivered
    Sent {
        /// Body that was sent
        payload: TelemetryPayload,
    },
    /// A fetch returned no data; nothing was sent
    NoData {
        /// Fetch that came back empty
        stage: SummaryStage,
    },
    /// A fetch failed; nothing was sent
    FetchFailed {
        /// Fetch that failed
        stage: SummaryStage,
        /// Source error
        error: MetricError,
    },
    /// Both fetches succeeded but delivery failed
    SendFailed(SendError),
}

impl SummaryOutcome {
    /// Stage that ended the run, `None` when the payload was delivered
    #[must_use]
    pub const fn failed_stage(&self) -> Option<SummaryStage> {
        match self {
            Self::Sent { .. } => None,
            Self::NoData { stage } | Self::FetchFailed { stage, .. } => Some(*stage),
            Self::SendFailed(_) => Some(SummaryStage::Send),
        }
    }
}

/// Sequential steps-then-calories summary
#[derive(Clone)]
pub struct SummaryJob {
    source: Arc<dyn MetricSource>,
    transmitter: Arc<dyn Transmitter>,
    user_id: String,
}

impl SummaryJob {
    /// Create a job posting as `user_id`
    #[must_use]
    pub fn new(
        source: Arc<dyn MetricSource>,
        transmitter: Arc<dyn Transmitter>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            source,
            transmitter,
            user_id: user_id.into(),
        }
    }

    /// Run the summary for the day ending at `date`
    pub async fn run(&self, date: DateTime<FixedOffset>) -> SummaryOutcome {
        let span = info_span!(
            "daily_summary",
            run_id = %Uuid::new_v4(),
            source = self.source.name()
        );
        self.run_inner(date).instrument(span).await
    }

    async fn run_inner(&self, date: DateTime<FixedOffset>) -> SummaryOutcome {
        let steps = self.source.fetch_step_count(date).await;
        let steps = match self.settle(SummaryStage::StepCount, MetricKind::StepCount, steps) {
            Ok(sample) => sample,
            Err(outcome) => return outcome,
        };

        let calories = self.source.fetch_active_calories(date).await;
        let calories =
            match self.settle(SummaryStage::ActiveCalories, MetricKind::ActiveCalories, calories) {
                Ok(sample) => sample,
                Err(outcome) => return outcome,
            };

        let payload = TelemetryPayload::daily_summary(
            &self.user_id,
            steps.value,
            calories.value,
            date.with_timezone(&Utc),
        );

        match self.transmitter.send(&payload, Endpoint::Telemetry).await {
            Ok(()) => {
                info!(
                    step_count = ?payload.step_count,
                    calories_burned = ?payload.calories_burned,
                    "Daily summary sent"
                );
                SummaryOutcome::Sent { payload }
            }
            Err(error) => {
                warn!(error = %error, "Daily summary delivery failed");
                SummaryOutcome::SendFailed(error)
            }
        }
    }

    /// Turn "no data" and errors into a terminal outcome
    fn settle(
        &self,
        stage: SummaryStage,
        kind: MetricKind,
        result: Result<Option<MetricSample>, MetricError>,
    ) -> Result<MetricSample, SummaryOutcome> {
        match result {
            Ok(Some(sample)) => {
                TelemetryLogger::log_fetch(
                    kind,
                    self.source.name(),
                    FetchStatus::Value,
                    Some(sample.value),
                );
                Ok(sample)
            }
            Ok(None) => {
                TelemetryLogger::log_fetch(kind, self.source.name(), FetchStatus::NoData, None);
                warn!(
                    %stage,
                    "No {} data, daily summary aborted",
                    kind.display_name().to_lowercase()
                );
                Err(SummaryOutcome::NoData { stage })
            }
            Err(error) => {
                TelemetryLogger::log_fetch(kind, self.source.name(), FetchStatus::Failed, None);
                warn!(%stage, error = %error, "Daily summary aborted");
                Err(SummaryOutcome::FetchFailed { stage, error })
            }
        }
    }
}
