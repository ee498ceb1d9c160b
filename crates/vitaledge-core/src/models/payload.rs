// ABOUTME: Outbound telemetry payload and ingestion endpoint selection
// ABOUTME: Builds the camelCase JSON records with truncated integer readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{endpoints, payload};
use crate::conversions::truncate_to_u64;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ingestion endpoint a payload is delivered to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// `/api/healthkit`
    Telemetry,
    /// `/api/iot-heart-rate`
    IotHeartRate,
}

impl Endpoint {
    /// Path relative to the ingestion base URL
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Telemetry => endpoints::TELEMETRY_PATH,
            Self::IotHeartRate => endpoints::IOT_HEART_RATE_PATH,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Render a timestamp the way the ingestion service expects (`2024-01-01T00:00:00Z`)
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// JSON record POSTed to the ingestion service.
///
/// Readings are integers truncated from the float samples. Fields a job does
/// not produce are omitted from the body. `timestamp` is fixed when the
/// payload is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    /// Configured user identifier
    pub user_id: String,
    /// ISO-8601 timestamp assigned at construction
    pub timestamp: String,
    /// Heart rate in beats per minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u64>,
    /// Steps for the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_count: Option<u64>,
    /// Active kilocalories for the day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<u64>,
}

impl TelemetryPayload {
    /// Heart rate payload for either endpoint
    #[must_use]
    pub fn heart_rate(user_id: impl Into<String>, bpm: f64, at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: format_timestamp(at),
            heart_rate: Some(truncate_to_u64(bpm)),
            step_count: None,
            calories_burned: None,
        }
    }

    /// Daily summary payload.
    ///
    /// `heartRate` is always present and set to the placeholder value the
    /// receiving endpoint expects.
    #[must_use]
    pub fn daily_summary(
        user_id: impl Into<String>,
        step_count: f64,
        calories_burned: f64,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            timestamp: format_timestamp(at),
            heart_rate: Some(payload::SUMMARY_HEART_RATE_PLACEHOLDER),
            step_count: Some(truncate_to_u64(step_count)),
            calories_burned: Some(truncate_to_u64(calories_burned)),
        }
    }

    /// Serialize to the request body
    ///
    /// # Errors
    ///
    /// Returns an error if JSON encoding fails
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
