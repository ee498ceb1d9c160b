// ABOUTME: Metric kinds, platform data types and single-reading samples
// ABOUTME: Maps relay metrics onto the health store data types they are read from
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physiological measurement handled by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKind {
    /// Beats per minute, latest sample
    HeartRate,
    /// Step count, cumulative over a day
    StepCount,
    /// Active energy burned in kilocalories, cumulative over a day
    ActiveCalories,
}

impl MetricKind {
    /// Human-readable name used in diagnostics
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HeartRate => "Heart rate",
            Self::StepCount => "Step count",
            Self::ActiveCalories => "Active energy",
        }
    }

    /// Unit the value is expressed in
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::HeartRate => "count/min",
            Self::StepCount => "count",
            Self::ActiveCalories => "kcal",
        }
    }

    /// Health store data type the metric is read from
    #[must_use]
    pub const fn data_type(self) -> HealthDataType {
        match self {
            Self::HeartRate => HealthDataType::HeartRate,
            Self::StepCount => HealthDataType::StepCount,
            Self::ActiveCalories => HealthDataType::ActiveEnergyBurned,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeartRate => write!(f, "heart_rate"),
            Self::StepCount => write!(f, "step_count"),
            Self::ActiveCalories => write!(f, "active_calories"),
        }
    }
}

/// Data type identifiers understood by the platform health store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthDataType {
    /// Heart rate quantity samples
    HeartRate,
    /// Step count quantity samples
    StepCount,
    /// Active energy quantity samples
    ActiveEnergyBurned,
    /// Blood oxygen saturation quantity samples
    OxygenSaturation,
    /// Sleep analysis category samples
    SleepAnalysis,
}

impl HealthDataType {
    /// Every data type the store can know about
    pub const ALL: [Self; 5] = [
        Self::HeartRate,
        Self::StepCount,
        Self::ActiveEnergyBurned,
        Self::OxygenSaturation,
        Self::SleepAnalysis,
    ];
}

impl fmt::Display for HealthDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HeartRate => write!(f, "heartRate"),
            Self::StepCount => write!(f, "stepCount"),
            Self::ActiveEnergyBurned => write!(f, "activeEnergyBurned"),
            Self::OxygenSaturation => write!(f, "oxygenSaturation"),
            Self::SleepAnalysis => write!(f, "sleepAnalysis"),
        }
    }
}

/// A single scalar reading.
///
/// `captured_at` is the moment the fetch was made, not the time the
/// underlying sample was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    /// Which measurement this is
    pub kind: MetricKind,
    /// Value in the kind's unit
    pub value: f64,
    /// When the reading was fetched
    pub captured_at: DateTime<Utc>,
}

impl MetricSample {
    /// Create a sample captured now
    #[must_use]
    pub fn now(kind: MetricKind, value: f64) -> Self {
        Self {
            kind,
            value,
            captured_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_kinds_map_to_store_types() {
        assert_eq!(MetricKind::HeartRate.data_type(), HealthDataType::HeartRate);
        assert_eq!(MetricKind::StepCount.data_type(), HealthDataType::StepCount);
        assert_eq!(
            MetricKind::ActiveCalories.data_type(),
            HealthDataType::ActiveEnergyBurned
        );
    }

    #[test]
    fn test_data_type_serde_names_match_display() {
        for data_type in HealthDataType::ALL {
            let json = serde_json::to_string(&data_type).unwrap();
            assert_eq!(json, format!("\"{data_type}\""));
        }
    }
}
