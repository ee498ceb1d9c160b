// ABOUTME: Platform health store abstraction consumed by the live metric source
// ABOUTME: Authorization, most-recent-sample and cumulative-sum queries over typed samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::HealthDataType;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Data types the live source asks read access for.
///
/// Oxygen saturation and sleep analysis are requested even though no fetch
/// reads them yet.
pub const AUTHORIZATION_READ_TYPES: [HealthDataType; 3] = [
    HealthDataType::HeartRate,
    HealthDataType::OxygenSaturation,
    HealthDataType::SleepAnalysis,
];

/// Failure reported by the health store, passed on verbatim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HealthStoreError {
    /// Store-provided description
    pub message: String,
}

impl HealthStoreError {
    /// Create a store error
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Queries a platform health store can answer
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Whether the platform knows this data type at all
    fn is_available(&self, data_type: HealthDataType) -> bool;

    /// Ask for read access to `read_types`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request itself could not be processed
    async fn request_authorization(
        &self,
        read_types: &[HealthDataType],
    ) -> Result<bool, HealthStoreError>;

    /// Value of the sample with the latest end time, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    async fn most_recent_quantity(
        &self,
        data_type: HealthDataType,
    ) -> Result<Option<f64>, HealthStoreError>;

    /// Sum of samples starting inside `[start, end)`, or `None` when nothing matched
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    async fn cumulative_sum(
        &self,
        data_type: HealthDataType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<f64>, HealthStoreError>;
}
