// ABOUTME: Core metric source trait shared by live and mock sources
// ABOUTME: Defines the fetch capability set the scheduler and jobs depend on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Metric Source Contract
//!
//! Every fetch resolves to one of three outcomes:
//!
//! - `Ok(Some(sample))` - a reading exists
//! - `Ok(None)` - the query succeeded but found nothing
//! - `Err(MetricError)` - the data type is unavailable or the query failed
//!
//! Callers treat `Ok(None)` as "no data", never as a failure of the source.
//!
//! Sources are held as `Arc<dyn MetricSource>` and injected into the
//! scheduler, the summary job and the manual triggers, so swapping live for
//! mock never touches the orchestration code.

use crate::errors::MetricResult;
use crate::models::MetricSample;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};

/// Provider of heart rate, step count and active calories readings
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Short name used in logs (`live`, `mock`)
    fn name(&self) -> &'static str;

    /// One-time read authorization.
    ///
    /// Sources that need no permission grant immediately.
    ///
    /// # Errors
    ///
    /// Returns `MetricError::AuthorizationDenied` if the platform cannot
    /// process the request
    async fn request_authorization(&self) -> MetricResult<bool> {
        Ok(true)
    }

    /// Most recent heart rate, in beats per minute
    ///
    /// # Errors
    ///
    /// Returns an error if heart rate is unsupported or the query fails
    async fn fetch_latest_heart_rate(&self) -> MetricResult<Option<MetricSample>>;

    /// Steps from the start of `on`'s day up to `on`
    ///
    /// # Errors
    ///
    /// Returns an error if step count is unsupported or the query fails
    async fn fetch_step_count(&self, on: DateTime<FixedOffset>)
        -> MetricResult<Option<MetricSample>>;

    /// Active kilocalories from the start of `on`'s day up to `on`
    ///
    /// # Errors
    ///
    /// Returns an error if active energy is unsupported or the query fails
    async fn fetch_active_calories(
        &self,
        on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>>;
}
