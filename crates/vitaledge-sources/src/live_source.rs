// ABOUTME: Live metric source reading from the platform health store
// ABOUTME: Guards data type availability, then runs latest-sample and daily cumulative-sum queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::core::MetricSource;
use crate::errors::{MetricError, MetricResult};
use crate::health_store::{HealthStore, AUTHORIZATION_READ_TYPES};
use crate::models::{HealthDataType, MetricKind, MetricSample};
use crate::utils::day_window;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Metric source backed by a `HealthStore`.
///
/// Availability of the data type is checked before any query runs, so an
/// unsupported metric fails with `MetricError::MetricUnavailable` without
/// touching the store. Store failures are passed through verbatim.
pub struct LiveSource {
    store: Arc<dyn HealthStore>,
}

impl LiveSource {
    /// Create a live source over `store`
    #[must_use]
    pub fn new(store: Arc<dyn HealthStore>) -> Self {
        Self { store }
    }

    fn available_type(&self, kind: MetricKind) -> MetricResult<HealthDataType> {
        let data_type = kind.data_type();
        if self.store.is_available(data_type) {
            Ok(data_type)
        } else {
            Err(MetricError::unavailable(kind))
        }
    }

    async fn daily_sum(
        &self,
        kind: MetricKind,
        on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>> {
        let data_type = self.available_type(kind)?;
        let (start, end) = day_window(on);

        let sum = self
            .store
            .cumulative_sum(data_type, start, end)
            .await
            .map_err(|e| MetricError::query_failed(kind, e.message))?;

        debug!(%kind, %start, %end, found = sum.is_some(), "Daily cumulative sum");
        Ok(sum.map(|value| MetricSample::now(kind, value)))
    }
}

#[async_trait]
impl MetricSource for LiveSource {
    fn name(&self) -> &'static str {
        "live"
    }

    #[instrument(skip(self), fields(source = "live"))]
    async fn request_authorization(&self) -> MetricResult<bool> {
        self.store
            .request_authorization(&AUTHORIZATION_READ_TYPES)
            .await
            .map_err(|e| MetricError::authorization_denied(e.message))
    }

    #[instrument(skip(self), fields(source = "live"))]
    async fn fetch_latest_heart_rate(&self) -> MetricResult<Option<MetricSample>> {
        debug!("Fetching real heart rate");
        let data_type = self.available_type(MetricKind::HeartRate)?;

        let latest = self
            .store
            .most_recent_quantity(data_type)
            .await
            .map_err(|e| MetricError::query_failed(MetricKind::HeartRate, e.message))?;

        Ok(latest.map(|bpm| MetricSample::now(MetricKind::HeartRate, bpm)))
    }

    #[instrument(skip(self), fields(source = "live"))]
    async fn fetch_step_count(
        &self,
        on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>> {
        self.daily_sum(MetricKind::StepCount, on).await
    }

    #[instrument(skip(self), fields(source = "live"))]
    async fn fetch_active_calories(
        &self,
        on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>> {
        self.daily_sum(MetricKind::ActiveCalories, on).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::{AuthorizationPolicy, InMemoryHealthStore, StoredSample};
    use chrono::{TimeZone, Utc};

    fn noon() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .unwrap()
    }

    fn source_over(store: InMemoryHealthStore) -> (LiveSource, Arc<InMemoryHealthStore>) {
        let store = Arc::new(store);
        (LiveSource::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_latest_heart_rate() {
        let (source, _) = source_over(InMemoryHealthStore::with_samples(vec![
            StoredSample::at(
                HealthDataType::HeartRate,
                Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap(),
                58.0,
            ),
            StoredSample::at(
                HealthDataType::HeartRate,
                Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap(),
                73.4,
            ),
        ]));

        let sample = source.fetch_latest_heart_rate().await.unwrap().unwrap();
        assert_eq!(sample.kind, MetricKind::HeartRate);
        assert!((sample.value - 73.4).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_no_heart_rate_sample_is_not_an_error() {
        let (source, _) = source_over(InMemoryHealthStore::new());
        assert_eq!(source.fetch_latest_heart_rate().await, Ok(None));
    }

    #[tokio::test]
    async fn test_unavailable_type_fails_before_querying() {
        let (source, store) = source_over(
            InMemoryHealthStore::new().without_type(HealthDataType::ActiveEnergyBurned),
        );
        store.fail_queries_with("should not be reached");

        let error = source.fetch_active_calories(noon()).await.unwrap_err();
        assert_eq!(
            error,
            MetricError::unavailable(MetricKind::ActiveCalories)
        );
    }

    #[tokio::test]
    async fn test_query_failure_is_verbatim() {
        let (source, store) = source_over(InMemoryHealthStore::new());
        store.fail_queries_with("Authorization not determined");

        let error = source.fetch_step_count(noon()).await.unwrap_err();
        assert_eq!(
            error,
            MetricError::query_failed(MetricKind::StepCount, "Authorization not determined")
        );
    }

    #[tokio::test]
    async fn test_step_count_sums_today_only() {
        let (source, _) = source_over(InMemoryHealthStore::with_samples(vec![
            StoredSample::at(
                HealthDataType::StepCount,
                Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap(),
                5_000.0,
            ),
            StoredSample::at(
                HealthDataType::StepCount,
                Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
                1_200.0,
            ),
            StoredSample::at(
                HealthDataType::StepCount,
                Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
                800.0,
            ),
        ]));

        let sample = source.fetch_step_count(noon()).await.unwrap().unwrap();
        assert_eq!(sample.kind, MetricKind::StepCount);
        assert!((sample.value - 2_000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_authorization_requests_preprovisioned_types() {
        let (source, store) = source_over(InMemoryHealthStore::new());
        assert_eq!(source.request_authorization().await, Ok(true));
        assert_eq!(
            store.authorization_requests(),
            vec![vec![
                HealthDataType::HeartRate,
                HealthDataType::OxygenSaturation,
                HealthDataType::SleepAnalysis,
            ]]
        );
    }

    #[tokio::test]
    async fn test_authorization_failure_maps_to_denied() {
        let (source, _) = source_over(
            InMemoryHealthStore::new().with_authorization(AuthorizationPolicy::Fail(
                "Health data is unavailable".to_owned(),
            )),
        );
        let error = source.request_authorization().await.unwrap_err();
        assert_eq!(
            error,
            MetricError::authorization_denied("Health data is unavailable")
        );
    }
}
