// ABOUTME: Mock metric source for environments without real health data
// ABOUTME: Random heart rate in [60, 100) and fixed step and calorie totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::mock;
use crate::core::MetricSource;
use crate::errors::MetricResult;
use crate::models::{MetricKind, MetricSample};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Metric source that never touches a health store.
///
/// Heart rate is drawn uniformly from `[60, 100)` on every call so a UI
/// shows changing values; steps (7500) and calories (500) are constant for
/// any date. No call ever fails.
pub struct MockSource {
    rng: Mutex<ChaCha8Rng>,
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Mock source seeded from system entropy
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Mock source producing a reproducible heart rate sequence
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    fn next_heart_rate(&self) -> f64 {
        // A poisoned RNG is still a valid RNG
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(mock::HEART_RATE_MIN_BPM..mock::HEART_RATE_MAX_BPM)
    }
}

#[async_trait]
impl MetricSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_latest_heart_rate(&self) -> MetricResult<Option<MetricSample>> {
        let bpm = self.next_heart_rate();
        debug!(bpm, "Mocked heart rate");
        Ok(Some(MetricSample::now(MetricKind::HeartRate, bpm)))
    }

    async fn fetch_step_count(
        &self,
        _on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>> {
        Ok(Some(MetricSample::now(MetricKind::StepCount, mock::STEP_COUNT)))
    }

    async fn fetch_active_calories(
        &self,
        _on: DateTime<FixedOffset>,
    ) -> MetricResult<Option<MetricSample>> {
        Ok(Some(MetricSample::now(
            MetricKind::ActiveCalories,
            mock::ACTIVE_CALORIES_KCAL,
        )))
    }
}
