// ABOUTME: In-memory health store for hosts without a native health platform
// ABOUTME: Thread-safe sample storage with authorization policy, JSON export loading and fault injection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

// RwLock poisoning errors are converted to HealthStoreError
// for proper error propagation through the live source

//! # In-Memory Health Store
//!
//! Holds quantity samples in memory and answers the same queries a platform
//! health store would:
//!
//! - most recent sample by end time
//! - cumulative sum of samples whose start falls in a window
//!
//! A store can be seeded from a JSON export:
//!
//! ```json
//! [
//!   {"type": "heartRate", "start": "2024-06-01T08:00:00Z", "end": "2024-06-01T08:00:05Z", "value": 64.0},
//!   {"type": "stepCount", "start": "2024-06-01T09:00:00Z", "end": "2024-06-01T09:10:00Z", "value": 812.0}
//! ]
//! ```
//!
//! Once authorization is denied the store keeps answering queries but
//! reports no data, mirroring how platforms hide unreadable samples.

use crate::health_store::{HealthStore, HealthStoreError};
use crate::models::HealthDataType;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// One quantity sample held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSample {
    /// Data type of the sample
    #[serde(rename = "type")]
    pub data_type: HealthDataType,
    /// When the measurement started
    pub start: DateTime<Utc>,
    /// When the measurement ended
    pub end: DateTime<Utc>,
    /// Value in the data type's unit
    pub value: f64,
}

impl StoredSample {
    /// Create a sample covering `[start, end]`
    #[must_use]
    pub const fn new(
        data_type: HealthDataType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        value: f64,
    ) -> Self {
        Self {
            data_type,
            start,
            end,
            value,
        }
    }

    /// Create an instantaneous sample
    #[must_use]
    pub const fn at(data_type: HealthDataType, at: DateTime<Utc>, value: f64) -> Self {
        Self::new(data_type, at, at, value)
    }
}

/// How the store answers authorization requests
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthorizationPolicy {
    /// Read access is granted
    #[default]
    Grant,
    /// Read access is refused; later queries report no data
    Deny,
    /// The request itself fails with this message
    Fail(String),
}

/// Thread-safe in-memory `HealthStore`
#[derive(Debug)]
pub struct InMemoryHealthStore {
    samples: RwLock<Vec<StoredSample>>,
    supported: HashSet<HealthDataType>,
    authorization: AuthorizationPolicy,
    access_denied: AtomicBool,
    query_failure: RwLock<Option<String>>,
    authorization_requests: RwLock<Vec<Vec<HealthDataType>>>,
}

impl Default for InMemoryHealthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHealthStore {
    /// Empty store supporting every data type and granting access
    #[must_use]
    pub fn new() -> Self {
        Self::with_samples(Vec::new())
    }

    /// Store pre-loaded with `samples`
    #[must_use]
    pub fn with_samples(samples: Vec<StoredSample>) -> Self {
        Self {
            samples: RwLock::new(samples),
            supported: HealthDataType::ALL.into_iter().collect(),
            authorization: AuthorizationPolicy::Grant,
            access_denied: AtomicBool::new(false),
            query_failure: RwLock::new(None),
            authorization_requests: RwLock::new(Vec::new()),
        }
    }

    /// Parse a JSON export (an array of samples)
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed
    pub fn from_export_json(json: &str) -> Result<Self, HealthStoreError> {
        let samples: Vec<StoredSample> = serde_json::from_str(json)
            .map_err(|e| HealthStoreError::new(format!("Invalid health export: {e}")))?;
        Ok(Self::with_samples(samples))
    }

    /// Load a JSON export from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn from_export_file(path: impl AsRef<Path>) -> Result<Self, HealthStoreError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            HealthStoreError::new(format!(
                "Failed to read health export {}: {e}",
                path.display()
            ))
        })?;
        let store = Self::from_export_json(&json)?;
        info!(
            path = %path.display(),
            samples = store.sample_count(),
            "Loaded health export"
        );
        Ok(store)
    }

    /// Remove `data_type` from the platform's supported set
    #[must_use]
    pub fn without_type(mut self, data_type: HealthDataType) -> Self {
        self.supported.remove(&data_type);
        self
    }

    /// Replace the authorization policy
    #[must_use]
    pub fn with_authorization(mut self, policy: AuthorizationPolicy) -> Self {
        self.authorization = policy;
        self
    }

    /// Add a sample
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned
    pub fn insert(&self, sample: StoredSample) -> Result<(), HealthStoreError> {
        self.samples
            .write()
            .map_err(|_| HealthStoreError::new("RwLock poisoned: samples lock"))?
            .push(sample);
        Ok(())
    }

    /// Make every subsequent query fail with `message`
    pub fn fail_queries_with(&self, message: impl Into<String>) {
        let mut failure = self
            .query_failure
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *failure = Some(message.into());
    }

    /// Stop injecting query failures
    pub fn clear_query_failure(&self) {
        let mut failure = self
            .query_failure
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *failure = None;
    }

    /// Number of samples held
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.read().map_or(0, |samples| samples.len())
    }

    /// Data type sets passed to every authorization request so far
    #[must_use]
    pub fn authorization_requests(&self) -> Vec<Vec<HealthDataType>> {
        self.authorization_requests
            .read()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn check_query(&self) -> Result<(), HealthStoreError> {
        let failure = self
            .query_failure
            .read()
            .map_err(|_| HealthStoreError::new("RwLock poisoned: query failure lock"))?;
        match failure.as_ref() {
            Some(message) => Err(HealthStoreError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn readable(&self) -> bool {
        !self.access_denied.load(Ordering::Acquire)
    }
}

#[async_trait]
impl HealthStore for InMemoryHealthStore {
    fn is_available(&self, data_type: HealthDataType) -> bool {
        self.supported.contains(&data_type)
    }

    async fn request_authorization(
        &self,
        read_types: &[HealthDataType],
    ) -> Result<bool, HealthStoreError> {
        self.authorization_requests
            .write()
            .map_err(|_| HealthStoreError::new("RwLock poisoned: authorization lock"))?
            .push(read_types.to_vec());

        match &self.authorization {
            AuthorizationPolicy::Grant => {
                self.access_denied.store(false, Ordering::Release);
                Ok(true)
            }
            AuthorizationPolicy::Deny => {
                self.access_denied.store(true, Ordering::Release);
                Ok(false)
            }
            AuthorizationPolicy::Fail(message) => Err(HealthStoreError::new(message.clone())),
        }
    }

    async fn most_recent_quantity(
        &self,
        data_type: HealthDataType,
    ) -> Result<Option<f64>, HealthStoreError> {
        self.check_query()?;
        if !self.readable() {
            return Ok(None);
        }

        let samples = self
            .samples
            .read()
            .map_err(|_| HealthStoreError::new("RwLock poisoned: samples lock"))?;

        let latest = samples
            .iter()
            .filter(|sample| sample.data_type == data_type)
            .max_by_key(|sample| sample.end)
            .map(|sample| sample.value);

        debug!(%data_type, found = latest.is_some(), "Most recent sample query");
        Ok(latest)
    }

    async fn cumulative_sum(
        &self,
        data_type: HealthDataType,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Option<f64>, HealthStoreError> {
        self.check_query()?;
        if !self.readable() {
            return Ok(None);
        }

        let samples = self
            .samples
            .read()
            .map_err(|_| HealthStoreError::new("RwLock poisoned: samples lock"))?;

        let mut matched = samples
            .iter()
            .filter(|sample| sample.data_type == data_type)
            .filter(|sample| sample.start >= start && sample.start < end)
            .peekable();

        if matched.peek().is_none() {
            debug!(%data_type, %start, %end, "Cumulative sum query matched no samples");
            return Ok(None);
        }

        Ok(Some(matched.map(|sample| sample.value).sum()))
    }
}
