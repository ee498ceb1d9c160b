// ABOUTME: Composition root wiring the metric source, transmitter, jobs and scheduler together
// ABOUTME: Exposes the manual triggers, startup authorization and real-time monitoring control
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Relay
//!
//! `VitalRelay` owns one `MetricSource` and one `Transmitter`, chosen at
//! construction, and shares them between the manual triggers and the
//! sampling scheduler. There is no runtime switch between sources.

use crate::config::{ConfigError, ConfigurationStore, RelayConfig, SourceKind};
use crate::jobs::{CycleOutcome, HeartRateCycle, HeartRateDisplay, SummaryJob, SummaryOutcome};
use crate::logging::TelemetryLogger;
use crate::scheduler::SamplingScheduler;
use crate::transmitter::{HttpTransmitter, Transmitter};
use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;
use vitaledge_core::models::Endpoint;
use vitaledge_sources::{InMemoryHealthStore, LiveSource, MetricSource, MockSource};

/// The assembled relay
pub struct VitalRelay {
    user_id: String,
    configuration: ConfigurationStore,
    source: Arc<dyn MetricSource>,
    cycle: HeartRateCycle,
    summary: SummaryJob,
    scheduler: SamplingScheduler,
}

impl VitalRelay {
    /// Assemble a relay from explicit collaborators
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IntervalOutOfRange` if the monitoring interval is outside 1-60 minutes
    pub fn new(
        config: &RelayConfig,
        source: Arc<dyn MetricSource>,
        transmitter: Arc<dyn Transmitter>,
    ) -> Result<Self, ConfigError> {
        let configuration = ConfigurationStore::new(config.monitoring)?;
        let cycle = HeartRateCycle::new(source.clone(), transmitter.clone(), &config.user_id);
        let summary = SummaryJob::new(source.clone(), transmitter, &config.user_id);
        let scheduler = SamplingScheduler::new(configuration.clone(), cycle.clone());

        Ok(Self {
            user_id: config.user_id.clone(),
            configuration,
            source,
            cycle,
            summary,
            scheduler,
        })
    }

    /// Build the source and HTTP transmitter described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the health export
    /// cannot be loaded, or the HTTP client cannot be built
    pub fn from_config(config: &RelayConfig) -> Result<Self> {
        config.validate()?;
        let source = build_source(config)?;
        let transmitter = HttpTransmitter::new(&config.ingest_url, config.http)
            .context("Failed to create ingestion client")?;

        info!(
            source = source.name(),
            ingest_url = %transmitter.base_url(),
            user_id = %config.user_id,
            "Relay assembled"
        );
        Self::new(config, source, Arc::new(transmitter)).context("Invalid monitoring configuration")
    }

    /// Name of the metric source in use
    #[must_use]
    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// `userId` written into payloads
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Live monitoring settings
    #[must_use]
    pub const fn configuration(&self) -> &ConfigurationStore {
        &self.configuration
    }

    /// The sampling scheduler
    #[must_use]
    pub const fn scheduler(&self) -> &SamplingScheduler {
        &self.scheduler
    }

    /// Current heart rate display
    #[must_use]
    pub fn display(&self) -> HeartRateDisplay {
        self.cycle.display()
    }

    /// Receiver for heart rate display updates
    #[must_use]
    pub fn subscribe_display(&self) -> watch::Receiver<HeartRateDisplay> {
        self.cycle.subscribe_display()
    }

    /// One-time authorization request; failure is logged and not fatal
    pub async fn authorize(&self) -> bool {
        match self.source.request_authorization().await {
            Ok(granted) => {
                TelemetryLogger::log_authorization(self.source.name(), granted, None);
                granted
            }
            Err(error) => {
                TelemetryLogger::log_authorization(
                    self.source.name(),
                    false,
                    Some(&error.to_string()),
                );
                false
            }
        }
    }

    /// Send today's summary
    pub async fn send_daily_summary(&self) -> SummaryOutcome {
        self.send_daily_summary_for(Local::now().fixed_offset()).await
    }

    /// Send the summary for the day ending at `date`
    pub async fn send_daily_summary_for(&self, date: DateTime<FixedOffset>) -> SummaryOutcome {
        self.summary.run(date).await
    }

    /// Fetch the latest heart rate and send it to the IoT endpoint
    pub async fn fetch_and_send_heart_rate_to_iot(&self) -> CycleOutcome {
        self.cycle.run(Endpoint::IotHeartRate).await
    }

    /// Fetch the latest heart rate and send it to the generic telemetry endpoint
    pub async fn fetch_and_send_heart_rate(&self) -> CycleOutcome {
        self.cycle.run(Endpoint::Telemetry).await
    }

    /// Run the scheduler in the background until `shutdown` completes
    pub fn start_monitoring<F>(&self, shutdown: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let scheduler = self.scheduler.clone();
        tokio::spawn(async move { scheduler.run(shutdown).await })
    }
}

/// Build the metric source selected by `config`
///
/// # Errors
///
/// Returns an error if the live source's health export cannot be loaded
pub fn build_source(config: &RelayConfig) -> Result<Arc<dyn MetricSource>> {
    match config.source {
        SourceKind::Mock => Ok(Arc::new(MockSource::new())),
        SourceKind::Live => {
            let path = config
                .health_export
                .as_ref()
                .context("Live metric source requires a health export")?;
            let store = InMemoryHealthStore::from_export_file(path)
                .with_context(|| format!("Failed to load health export {}", path.display()))?;
            Ok(Arc::new(LiveSource::new(Arc::new(store))))
        }
    }
}
