// ABOUTME: Main library entry point for the VitalEdge health telemetry relay
// ABOUTME: Samples heart rate, steps and active calories and relays them to an ingestion service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # VitalEdge Relay
//!
//! Periodically samples physiological metrics from a local source and
//! relays them as JSON to a remote ingestion endpoint.
//!
//! ## Architecture
//!
//! - **Sources** (`vitaledge-sources`): `MetricSource` with a live
//!   health-store implementation and a mock
//! - **Transmitter**: JSON over HTTP POST, success is exactly HTTP 200
//! - **Jobs**: the heart rate fetch-and-send cycle and the daily summary
//! - **Scheduler**: recurring heart rate cycles while real-time monitoring
//!   is enabled
//! - **Relay**: composition root exposing the manual triggers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vitaledge_relay::config::RelayConfig;
//! use vitaledge_relay::relay::VitalRelay;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RelayConfig::from_env()?;
//!     let relay = VitalRelay::from_config(&config)?;
//!
//!     relay.authorize().await;
//!     let outcome = relay.fetch_and_send_heart_rate_to_iot().await;
//!     println!("{outcome:?}: {}", relay.display());
//!     Ok(())
//! }
//! ```

/// Relay configuration: environment settings and live monitoring settings
pub mod config;

/// Relay-level constants and environment variable names
pub mod constants;

/// Heart rate cycle and daily summary job
pub mod jobs;

/// Structured logging setup and event helpers
pub mod logging;

/// Composition root and manual triggers
pub mod relay;

/// Recurring heart rate sampler
pub mod scheduler;

/// HTTP delivery to the ingestion service
pub mod transmitter;

pub use vitaledge_core::errors::{MetricError, SendError};
pub use vitaledge_core::models::{Endpoint, MetricKind, MetricSample, TelemetryPayload};
pub use vitaledge_sources::MetricSource;
