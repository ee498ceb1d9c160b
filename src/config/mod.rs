// ABOUTME: Configuration module for the relay: environment settings and live monitoring settings
// ABOUTME: Startup configuration from environment variables plus the watch-backed ConfigurationStore
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration for the relay.
//!
//! - **environment**: `RelayConfig`, loaded once from environment variables
//! - **monitoring**: `MonitoringConfig` and the `ConfigurationStore` the
//!   scheduler watches

use crate::constants::monitoring as limits;
use thiserror::Error;

/// Startup configuration from environment variables
pub mod environment;
/// Live monitoring settings
pub mod monitoring;

pub use environment::{Environment, HttpConfig, RelayConfig, SourceKind};
pub use monitoring::{ConfigurationStore, MonitoringConfig};

/// Rejected configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Interval outside the accepted range
    #[error(
        "Transmission interval must be between {} and {} minutes, got {minutes}",
        limits::MIN_TRANSMISSION_INTERVAL_MINUTES,
        limits::MAX_TRANSMISSION_INTERVAL_MINUTES
    )]
    IntervalOutOfRange {
        /// Rejected value
        minutes: u32,
    },

    /// Metric source name other than `mock` or `live`
    #[error("Unknown metric source '{0}', expected 'mock' or 'live'")]
    UnknownSource(String),
}
