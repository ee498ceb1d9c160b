// ABOUTME: Relay-level constants and environment variable accessors
// ABOUTME: Environment keys, service names and logging defaults for the relay binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants used by the relay crate.
//!
//! Wire-level values (endpoint paths, payload defaults, monitoring bounds)
//! live in `vitaledge_core::constants` and are re-exported here.

pub use vitaledge_core::constants::{endpoints, http, messages, mock, monitoring, payload};

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name reported by the relay binary
    pub const VITALEDGE_RELAY: &str = "vitaledge-relay";
}

/// Environment variable names read at startup
pub mod env_keys {
    /// Base URL of the ingestion service
    pub const INGEST_URL: &str = "VITALEDGE_INGEST_URL";
    /// `userId` written into every payload
    pub const USER_ID: &str = "VITALEDGE_USER_ID";
    /// Request timeout in seconds
    pub const HTTP_TIMEOUT_SECS: &str = "VITALEDGE_HTTP_TIMEOUT_SECS";
    /// Connect timeout in seconds
    pub const HTTP_CONNECT_TIMEOUT_SECS: &str = "VITALEDGE_HTTP_CONNECT_TIMEOUT_SECS";
    /// `mock` or `live`
    pub const SOURCE: &str = "VITALEDGE_SOURCE";
    /// JSON export backing the live health store
    pub const HEALTH_EXPORT: &str = "VITALEDGE_HEALTH_EXPORT";
    /// Initial transmission interval in minutes
    pub const TRANSMISSION_INTERVAL_MINUTES: &str = "VITALEDGE_TRANSMISSION_INTERVAL_MINUTES";
    /// Initial real-time monitoring flag
    pub const REAL_TIME_MONITORING: &str = "VITALEDGE_REAL_TIME_MONITORING";
    /// Initial daily summary flag
    pub const DAILY_SUMMARY: &str = "VITALEDGE_DAILY_SUMMARY";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Logging defaults
pub mod logging {
    /// Level used when `RUST_LOG` is unset
    pub const DEFAULT_LEVEL: &str = "info";
    /// Directives always appended to the filter
    pub const NOISE_REDUCTION: [&str; 3] = ["hyper=warn", "hyper::proto=warn", "reqwest=warn"];
}
