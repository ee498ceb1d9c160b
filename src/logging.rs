// ABOUTME: Logging configuration and structured logging setup for the relay
// ABOUTME: Configures log levels, output formats and structured fetch/send event helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use crate::constants::{logging as defaults, service_names};
use anyhow::{Context, Result};
use serde_json::json;
use std::env;
use std::io;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};
use vitaledge_core::models::{Endpoint, MetricKind};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, testing, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::DEFAULT_LEVEL.into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::VITALEDGE_RELAY.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| defaults::DEFAULT_LEVEL.into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // In production, use more detailed logging
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::VITALEDGE_RELAY.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Build the filter: `RUST_LOG` or the configured level, plus noise reduction
    fn env_filter(&self) -> EnvFilter {
        let base = env::var("RUST_LOG").unwrap_or_else(|_| self.level.clone());

        defaults::NOISE_REDUCTION
            .iter()
            .fold(EnvFilter::new(base), |filter, directive| {
                filter.add_directive(
                    directive
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::WARN.into()),
                )
            })
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let installed = match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()
            }
        };
        installed.context("Failed to initialize tracing subscriber")?;

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "VitalEdge Relay starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        debug!("Logging configured: {config_summary}");
    }
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// How a metric fetch ended, for structured logs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// A value was returned
    Value,
    /// The source had no data
    NoData,
    /// The fetch failed
    Failed,
}

impl FetchStatus {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::NoData => "no_data",
            Self::Failed => "failed",
        }
    }
}

/// Structured event helpers for the telemetry pipeline
pub struct TelemetryLogger;

impl TelemetryLogger {
    /// Log the outcome of one delivery
    pub fn log_send(endpoint: Endpoint, success: bool, status: Option<u16>, duration_ms: u64) {
        if success {
            info!(
                endpoint = %endpoint,
                http.status = ?status,
                duration_ms = %duration_ms,
                event_type = "telemetry_send",
                "Data sent successfully"
            );
        } else {
            warn!(
                endpoint = %endpoint,
                http.status = ?status,
                duration_ms = %duration_ms,
                event_type = "telemetry_send",
                "Failed to send data"
            );
        }
    }

    /// Log the outcome of one metric fetch
    pub fn log_fetch(kind: MetricKind, source: &str, status: FetchStatus, value: Option<f64>) {
        match status {
            FetchStatus::Failed => warn!(
                metric = %kind,
                source = %source,
                status = status.as_str(),
                event_type = "metric_fetch",
                "Metric fetch failed"
            ),
            FetchStatus::Value | FetchStatus::NoData => debug!(
                metric = %kind,
                source = %source,
                status = status.as_str(),
                value = ?value,
                event_type = "metric_fetch",
                "Metric fetched"
            ),
        }
    }

    /// Log the startup authorization result
    pub fn log_authorization(source: &str, granted: bool, error: Option<&str>) {
        if granted {
            info!(
                source = %source,
                event_type = "authorization",
                "Health data authorization granted"
            );
        } else {
            warn!(
                source = %source,
                error = error.unwrap_or("access not granted"),
                event_type = "authorization",
                "Health data authorization failed"
            );
        }
    }
}
