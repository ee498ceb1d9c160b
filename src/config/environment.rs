// ABOUTME: Environment configuration for the relay process
// ABOUTME: Parses ingestion, HTTP, source and monitoring settings with validation and a log summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration, loaded once at startup

use super::monitoring::MonitoringConfig;
use super::ConfigError;
use crate::constants::{endpoints, env_keys, http, monitoring, payload};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};
use url::Url;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which `MetricSource` the composition root builds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Fabricated readings
    Mock,
    /// Health store backed readings
    Live,
}

impl SourceKind {
    /// Live when a health export is configured, mock otherwise
    #[must_use]
    pub const fn auto(health_export: Option<&PathBuf>) -> Self {
        if health_export.is_some() {
            Self::Live
        } else {
            Self::Mock
        }
    }
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "live" => Ok(Self::Live),
            other => Err(ConfigError::UnknownSource(other.to_owned())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mock => write!(f, "mock"),
            Self::Live => write!(f, "live"),
        }
    }
}

/// Timeouts for the ingestion HTTP client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Relay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Base URL both endpoint paths resolve against
    pub ingest_url: String,
    /// `userId` written into every payload
    pub user_id: String,
    /// HTTP client timeouts
    pub http: HttpConfig,
    /// Metric source selected at startup
    pub source: SourceKind,
    /// JSON export backing the live health store
    pub health_export: Option<PathBuf>,
    /// Initial monitoring settings
    pub monitoring: MonitoringConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            ingest_url: endpoints::DEFAULT_INGEST_BASE_URL.to_owned(),
            user_id: payload::DEFAULT_USER_ID.to_owned(),
            http: HttpConfig::default(),
            source: SourceKind::Mock,
            health_export: None,
            monitoring: MonitoringConfig::default(),
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparseable value
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let health_export = env::var(env_keys::HEALTH_EXPORT)
            .ok()
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let source = match env::var(env_keys::SOURCE) {
            Ok(value) if !value.trim().is_empty() => value
                .parse()
                .with_context(|| format!("Invalid {} value", env_keys::SOURCE))?,
            _ => SourceKind::auto(health_export.as_ref()),
        };

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                env_keys::ENVIRONMENT,
                "development",
            )),
            ingest_url: env_var_or(env_keys::INGEST_URL, endpoints::DEFAULT_INGEST_BASE_URL),
            user_id: env_var_or(env_keys::USER_ID, payload::DEFAULT_USER_ID),
            http: HttpConfig {
                timeout_secs: env_var_or(
                    env_keys::HTTP_TIMEOUT_SECS,
                    &http::DEFAULT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid VITALEDGE_HTTP_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or(
                    env_keys::HTTP_CONNECT_TIMEOUT_SECS,
                    &http::DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid VITALEDGE_HTTP_CONNECT_TIMEOUT_SECS value")?,
            },
            source,
            health_export,
            monitoring: MonitoringConfig {
                transmission_interval_minutes: env_var_or(
                    env_keys::TRANSMISSION_INTERVAL_MINUTES,
                    &monitoring::DEFAULT_TRANSMISSION_INTERVAL_MINUTES.to_string(),
                )
                .parse()
                .context("Invalid VITALEDGE_TRANSMISSION_INTERVAL_MINUTES value")?,
                real_time_monitoring_enabled: parse_bool(
                    env_keys::REAL_TIME_MONITORING,
                    monitoring::DEFAULT_REAL_TIME_MONITORING_ENABLED,
                )?,
                daily_summary_enabled: parse_bool(
                    env_keys::DAILY_SUMMARY,
                    monitoring::DEFAULT_DAILY_SUMMARY_ENABLED,
                )?,
            },
        };

        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any setting would make the relay unusable
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(anyhow::anyhow!("VITALEDGE_USER_ID cannot be empty"));
        }

        let url = Url::parse(&self.ingest_url)
            .with_context(|| format!("Invalid ingestion URL '{}'", self.ingest_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "Ingestion URL must use http or https, got '{}'",
                url.scheme()
            ));
        }

        if self.http.timeout_secs == 0 || self.http.connect_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP timeouts must be greater than zero"));
        }

        MonitoringConfig::validate_interval(self.monitoring.transmission_interval_minutes)?;

        if self.source == SourceKind::Live && self.health_export.is_none() {
            return Err(anyhow::anyhow!(
                "Live metric source requires {} to point at a health export",
                env_keys::HEALTH_EXPORT
            ));
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "VitalEdge Relay Configuration:\n\
             - Environment: {}\n\
             - Ingestion URL: {}\n\
             - User ID: {}\n\
             - HTTP Timeouts: {}s request, {}s connect\n\
             - Metric Source: {}\n\
             - Health Export: {}\n\
             - Transmission Interval: {} min\n\
             - Real-Time Monitoring: {}\n\
             - Daily Summary: {}",
            self.environment,
            self.ingest_url,
            self.user_id,
            self.http.timeout_secs,
            self.http.connect_timeout_secs,
            self.source,
            self.health_export
                .as_ref()
                .map_or_else(|| "none".to_owned(), |path| path.display().to_string()),
            self.monitoring.transmission_interval_minutes,
            enabled(self.monitoring.real_time_monitoring_enabled),
            enabled(self.monitoring.daily_summary_enabled),
        )
    }
}

const fn enabled(flag: bool) -> &'static str {
    if flag {
        "Enabled"
    } else {
        "Disabled"
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse a boolean flag, accepting `true/false`, `1/0`, `yes/no`, `on/off`
fn parse_bool(key: &str, default: bool) -> Result<bool> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("Invalid {key} value '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!("mock".parse::<SourceKind>(), Ok(SourceKind::Mock));
        assert_eq!(" LIVE ".parse::<SourceKind>(), Ok(SourceKind::Live));
        assert_eq!(
            "healthkit".parse::<SourceKind>(),
            Err(ConfigError::UnknownSource("healthkit".to_owned()))
        );
    }

    #[test]
    fn test_auto_source_follows_export() {
        assert_eq!(SourceKind::auto(None), SourceKind::Mock);
        assert_eq!(
            SourceKind::auto(Some(&PathBuf::from("export.json"))),
            SourceKind::Live
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        RelayConfig::default().validate().unwrap();
    }

    #[test]
    fn test_validation_failures() {
        let mut config = RelayConfig {
            ingest_url: "ftp://example.com".to_owned(),
            ..RelayConfig::default()
        };
        assert!(config.validate().is_err());

        config.ingest_url = "http://localhost:3000".to_owned();
        config.source = SourceKind::Live;
        assert!(config.validate().is_err());

        config.source = SourceKind::Mock;
        config.monitoring.transmission_interval_minutes = 0;
        assert!(config.validate().is_err());

        config.monitoring.transmission_interval_minutes = 5;
        config.user_id = "  ".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_summary_mentions_settings() {
        let summary = RelayConfig::default().summary();
        assert!(summary.contains("Ingestion URL: http://localhost:3000"));
        assert!(summary.contains("User ID: 501"));
        assert!(summary.contains("Real-Time Monitoring: Disabled"));
        assert!(summary.contains("Health Export: none"));
    }
}
