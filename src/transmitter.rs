// ABOUTME: Telemetry delivery to the ingestion service over HTTP
// ABOUTME: Transmitter trait plus the reqwest implementation with bounded timeouts and strict 200 success
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transmitter
//!
//! Serializes a `TelemetryPayload` and POSTs it to one of the two ingestion
//! endpoints. Only HTTP 200 counts as delivered; anything else, including
//! other 2xx codes, is reported as `SendError::UnexpectedStatus`. Nothing is
//! retried.

use crate::config::HttpConfig;
use crate::constants::endpoints;
use crate::logging::TelemetryLogger;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::{Duration, Instant};
use tracing::info;
use url::Url;
use vitaledge_core::errors::{SendError, SendResult};
use vitaledge_core::models::{Endpoint, TelemetryPayload};

/// Delivers payloads to the ingestion service
#[async_trait]
pub trait Transmitter: Send + Sync {
    /// POST `payload` to `endpoint`
    async fn send(&self, payload: &TelemetryPayload, endpoint: Endpoint) -> SendResult<()>;
}

/// `Transmitter` backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransmitter {
    client: Client,
    base_url: String,
}

impl HttpTransmitter {
    /// Create a transmitter for `base_url` with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns `SendError::InvalidUrl` if `base_url` is not an absolute URL,
    /// or a transport error if the HTTP client cannot be built
    pub fn new(base_url: &str, http: HttpConfig) -> SendResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        Url::parse(&base_url).map_err(|e| SendError::InvalidUrl(format!("{base_url}: {e}")))?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.connect_timeout_secs))
            .build()
            .map_err(|e| SendError::transport(&base_url, e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Base URL the endpoint paths are appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `endpoint`
    ///
    /// # Errors
    ///
    /// Returns `SendError::InvalidUrl` if the joined URL does not parse
    pub fn endpoint_url(&self, endpoint: Endpoint) -> SendResult<Url> {
        let joined = format!("{}{}", self.base_url, endpoint.path());
        Url::parse(&joined).map_err(|e| SendError::InvalidUrl(format!("{joined}: {e}")))
    }
}

#[async_trait]
impl Transmitter for HttpTransmitter {
    async fn send(&self, payload: &TelemetryPayload, endpoint: Endpoint) -> SendResult<()> {
        let url = self.endpoint_url(endpoint)?;
        let body = payload.to_json_bytes()?;
        info!(
            endpoint = %endpoint,
            payload = %String::from_utf8_lossy(&body),
            "Sending payload"
        );

        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, endpoints::JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                TelemetryLogger::log_send(endpoint, false, None, duration_ms);
                return Err(SendError::transport(endpoint.path(), e.to_string()));
            }
        };

        let status = response.status();
        let delivered = status == StatusCode::OK;
        TelemetryLogger::log_send(endpoint, delivered, Some(status.as_u16()), duration_ms);

        if delivered {
            Ok(())
        } else {
            Err(SendError::unexpected_status(endpoint.path(), status.as_u16()))
        }
    }
}
