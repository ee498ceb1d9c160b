// ABOUTME: Telemetry delivery error types for the ingestion endpoints
// ABOUTME: Covers serialization, transport failures and non-success HTTP statuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors returned when a payload cannot be delivered.
///
/// None of these are retried; callers log them and move on.
#[derive(Debug, Error)]
pub enum SendError {
    /// The payload could not be encoded as JSON
    #[error("Error serializing JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured base URL cannot address the endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request never produced an HTTP response
    #[error("Error sending data to {endpoint}: {message}")]
    Transport {
        /// Endpoint path the request targeted
        endpoint: String,
        /// Transport-level error description
        message: String,
    },

    /// The endpoint answered with a status other than 200
    #[error("Failed to send data to {endpoint}: HTTP {status}")]
    UnexpectedStatus {
        /// Endpoint path the request targeted
        endpoint: String,
        /// HTTP status returned
        status: u16,
    },
}

impl SendError {
    /// Create a transport error
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    #[must_use]
    pub fn unexpected_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    /// HTTP status carried by the error, if the endpoint answered
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for telemetry delivery
pub type SendResult<T> = Result<T, SendError>;
