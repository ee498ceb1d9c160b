// ABOUTME: Metric fetch error types surfaced by every metric source
// ABOUTME: Distinguishes denied authorization, unavailable data types and store failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::MetricKind;
use thiserror::Error;

/// Errors returned by metric source operations.
///
/// An absent sample is reported as `Ok(None)` and never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricError {
    /// The platform denied read access or could not grant it
    #[error("Health data authorization failed: {reason}")]
    AuthorizationDenied {
        /// Platform-provided reason
        reason: String,
    },

    /// The platform does not support the requested data type
    #[error("{} type not available", .kind.display_name())]
    MetricUnavailable {
        /// Metric that was requested
        kind: MetricKind,
    },

    /// The store accepted the query but failed to execute it
    #[error("{message}")]
    QueryFailed {
        /// Metric that was queried
        kind: MetricKind,
        /// Store message, unchanged
        message: String,
    },
}

impl MetricError {
    /// Create an "authorization denied" error
    #[must_use]
    pub fn authorization_denied(reason: impl Into<String>) -> Self {
        Self::AuthorizationDenied {
            reason: reason.into(),
        }
    }

    /// Create a "metric unavailable" error
    #[must_use]
    pub const fn unavailable(kind: MetricKind) -> Self {
        Self::MetricUnavailable { kind }
    }

    /// Create a "query failed" error carrying the store message verbatim
    #[must_use]
    pub fn query_failed(kind: MetricKind, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            kind,
            message: message.into(),
        }
    }

    /// Metric the error refers to, if any
    #[must_use]
    pub const fn kind(&self) -> Option<MetricKind> {
        match self {
            Self::AuthorizationDenied { .. } => None,
            Self::MetricUnavailable { kind } | Self::QueryFailed { kind, .. } => Some(*kind),
        }
    }
}

/// Result type for metric source operations
pub type MetricResult<T> = Result<T, MetricError>;
