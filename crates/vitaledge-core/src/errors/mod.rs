// ABOUTME: Error types for the VitalEdge relay pipeline
// ABOUTME: Splits failures into metric fetch errors and telemetry delivery errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Types
//!
//! Every failure in the pipeline travels through a `Result`:
//! - `MetricError` - authorization, unsupported data types and store query failures
//! - `SendError` - serialization, transport and non-200 responses
//!
//! "No data" is not an error. Fetches return `Ok(None)` for it.

/// Metric fetch errors
pub mod metric;

/// Telemetry delivery errors
pub mod transport;

pub use metric::{MetricError, MetricResult};
pub use transport::{SendError, SendResult};
