// ABOUTME: Data models for metric readings and outbound telemetry
// ABOUTME: Re-exports MetricKind, MetricSample, HealthDataType, TelemetryPayload and Endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `MetricKind`: the three measurements the relay handles
//! - `HealthDataType`: platform data types, including ones only requested for authorization
//! - `MetricSample`: one scalar reading taken at fetch time
//! - `TelemetryPayload`: the JSON record POSTed to the ingestion service
//! - `Endpoint`: which ingestion path a payload goes to

mod metric;
mod payload;

pub use metric::{HealthDataType, MetricKind, MetricSample};
pub use payload::{format_timestamp, Endpoint, TelemetryPayload};
