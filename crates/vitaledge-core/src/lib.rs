// ABOUTME: Core types and constants for the VitalEdge health telemetry relay
// ABOUTME: Foundation crate with error handling, metric models, payloads, and wire constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # VitalEdge Core
//!
//! Foundation crate shared by the metric sources and the relay. It changes
//! rarely, so the heavier crates above it compile incrementally.
//!
//! ## Modules
//!
//! - **errors**: `MetricError` for fetches, `SendError` for deliveries
//! - **models**: `MetricKind`, `MetricSample`, `TelemetryPayload`, `Endpoint`
//! - **constants**: endpoint paths, defaults and mock readings
//! - **conversions**: float-to-integer truncation used on the wire

/// Error types for metric fetches and telemetry delivery
pub mod errors;

/// Wire paths, configuration defaults and fixed readings
pub mod constants;

/// Safe numeric conversions for payload fields
pub mod conversions;

/// Metric and payload models
pub mod models;
