// ABOUTME: Metric source implementations for the VitalEdge relay
// ABOUTME: Async MetricSource trait with a live health-store source and a mock source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metric sources and the platform health store abstraction.
//!
//! The relay talks to one `MetricSource`, chosen once at startup:
//! `LiveSource` reads a `HealthStore`, `MockSource` fabricates readings for
//! environments without real data.

// Re-export core modules so source files can keep `use crate::errors::*`
pub use vitaledge_core::constants;
pub use vitaledge_core::errors;
pub use vitaledge_core::models;

/// `MetricSource` trait shared by every source
pub mod core;
/// Platform health store abstraction
pub mod health_store;
/// Source backed by a platform health store
pub mod live_source;
/// In-memory health store, loadable from a JSON export
pub mod memory_store;
/// Source returning fabricated readings
pub mod mock_source;
/// Day window helpers for cumulative queries
pub mod utils;

pub use crate::core::MetricSource;
pub use health_store::{HealthStore, HealthStoreError, AUTHORIZATION_READ_TYPES};
pub use live_source::LiveSource;
pub use memory_store::{AuthorizationPolicy, InMemoryHealthStore, StoredSample};
pub use mock_source::MockSource;
pub use utils::day_window;
