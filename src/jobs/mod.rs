// ABOUTME: Fetch-and-send jobs run by the scheduler and the manual triggers
// ABOUTME: Heart rate cycle with UI-facing display state, and the sequential daily summary job
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Heart rate fetch-and-send cycle
pub mod heart_rate;
/// Daily summary job
pub mod summary;

pub use heart_rate::{CycleOutcome, HeartRateCycle, HeartRateDisplay};
pub use summary::{SummaryJob, SummaryOutcome, SummaryStage};
