// ABOUTME: Numeric conversions for payload fields
// ABOUTME: Truncates float readings into the integers the ingestion endpoints expect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Truncate a reading toward zero into a non-negative integer.
///
/// Negative and NaN inputs become 0; values beyond `u64::MAX` saturate.
/// `72.9` becomes `72`, never `73`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn truncate_to_u64(value: f64) -> u64 {
    if value.is_nan() {
        return 0;
    }
    value.max(0.0).min(u64::MAX as f64) as u64
}
