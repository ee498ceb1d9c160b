// ABOUTME: Time window helpers for daily cumulative metric queries
// ABOUTME: Computes the half-open interval from local midnight to the query instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, FixedOffset, NaiveTime, TimeZone, Utc};

/// Half-open window `[start_of_day(on), on)` in UTC.
///
/// The day boundary is midnight in `on`'s own offset.
#[must_use]
pub fn day_window(on: DateTime<FixedOffset>) -> (DateTime<Utc>, DateTime<Utc>) {
    let midnight = on.date_naive().and_time(NaiveTime::MIN);
    let start = on
        .offset()
        .from_local_datetime(&midnight)
        .single()
        .unwrap_or(on);
    (start.with_timezone(&Utc), on.with_timezone(&Utc))
}
