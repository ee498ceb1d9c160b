// ABOUTME: Wire constants and configuration defaults for the VitalEdge relay
// ABOUTME: Endpoint paths, ingestion defaults, interval bounds and mock readings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Ingestion endpoint paths, resolved against the configured base URL
pub mod endpoints {
    /// Generic telemetry endpoint (heart rate and daily summaries)
    pub const TELEMETRY_PATH: &str = "/api/healthkit";

    /// IoT-specific heart rate endpoint (real-time monitoring)
    pub const IOT_HEART_RATE_PATH: &str = "/api/iot-heart-rate";

    /// Local development ingestion service
    pub const DEFAULT_INGEST_BASE_URL: &str = "http://localhost:3000";

    /// Content type sent with every payload
    pub const JSON_CONTENT_TYPE: &str = "application/json";
}

/// Payload defaults
pub mod payload {
    /// User identifier used when none is configured
    pub const DEFAULT_USER_ID: &str = "501";

    /// Heart rate placeholder written into daily summaries
    pub const SUMMARY_HEART_RATE_PLACEHOLDER: u64 = 0;
}

/// Monitoring configuration defaults and bounds
pub mod monitoring {
    /// Default transmission interval in minutes
    pub const DEFAULT_TRANSMISSION_INTERVAL_MINUTES: u32 = 5;

    /// Smallest accepted transmission interval in minutes
    pub const MIN_TRANSMISSION_INTERVAL_MINUTES: u32 = 1;

    /// Largest accepted transmission interval in minutes
    pub const MAX_TRANSMISSION_INTERVAL_MINUTES: u32 = 60;

    /// Real-time monitoring starts disabled
    pub const DEFAULT_REAL_TIME_MONITORING_ENABLED: bool = false;

    /// Daily summary starts enabled
    pub const DEFAULT_DAILY_SUMMARY_ENABLED: bool = true;
}

/// HTTP client timeouts
pub mod http {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default connection timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Fixed readings returned by the mock source
pub mod mock {
    /// Lower bound (inclusive) of mocked heart rate, beats per minute
    pub const HEART_RATE_MIN_BPM: f64 = 60.0;

    /// Upper bound (exclusive) of mocked heart rate, beats per minute
    pub const HEART_RATE_MAX_BPM: f64 = 100.0;

    /// Mocked daily step count
    pub const STEP_COUNT: f64 = 7500.0;

    /// Mocked daily active calories, kilocalories
    pub const ACTIVE_CALORIES_KCAL: f64 = 500.0;
}

/// Display messages shown in place of the last known heart rate
pub mod messages {
    /// Shown when the store has no heart rate sample
    pub const NO_HEART_RATE_DATA: &str = "No heart rate data available.";
}
