// ABOUTME: Monitoring settings and the live configuration store that gates the scheduler
// ABOUTME: Watch-channel backed store with validated interval updates and change notification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ConfigError;
use crate::constants::monitoring;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// The three persisted monitoring settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Minutes between real-time heart rate transmissions (1-60)
    pub transmission_interval_minutes: u32,
    /// Whether the sampling scheduler is armed
    pub real_time_monitoring_enabled: bool,
    /// Whether the daily summary is enabled
    pub daily_summary_enabled: bool,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            transmission_interval_minutes: monitoring::DEFAULT_TRANSMISSION_INTERVAL_MINUTES,
            real_time_monitoring_enabled: monitoring::DEFAULT_REAL_TIME_MONITORING_ENABLED,
            daily_summary_enabled: monitoring::DEFAULT_DAILY_SUMMARY_ENABLED,
        }
    }
}

impl MonitoringConfig {
    /// Check an interval against the accepted range
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IntervalOutOfRange` outside 1-60 minutes
    pub const fn validate_interval(minutes: u32) -> Result<u32, ConfigError> {
        if minutes < monitoring::MIN_TRANSMISSION_INTERVAL_MINUTES
            || minutes > monitoring::MAX_TRANSMISSION_INTERVAL_MINUTES
        {
            return Err(ConfigError::IntervalOutOfRange { minutes });
        }
        Ok(minutes)
    }

    /// Time between two scheduler firings
    #[must_use]
    pub const fn transmission_interval(&self) -> Duration {
        Duration::from_secs(self.transmission_interval_minutes as u64 * 60)
    }
}

/// Live holder of `MonitoringConfig`.
///
/// Cloning shares the underlying channel. Subscribers are woken only when a
/// setter actually changes a value.
#[derive(Debug, Clone)]
pub struct ConfigurationStore {
    tx: Arc<watch::Sender<MonitoringConfig>>,
}

impl Default for ConfigurationStore {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(MonitoringConfig::default());
        Self { tx: Arc::new(tx) }
    }
}

impl ConfigurationStore {
    /// Create a store holding `initial`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IntervalOutOfRange` when the initial interval is outside 1-60 minutes
    pub fn new(initial: MonitoringConfig) -> Result<Self, ConfigError> {
        MonitoringConfig::validate_interval(initial.transmission_interval_minutes)?;
        let (tx, _rx) = watch::channel(initial);
        Ok(Self { tx: Arc::new(tx) })
    }

    /// Current settings
    #[must_use]
    pub fn snapshot(&self) -> MonitoringConfig {
        *self.tx.borrow()
    }

    /// Receiver notified on every change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<MonitoringConfig> {
        self.tx.subscribe()
    }

    /// Change the transmission interval; the scheduler picks it up on its next firing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::IntervalOutOfRange` outside 1-60 minutes
    pub fn set_transmission_interval_minutes(&self, minutes: u32) -> Result<(), ConfigError> {
        let minutes = MonitoringConfig::validate_interval(minutes)?;
        self.update(|config| {
            let changed = config.transmission_interval_minutes != minutes;
            config.transmission_interval_minutes = minutes;
            changed
        });
        Ok(())
    }

    /// Arm or disarm real-time monitoring
    pub fn set_real_time_monitoring(&self, enabled: bool) {
        self.update(|config| {
            let changed = config.real_time_monitoring_enabled != enabled;
            config.real_time_monitoring_enabled = enabled;
            changed
        });
    }

    /// Enable or disable the daily summary
    pub fn set_daily_summary(&self, enabled: bool) {
        self.update(|config| {
            let changed = config.daily_summary_enabled != enabled;
            config.daily_summary_enabled = enabled;
            changed
        });
    }

    fn update(&self, modify: impl FnOnce(&mut MonitoringConfig) -> bool) {
        let changed = self.tx.send_if_modified(modify);
        if changed {
            let config = self.snapshot();
            info!(
                interval_minutes = config.transmission_interval_minutes,
                real_time_monitoring = config.real_time_monitoring_enabled,
                daily_summary = config.daily_summary_enabled,
                "Monitoring configuration updated"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MonitoringConfig::default();
        assert_eq!(config.transmission_interval_minutes, 5);
        assert!(!config.real_time_monitoring_enabled);
        assert!(config.daily_summary_enabled);
        assert_eq!(config.transmission_interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_interval_bounds() {
        assert_eq!(MonitoringConfig::validate_interval(1), Ok(1));
        assert_eq!(MonitoringConfig::validate_interval(60), Ok(60));
        assert_eq!(
            MonitoringConfig::validate_interval(0),
            Err(ConfigError::IntervalOutOfRange { minutes: 0 })
        );
        assert!(MonitoringConfig::validate_interval(61).is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range_interval() {
        for minutes in [0, 61] {
            let initial = MonitoringConfig {
                transmission_interval_minutes: minutes,
                real_time_monitoring_enabled: true,
                daily_summary_enabled: true,
            };
            assert_eq!(
                ConfigurationStore::new(initial).err(),
                Some(ConfigError::IntervalOutOfRange { minutes })
            );
        }

        let store = ConfigurationStore::new(MonitoringConfig {
            transmission_interval_minutes: 1,
            ..MonitoringConfig::default()
        })
        .unwrap();
        assert_eq!(store.snapshot().transmission_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_rejected_interval_leaves_store_unchanged() {
        let store = ConfigurationStore::default();
        assert!(store.set_transmission_interval_minutes(90).is_err());
        assert_eq!(store.snapshot().transmission_interval_minutes, 5);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes_only() {
        let store = ConfigurationStore::default();
        let mut rx = store.subscribe();

        store.set_real_time_monitoring(false);
        assert!(!rx.has_changed().unwrap());

        store.set_real_time_monitoring(true);
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().real_time_monitoring_enabled);

        store.set_transmission_interval_minutes(10).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().transmission_interval_minutes, 10);
    }

    #[test]
    fn test_clones_share_state() {
        let store = ConfigurationStore::default();
        let other = store.clone();
        other.set_daily_summary(false);
        assert!(!store.snapshot().daily_summary_enabled);
    }
}
