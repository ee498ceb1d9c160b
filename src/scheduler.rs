// ABOUTME: Recurring heart rate sampler gated by the live monitoring configuration
// ABOUTME: Idle/Armed state machine that spawns one IoT fetch-and-send cycle per timer firing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Sampling Scheduler
//!
//! The scheduler is `Armed` while real-time monitoring is enabled and `Idle`
//! otherwise, following the `ConfigurationStore` as it changes.
//!
//! While armed, the timer fires every `transmission_interval_minutes * 60`
//! seconds. The next deadline is computed from the interval read at the
//! moment of firing, so an interval change applies to the period after the
//! pending one. Disarming drops the pending deadline; re-arming starts a
//! fresh period. Periods missed while the runtime was stalled are skipped
//! rather than replayed.
//!
//! Each firing spawns one cycle and returns to the timer immediately. Cycles
//! are not coalesced: a slow cycle can still be in flight when the next one
//! starts.

use crate::config::ConfigurationStore;
use crate::jobs::HeartRateCycle;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};
use vitaledge_core::models::Endpoint;

/// Whether the timer is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// Real-time monitoring is disabled
    #[default]
    Idle,
    /// A firing is pending
    Armed,
}

/// Timer-driven producer of heart rate cycles
#[derive(Clone)]
pub struct SamplingScheduler {
    config: ConfigurationStore,
    cycle: HeartRateCycle,
    state: Arc<watch::Sender<SchedulerState>>,
    fired: Arc<AtomicU64>,
}

impl SamplingScheduler {
    /// Create an idle scheduler
    #[must_use]
    pub fn new(config: ConfigurationStore, cycle: HeartRateCycle) -> Self {
        let (state, _rx) = watch::channel(SchedulerState::Idle);
        Self {
            config,
            cycle,
            state: Arc::new(state),
            fired: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        *self.state.borrow()
    }

    /// Receiver notified on every state transition
    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<SchedulerState> {
        self.state.subscribe()
    }

    /// Number of timer firings so far
    #[must_use]
    pub fn fire_count(&self) -> u64 {
        self.fired.load(Ordering::Acquire)
    }

    /// Drive the timer until `shutdown` completes.
    ///
    /// Cycles already spawned keep running after this returns.
    pub async fn run<F>(&self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut rx = self.config.subscribe();
        let mut deadline: Option<Instant> = None;
        tokio::pin!(shutdown);

        debug!("Sampling scheduler started");
        loop {
            let config = *rx.borrow_and_update();
            match (config.real_time_monitoring_enabled, deadline) {
                (true, None) => {
                    deadline = Some(Instant::now() + config.transmission_interval());
                    self.state.send_replace(SchedulerState::Armed);
                    info!(
                        interval_minutes = config.transmission_interval_minutes,
                        "Real-time monitoring armed"
                    );
                }
                (false, Some(_)) => {
                    deadline = None;
                    self.state.send_replace(SchedulerState::Idle);
                    info!("Real-time monitoring disarmed");
                }
                _ => {}
            }

            if let Some(at) = deadline {
                tokio::select! {
                    () = &mut shutdown => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    () = sleep_until(at) => {
                        self.fire();
                        let interval = self.config.snapshot().transmission_interval();
                        let now = Instant::now();
                        let next = at + interval;
                        deadline = Some(if next > now { next } else { now + interval });
                    }
                }
            } else {
                tokio::select! {
                    () = &mut shutdown => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        }

        self.state.send_replace(SchedulerState::Idle);
        debug!(fired = self.fire_count(), "Sampling scheduler stopped");
    }

    fn fire(&self) {
        let count = self.fired.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(count, "Sampling timer fired");

        let cycle = self.cycle.clone();
        tokio::spawn(async move {
            cycle.run(Endpoint::IotHeartRate).await;
        });
    }
}
