// ABOUTME: Command-line entry point for the VitalEdge relay
// ABOUTME: Runs real-time monitoring until Ctrl-C or fires a single summary or heart rate send
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # VitalEdge Relay Binary
//!
//! Loads configuration from the environment, applies command-line
//! overrides, and either runs the sampling scheduler or performs one manual
//! send.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use vitaledge_relay::{
    config::{RelayConfig, SourceKind},
    jobs::SummaryOutcome,
    logging,
    relay::VitalRelay,
};

#[derive(Parser)]
#[command(name = "vitaledge-relay")]
#[command(about = "VitalEdge Relay - relays heart rate, steps and calories to ingestion")]
struct Args {
    /// Metric source (mock or live)
    #[arg(long, global = true)]
    source: Option<SourceKind>,

    /// Transmission interval in minutes (1-60)
    #[arg(long, global = true)]
    interval: Option<u32>,

    /// Enable real-time monitoring
    #[arg(long, global = true)]
    real_time: bool,

    /// Override the ingestion base URL
    #[arg(long, global = true)]
    ingest_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Authorize, then run real-time monitoring until Ctrl-C
    Run,
    /// Send today's step count and active calories once
    SendSummary,
    /// Send the latest heart rate once
    SendHeartRate {
        /// Post to the generic telemetry endpoint instead of the IoT endpoint
        #[arg(long)]
        telemetry: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = RelayConfig::from_env()?;
    apply_overrides(&mut config, &args);

    logging::init_from_env()?;
    info!("{}", config.summary());

    let relay = VitalRelay::from_config(&config)?;
    relay.authorize().await;

    match args.command.unwrap_or(Command::Run) {
        Command::Run => run(&relay).await,
        Command::SendSummary => send_summary(&relay).await,
        Command::SendHeartRate { telemetry } => send_heart_rate(&relay, telemetry).await,
    }
}

fn apply_overrides(config: &mut RelayConfig, args: &Args) {
    if let Some(source) = args.source {
        config.source = source;
    }
    if let Some(minutes) = args.interval {
        config.monitoring.transmission_interval_minutes = minutes;
    }
    if args.real_time {
        config.monitoring.real_time_monitoring_enabled = true;
    }
    if let Some(url) = &args.ingest_url {
        config.ingest_url.clone_from(url);
    }
}

async fn run(relay: &VitalRelay) -> Result<()> {
    let monitoring = relay.configuration().snapshot();
    if !monitoring.real_time_monitoring_enabled {
        warn!("Real-time monitoring is disabled; waiting for Ctrl-C");
    }

    let handle = relay.start_monitoring(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
        }
    });
    handle.await.context("Sampling scheduler task failed")?;

    info!(
        fired = relay.scheduler().fire_count(),
        "Relay shut down"
    );
    Ok(())
}

async fn send_summary(relay: &VitalRelay) -> Result<()> {
    match relay.send_daily_summary().await {
        SummaryOutcome::Sent { payload } => {
            info!(
                step_count = ?payload.step_count,
                calories_burned = ?payload.calories_burned,
                "Daily summary delivered"
            );
            Ok(())
        }
        outcome => Err(anyhow::anyhow!("Daily summary not delivered: {outcome:?}")),
    }
}

async fn send_heart_rate(relay: &VitalRelay, telemetry: bool) -> Result<()> {
    let outcome = if telemetry {
        relay.fetch_and_send_heart_rate().await
    } else {
        relay.fetch_and_send_heart_rate_to_iot().await
    };
    info!("{}", relay.display());

    if outcome.is_sent() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Heart rate not delivered: {outcome:?}"))
    }
}
