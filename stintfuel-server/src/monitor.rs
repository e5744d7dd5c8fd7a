//! Source lifecycle and engine tick loop
//!
//! This module handles:
//! - Polling sources for simulator detection
//! - Starting/stopping sources when simulators are detected/exit
//! - Polling the active source once per tick and feeding the engine
//! - Broadcasting engine output to subscribers

use crate::state::AppState;
use anyhow::Result;
use stintfuel_adapters::{DemoSource, IRacingSource};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{error, info, warn};

const DETECTION_INTERVAL: Duration = Duration::from_secs(1);
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Main monitor loop
pub async fn run(state: AppState) {
    // Register sources
    state
        .register_source(Box::new(IRacingSource::new()))
        .await;
    state.register_source(Box::new(DemoSource::new())).await;

    info!("Telemetry monitor started");

    let mut last_detection: Option<Instant> = None;

    loop {
        // One time reading per tick, reused for every timing decision
        let now = Instant::now();

        // Rate limit detection checks to once per second
        let due = last_detection
            .map(|last| now.duration_since(last) >= DETECTION_INTERVAL)
            .unwrap_or(true);
        if due {
            last_detection = Some(now);
            if let Err(e) = detection_cycle(&state).await {
                error!("Error in detection cycle: {}", e);
            }
        }

        if let Err(e) = tick_cycle(&state, now).await {
            error!("Error in tick cycle: {}", e);
        }

        sleep(POLL_INTERVAL).await;
    }
}

/// Check all sources for simulator detection
async fn detection_cycle(state: &AppState) -> Result<()> {
    let mut sources = state.sources.write().await;
    let mut active_source = state.active_source.write().await;

    // If we have an active source, check if it's still detected
    if let Some(ref active_name) = *active_source {
        if let Some(source) = sources.iter_mut().find(|s| s.name() == active_name) {
            if !source.detect() {
                info!("Simulator {} no longer detected, stopping source", active_name);
                if let Err(e) = source.stop() {
                    error!("Error stopping source {}: {}", active_name, e);
                }
                *active_source = None;
            }
            return Ok(());
        }
    }

    // No active source, look for detected simulators
    for source in sources.iter_mut() {
        if source.detect() && !source.is_active() {
            info!("Simulator {} detected, starting source", source.name());
            match source.start() {
                Ok(_) => {
                    *active_source = Some(source.name().to_string());
                    info!("Source {} started successfully", source.name());
                    break;
                }
                Err(e) => {
                    error!("Failed to start source {}: {}", source.name(), e);
                }
            }
        }
    }

    Ok(())
}

/// Poll the active source, run one engine tick and broadcast the output
async fn tick_cycle(state: &AppState, now: Instant) -> Result<()> {
    let active_name = {
        let active = state.active_source.read().await;
        active.clone()
    };

    // No source means no snapshot; the engine still ticks so subscribers
    // see the standby state.
    let snapshot = match active_name {
        None => None,
        Some(name) => {
            let mut sources = state.sources.write().await;
            match sources.iter_mut().find(|s| s.name() == name) {
                Some(source) => match source.poll() {
                    Ok(snapshot) => snapshot,
                    Err(e) => {
                        warn!("Error polling {}: {}", name, e);
                        None
                    }
                },
                None => None,
            }
        }
    };

    let output = {
        let mut engine = state.engine.write().await;
        engine.tick(now, snapshot.as_ref())
    };

    {
        let mut latest = state.latest_output.write().await;
        *latest = Some(output.clone());
    }

    // Ignore error if no receivers (they'll get the next output)
    let _ = state.output_tx.send(output);

    Ok(())
}
