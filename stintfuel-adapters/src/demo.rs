//! Demo source that generates synthetic stint telemetry for testing
//!
//! Simulates a race stint with a steady per-lap fuel burn, a ticking lap
//! counter and a periodic pit stop with a tank refill. Produces plausible
//! snapshots without requiring an actual simulator.

use anyhow::Result;
use chrono::Utc;
use stintfuel_core::{snapshot::TelemetrySnapshot, source::TelemetrySource, units::FuelUnit};
use std::time::Instant;

/// Lap time of the simulated circuit, seconds
const LAP_DURATION: f64 = 62.0;

/// Tank capacity, liters
const TANK_CAPACITY: f64 = 60.0;

/// Nominal consumption, liters per lap
const BASE_BURN: f64 = 2.2;

/// Laps between pit stops
const STINT_LAPS: u32 = 24;

/// Seconds on pit road on either side of the stint boundary
const PIT_WINDOW: f64 = 4.0;

/// iRacing green-flag bit, so the flag vocabulary has something realistic
const GREEN_FLAG: u32 = 0x0004;

/// Simple deterministic noise from a seed
fn noise(seed: f64) -> f64 {
    let x = (seed * 12.9898 + 78.233).sin() * 43_758.547;
    x - x.floor()
}

/// Small jitter centered around 0
fn jitter(seed: f64, amplitude: f64) -> f64 {
    (noise(seed) - 0.5) * 2.0 * amplitude
}

/// Per-lap burn with lap-to-lap variation, deterministic per lap number
fn lap_burn(lap: u32) -> f64 {
    BASE_BURN + jitter(f64::from(lap), 0.08)
}

pub struct DemoSource {
    active: bool,
    start_time: Option<Instant>,
}

impl DemoSource {
    pub fn new() -> Self {
        Self {
            active: false,
            start_time: None,
        }
    }

    fn generate_snapshot(&self) -> TelemetrySnapshot {
        let elapsed = self
            .start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0);

        let total_laps = elapsed / LAP_DURATION;
        let lap = total_laps as u32;
        let lap_dist_pct = total_laps - f64::from(lap);

        // Position within the current stint: the tank refills at every
        // STINT_LAPS boundary, which the engine sees as a fuel jump.
        let stint_lap = lap % STINT_LAPS;
        let burned: f64 = (0..stint_lap).map(lap_burn).sum();
        let fuel_level = (TANK_CAPACITY - burned - lap_burn(stint_lap) * lap_dist_pct).max(0.0);

        // On pit road for a few seconds around each stint boundary
        let lap_second = lap_dist_pct * LAP_DURATION;
        let on_pit_road = (stint_lap == 0 && lap > 0 && lap_second < PIT_WINDOW)
            || (stint_lap == STINT_LAPS - 1 && lap_second > LAP_DURATION - PIT_WINDOW);

        TelemetrySnapshot {
            timestamp: Utc::now(),
            source: "Demo".to_string(),
            fuel_level: Some(fuel_level),
            lap: Some(lap as i32),
            lap_dist_pct: Some(lap_dist_pct),
            on_track: Some(true),
            on_pit_road: Some(on_pit_road),
            session_flags: Some(GREEN_FLAG),
            display_unit: Some(FuelUnit::Liters),
        }
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySource for DemoSource {
    fn name(&self) -> &str {
        "Demo"
    }

    fn detect(&self) -> bool {
        true
    }

    fn start(&mut self) -> Result<()> {
        self.active = true;
        self.start_time = Some(Instant::now());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.active = false;
        self.start_time = None;
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<TelemetrySnapshot>> {
        if !self.active {
            return Ok(None);
        }
        Ok(Some(self.generate_snapshot()))
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
