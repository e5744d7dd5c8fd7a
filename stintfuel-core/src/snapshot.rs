//! Telemetry snapshot model
//!
//! A `TelemetrySnapshot` is what a source hands the engine each tick. Uses
//! `Option<T>` for every variable because not every source (or every moment
//! in a session) provides all of them; the engine decides completeness via
//! `validate()` and treats incomplete snapshots as standby.

use crate::units::FuelUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw per-tick sample as read from a telemetry source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    /// Timestamp when this snapshot was captured
    pub timestamp: DateTime<Utc>,

    /// Source name (e.g. "iRacing", "Demo")
    pub source: String,

    /// Fuel remaining in the tank, liters
    pub fuel_level: Option<f64>,

    /// Current lap number
    pub lap: Option<i32>,

    /// Position within the current lap, [0, 1)
    pub lap_dist_pct: Option<f64>,

    /// Whether the player car is on track
    pub on_track: Option<bool>,

    /// Whether the player car is on pit road
    pub on_pit_road: Option<bool>,

    /// Session flags bitmask (source-specific vocabulary)
    pub session_flags: Option<u32>,

    /// The driver's display-unit preference
    pub display_unit: Option<FuelUnit>,
}

/// Why a snapshot cannot drive the stint tracker
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("required telemetry field missing or unusable: {0}")]
    MissingField(&'static str),

    #[error("car is not on track")]
    NotOnTrack,
}

/// The complete view of a snapshot required to update the stint tracker
#[derive(Debug, Clone, Copy)]
pub struct ValidSnapshot {
    pub fuel_level: f64,
    pub lap: i32,
    pub lap_dist_pct: f64,
    pub on_pit_road: Option<bool>,
    pub session_flags: Option<u32>,
}

impl TelemetrySnapshot {
    /// Check that all fields the tracker depends on are present and sane.
    ///
    /// Pit road and session flags stay optional: their absence degrades
    /// behavior (no overlay trigger, permissive yellow check) rather than
    /// invalidating the tick.
    pub fn validate(&self) -> Result<ValidSnapshot, SnapshotError> {
        let fuel_level = self
            .fuel_level
            .filter(|f| f.is_finite() && *f >= 0.0)
            .ok_or(SnapshotError::MissingField("fuel_level"))?;
        let lap = self
            .lap
            .filter(|l| *l >= 0)
            .ok_or(SnapshotError::MissingField("lap"))?;
        let lap_dist_pct = self
            .lap_dist_pct
            .filter(|d| d.is_finite())
            .ok_or(SnapshotError::MissingField("lap_dist_pct"))?;

        if self.on_track != Some(true) {
            return Err(SnapshotError::NotOnTrack);
        }

        Ok(ValidSnapshot {
            fuel_level,
            lap,
            lap_dist_pct,
            on_pit_road: self.on_pit_road,
            session_flags: self.session_flags,
        })
    }
}
