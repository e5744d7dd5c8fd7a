//! Engine facade
//!
//! `FuelEngine` threads one explicit state value through a synchronous
//! `tick(now, snapshot)` call: stint tracking, history, projection, target
//! and pit overlay all update in a single pass, and the returned
//! `EngineOutput` is the only data a presentation layer needs to render.
//! The engine never fails a tick; missing inputs degrade to absent outputs.

use crate::flags::FlagMask;
use crate::overlay::{PitOverlay, PitOverlayView};
use crate::projection::{project, Projection};
use crate::snapshot::TelemetrySnapshot;
use crate::stint::StintTracker;
use crate::target::TargetState;
use crate::units::FuelUnit;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Coarse engine state, rendered as the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineStatus {
    /// No usable telemetry this tick; stint state is torn down
    Standby,
    Tracking,
    /// A refuel was detected within the last few seconds
    PitHold,
}

/// Which of the cached ±1-lap targets to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LapAdjust {
    Plus,
    Minus,
}

/// Everything derived for one tick. Recomputed every tick, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOutput {
    pub timestamp: DateTime<Utc>,
    pub status: EngineStatus,
    pub display_unit: FuelUnit,

    /// Fuel remaining, liters
    pub fuel_level: Option<f64>,

    /// Smoothed consumption average, liters per lap
    pub avg_per_lap: Option<f64>,

    /// Consumption of the last completed lap, liters
    pub last_lap_used: Option<f64>,

    /// Target in effect this tick, liters per lap
    pub target: Option<f64>,
    pub target_locked: bool,

    /// Average minus target, liters per lap
    pub target_delta: Option<f64>,

    /// Whether the average is at or below the target
    pub within_target: Option<bool>,

    #[serde(flatten)]
    pub projection: Projection,

    pub pit_overlay: Option<PitOverlayView>,
}

pub struct FuelEngine {
    tracker: StintTracker,
    target: TargetState,
    overlay: PitOverlay,

    // ±1-lap targets from the most recent projection, kept so the apply
    // actions can use them between ticks
    plus_one_target: Option<f64>,
    minus_one_target: Option<f64>,
}

impl FuelEngine {
    pub fn new() -> Self {
        Self::with_flag_mask(FlagMask::default())
    }

    /// Build an engine with a custom yellow-flag vocabulary
    pub fn with_flag_mask(yellow_mask: FlagMask) -> Self {
        Self {
            tracker: StintTracker::new(yellow_mask),
            target: TargetState::new(),
            overlay: PitOverlay::new(),
            plus_one_target: None,
            minus_one_target: None,
        }
    }

    /// Process one tick.
    ///
    /// `now` is read once by the caller and reused for every timing
    /// decision within the tick. `None` means the telemetry source is
    /// unavailable; an incomplete snapshot is handled the same way except
    /// the pit-overlay edge state survives.
    pub fn tick(&mut self, now: Instant, snapshot: Option<&TelemetrySnapshot>) -> EngineOutput {
        let snapshot = match snapshot {
            Some(s) => s,
            None => {
                // Connectivity loss: consumption data from a disconnected
                // state cannot be trusted.
                self.tracker.reset();
                self.overlay.reset();
                self.plus_one_target = None;
                self.minus_one_target = None;
                return self.standby_output(Utc::now());
            }
        };

        if let Some(unit) = snapshot.display_unit {
            self.target.set_display_unit(unit);
        }

        let valid = match snapshot.validate() {
            Ok(v) => v,
            Err(_) => {
                self.tracker.reset();
                self.plus_one_target = None;
                self.minus_one_target = None;
                return self.standby_output(snapshot.timestamp);
            }
        };

        self.tracker.update(now, &valid);

        let live = self.tracker.live_estimate(&valid);
        let avg_per_lap = self.tracker.history().filtered_average(live);
        let target = self.target.effective();

        let projection = project(valid.fuel_level, avg_per_lap, target);
        self.plus_one_target = projection.plus_one_target;
        self.minus_one_target = projection.minus_one_target;

        self.overlay.update(
            now,
            valid.on_pit_road,
            self.tracker.history().stint_average(avg_per_lap),
        );

        let status = if self.tracker.in_pit_hold(now) {
            EngineStatus::PitHold
        } else {
            EngineStatus::Tracking
        };

        let target_delta = match (avg_per_lap, target) {
            (Some(avg), Some(target)) => Some(avg - target),
            _ => None,
        };
        let within_target = match (avg_per_lap, target) {
            (Some(avg), Some(target)) => Some(avg <= target),
            _ => None,
        };

        EngineOutput {
            timestamp: snapshot.timestamp,
            status,
            display_unit: self.target.display_unit(),
            fuel_level: Some(valid.fuel_level),
            avg_per_lap,
            last_lap_used: self.tracker.last_lap_used(),
            target,
            target_locked: self.target.is_locked(),
            target_delta,
            within_target,
            projection,
            pit_overlay: self.overlay.current(now),
        }
    }

    /// Replace the target text (interpreted in the display unit)
    pub fn set_target_text(&mut self, text: &str) {
        self.target.set_text(text);
    }

    pub fn target_text(&self) -> &str {
        self.target.text()
    }

    /// Toggle the target lock; returns the resulting lock state
    pub fn toggle_target_lock(&mut self) -> bool {
        self.target.toggle_lock()
    }

    pub fn is_target_locked(&self) -> bool {
        self.target.is_locked()
    }

    /// Overwrite the target with the most recently computed ±1-lap value.
    /// Returns false (and changes nothing) when that value is unavailable.
    pub fn apply_lap_adjust(&mut self, adjust: LapAdjust) -> bool {
        let value = match adjust {
            LapAdjust::Plus => self.plus_one_target,
            LapAdjust::Minus => self.minus_one_target,
        };
        match value {
            Some(liters) => {
                self.target.apply(liters);
                true
            }
            None => false,
        }
    }

    /// Force the tracker back to uninitialized, dropping all history
    pub fn manual_reset(&mut self) {
        self.tracker.reset();
    }

    fn standby_output(&self, timestamp: DateTime<Utc>) -> EngineOutput {
        EngineOutput {
            timestamp,
            status: EngineStatus::Standby,
            display_unit: self.target.display_unit(),
            fuel_level: None,
            avg_per_lap: None,
            last_lap_used: None,
            target: self.target.effective(),
            target_locked: self.target.is_locked(),
            target_delta: None,
            within_target: None,
            projection: Projection::default(),
            pit_overlay: None,
        }
    }
}

impl Default for FuelEngine {
    fn default() -> Self {
        Self::new()
    }
}
