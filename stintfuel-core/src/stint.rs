//! Stint tracker state machine
//!
//! Consumes successive validated snapshots and detects stint start, refuel
//! events and lap completions, feeding accepted per-lap consumptions into
//! the `LapHistory`. Owns all stint state exclusively; other components
//! only read from it within a tick.

use crate::flags::FlagMask;
use crate::history::LapHistory;
use crate::snapshot::ValidSnapshot;
use std::time::{Duration, Instant};

/// Fuel increase within one tick treated as a tank refill, liters
pub const REFUEL_THRESHOLD_L: f64 = 0.3;

/// Minimum stint progress (laps) before the live estimate is trusted
pub const MIN_PROGRESS: f64 = 0.05;

/// How long the refuel annotation stays on the status output
const PIT_HOLD: Duration = Duration::from_secs(4);

/// Anchor captured at stint start. Replaced wholesale on refuel/reset,
/// never mutated in place.
#[derive(Debug, Clone, Copy)]
pub struct StintState {
    /// Fuel level observed at stint start, liters
    pub fuel_at_start: f64,
    pub lap_at_start: i32,
    pub lap_dist_at_start: f64,
    pub started_at: Instant,
}

#[derive(Debug)]
pub struct StintTracker {
    stint: Option<StintState>,
    last_fuel: Option<f64>,
    last_lap: Option<i32>,
    lap_start_fuel: Option<f64>,
    last_lap_used: Option<f64>,
    pit_hold_until: Option<Instant>,
    history: LapHistory,
    yellow_mask: FlagMask,
}

impl StintTracker {
    pub fn new(yellow_mask: FlagMask) -> Self {
        Self {
            stint: None,
            last_fuel: None,
            last_lap: None,
            lap_start_fuel: None,
            last_lap_used: None,
            pit_hold_until: None,
            history: LapHistory::new(),
            yellow_mask,
        }
    }

    /// Process one validated snapshot.
    ///
    /// `now` is the single time reading for this tick and is reused for
    /// every timing decision inside it.
    pub fn update(&mut self, now: Instant, s: &ValidSnapshot) {
        if self.stint.is_none() {
            self.stint = Some(StintState {
                fuel_at_start: s.fuel_level,
                lap_at_start: s.lap,
                lap_dist_at_start: s.lap_dist_pct,
                started_at: now,
            });
            self.last_fuel = Some(s.fuel_level);
            self.last_lap = Some(s.lap);
            self.lap_start_fuel = Some(s.fuel_level);
            return;
        }

        // Refuel: a tank fill shows up as a fuel increase between ticks.
        // Consumption data from before the fill describes a different fuel
        // load, so the stint re-anchors and the history starts over.
        if let Some(last_fuel) = self.last_fuel {
            if s.fuel_level - last_fuel >= REFUEL_THRESHOLD_L {
                self.pit_hold_until = Some(now + PIT_HOLD);
                self.stint = Some(StintState {
                    fuel_at_start: s.fuel_level,
                    lap_at_start: s.lap,
                    lap_dist_at_start: s.lap_dist_pct,
                    started_at: now,
                });
                self.lap_start_fuel = Some(s.fuel_level);
                self.last_lap_used = None;
                self.history.clear();
            }
        }

        // Lap completion
        if let (Some(last_lap), Some(lap_start_fuel)) = (self.last_lap, self.lap_start_fuel) {
            if s.lap > last_lap {
                let progress = self.progress(s.lap, s.lap_dist_pct);
                let lap_used = (lap_start_fuel - s.fuel_level).max(0.0);
                self.lap_start_fuel = Some(s.fuel_level);

                match progress {
                    // Less than a full lap of progress since stint start
                    // means the lap counter jumped; the fuel delta is noise.
                    Some(p) if p >= 1.0 => {
                        self.last_lap_used = Some(lap_used);
                        if lap_used > 0.0
                            && !self.yellow_mask.matches(s.session_flags)
                            && !self.history.is_anomalous(lap_used)
                        {
                            self.history.push(lap_used);
                        }
                    }
                    _ => self.last_lap_used = None,
                }
            }
        }

        self.last_fuel = Some(s.fuel_level);
        self.last_lap = Some(s.lap);
    }

    /// Fractional laps completed since stint start.
    ///
    /// Returns `None` when no stint exists or when the lap/lap-distance
    /// regressed relative to stint start (undefined rather than an error).
    pub fn progress(&self, lap: i32, lap_dist_pct: f64) -> Option<f64> {
        let stint = self.stint?;
        let progress =
            f64::from(lap - stint.lap_at_start) + (lap_dist_pct - stint.lap_dist_at_start);
        if progress < 0.0 {
            return None;
        }
        Some(progress)
    }

    /// Continuously updated consumption estimate for the in-progress stint,
    /// available once enough of a lap has been covered to be meaningful.
    pub fn live_estimate(&self, s: &ValidSnapshot) -> Option<f64> {
        let stint = self.stint?;
        let progress = self.progress(s.lap, s.lap_dist_pct)?;
        if progress < MIN_PROGRESS {
            return None;
        }
        let fuel_used = (stint.fuel_at_start - s.fuel_level).max(0.0);
        Some(fuel_used / progress)
    }

    /// Tear down all stint state and accumulated history
    pub fn reset(&mut self) {
        self.stint = None;
        self.last_fuel = None;
        self.last_lap = None;
        self.lap_start_fuel = None;
        self.last_lap_used = None;
        self.history.clear();
    }

    pub fn is_tracking(&self) -> bool {
        self.stint.is_some()
    }

    pub fn in_pit_hold(&self, now: Instant) -> bool {
        self.pit_hold_until.map(|until| now < until).unwrap_or(false)
    }

    pub fn history(&self) -> &LapHistory {
        &self.history
    }

    pub fn last_lap_used(&self) -> Option<f64> {
        self.last_lap_used
    }

    pub fn stint(&self) -> Option<&StintState> {
        self.stint.as_ref()
    }
}

impl Default for StintTracker {
    fn default() -> Self {
        Self::new(FlagMask::default())
    }
}
