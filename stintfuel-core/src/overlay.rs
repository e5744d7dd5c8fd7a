//! Pit overlay trigger
//!
//! A timed latch: on pit-road entry it captures the stint's historical
//! average and exposes it for a fixed display window. An unknown previous
//! pit state is not a rising edge, so the very first sample after a
//! (re)connect can never trigger the overlay spuriously.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long the captured average stays up after pit entry
const OVERLAY_WINDOW: Duration = Duration::from_secs(10);

/// What the overlay currently shows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitOverlayView {
    /// Captured stint average, liters per lap; absent if there was no
    /// average at pit entry
    pub avg_per_lap: Option<f64>,

    /// Seconds left in the display window
    pub remaining_secs: f64,
}

#[derive(Debug, Default)]
pub struct PitOverlay {
    last_on_pit_road: Option<bool>,
    value: Option<f64>,
    until: Option<Instant>,
}

impl PitOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's pit-road state. On a false-to-true edge, capture
    /// the given stint average and arm the display window.
    pub fn update(&mut self, now: Instant, on_pit_road: Option<bool>, stint_avg: Option<f64>) {
        if on_pit_road == Some(true) && self.last_on_pit_road == Some(false) {
            self.value = stint_avg;
            self.until = Some(now + OVERLAY_WINDOW);
        }
        self.last_on_pit_road = on_pit_road;
    }

    /// The overlay content while the window is armed, `None` after expiry
    pub fn current(&self, now: Instant) -> Option<PitOverlayView> {
        let until = self.until?;
        if now >= until {
            return None;
        }
        Some(PitOverlayView {
            avg_per_lap: self.value,
            remaining_secs: (until - now).as_secs_f64(),
        })
    }

    /// Forget everything, including the previous pit-road state. Used on
    /// connectivity loss so the next sample cannot form an edge.
    pub fn reset(&mut self) {
        self.last_on_pit_road = None;
        self.value = None;
        self.until = None;
    }
}
