//! Lap consumption history
//!
//! An ordered sequence of accepted liters-per-lap values with anomaly
//! filtering and the averaging queries the projection engine consumes.
//! Single bad laps (off-track excursions, spins) are dropped silently so
//! they cannot poison the average.

/// Deviation from the running average at which a lap is rejected (30%)
pub const ANOMALY_THRESHOLD: f64 = 0.3;

/// Accepted entries required before the anomaly filter starts judging
const MIN_SAMPLES_FOR_FILTER: usize = 3;

/// Ordered per-lap consumption values, insertion order = completion order
#[derive(Debug, Clone, Default)]
pub struct LapHistory {
    laps: Vec<f64>,
}

impl LapHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an accepted lap consumption. The caller is expected to have
    /// run the yellow-flag and anomaly checks first.
    pub fn push(&mut self, lap_used: f64) {
        self.laps.push(lap_used);
    }

    pub fn clear(&mut self) {
        self.laps.clear();
    }

    pub fn len(&self) -> usize {
        self.laps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laps.is_empty()
    }

    /// Plain historical average, `None` while empty
    pub fn average(&self) -> Option<f64> {
        if self.laps.is_empty() {
            return None;
        }
        Some(self.laps.iter().sum::<f64>() / self.laps.len() as f64)
    }

    /// Whether a candidate lap consumption should be rejected.
    ///
    /// Non-positive values are always anomalous. With fewer than three
    /// accepted entries there is not enough data to judge, so nothing is
    /// rejected. Otherwise a lap deviating from the running average by 30%
    /// or more is anomalous.
    pub fn is_anomalous(&self, lap_used: f64) -> bool {
        if lap_used <= 0.0 {
            return true;
        }
        if self.laps.len() < MIN_SAMPLES_FOR_FILTER {
            return false;
        }
        let avg = match self.average() {
            Some(avg) if avg > 0.0 => avg,
            _ => return false,
        };
        (lap_used - avg).abs() / avg >= ANOMALY_THRESHOLD
    }

    /// Blend the discrete per-lap history with the continuously updated
    /// in-progress estimate. The in-progress lap gets the same weight as
    /// one completed lap.
    pub fn filtered_average(&self, live_estimate: Option<f64>) -> Option<f64> {
        match live_estimate {
            None => self.average(),
            Some(live) => {
                if self.laps.is_empty() {
                    Some(live)
                } else {
                    Some((self.laps.iter().sum::<f64>() + live) / (self.laps.len() + 1) as f64)
                }
            }
        }
    }

    /// Pure historical average, falling back to the given value while the
    /// history is empty. Used by the pit overlay, which should reflect
    /// completed-lap data rather than a partial live estimate.
    pub fn stint_average(&self, fallback: Option<f64>) -> Option<f64> {
        self.average().or(fallback)
    }
}
