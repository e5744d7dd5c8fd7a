//! Lap-count projection
//!
//! Pure function of the current fuel level, the smoothed consumption
//! average and the driver's target. Every derived quantity is an explicit
//! `Option` so "no data yet" can never be mistaken for a computed zero.
//! Nothing here fails; unmet preconditions just degrade to "no guidance".

use serde::{Deserialize, Serialize};

/// Target-vs-actual comparison of the two lap counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    /// Using less fuel than planned, will do at least one more lap
    Ahead,
    OnPace,
    /// Using more fuel than planned, will fall at least one lap short
    Behind,
}

/// Derived lap-count quantities for one tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Projection {
    /// Fractional laps possible on the current fuel at the actual average
    pub remaining_laps: Option<f64>,

    /// Whole laps achievable at the actual average ("E")
    pub estimated_laps: Option<u32>,

    /// Whole laps achievable at the target rate ("C")
    pub planned_laps: Option<u32>,

    pub pace: Option<PaceStatus>,

    /// Liters per lap required to complete exactly one more lap than estimated
    pub plus_one_target: Option<f64>,

    /// Liters per lap required to complete one lap fewer (never below one lap)
    pub minus_one_target: Option<f64>,

    /// Liters per lap to save relative to the target to gain a lap on the plan
    pub save_for_plus_one: Option<f64>,

    /// Liters per lap to spend over the target to lose a lap on the plan
    pub spend_for_minus_one: Option<f64>,
}

/// Compute the projection for one tick.
///
/// `avg_per_lap` and `target` are in liters; either may be absent, which
/// leaves the dependent fields absent.
pub fn project(fuel_level: f64, avg_per_lap: Option<f64>, target: Option<f64>) -> Projection {
    let mut out = Projection::default();

    if let Some(avg) = avg_per_lap.filter(|a| *a > 0.0) {
        let remaining = fuel_level / avg;
        let estimated = floor_laps(remaining);
        out.remaining_laps = Some(remaining);
        out.estimated_laps = Some(estimated);

        out.plus_one_target = Some(fuel_level / f64::from(estimated + 1));
        if estimated >= 1 {
            let minus_laps = (estimated - 1).max(1);
            out.minus_one_target = Some(fuel_level / f64::from(minus_laps));
        }
    }

    if let Some(target) = target.filter(|t| *t > 0.0) {
        let planned = floor_laps(fuel_level / target);
        out.planned_laps = Some(planned);

        if let Some(estimated) = out.estimated_laps {
            out.pace = Some(if estimated >= planned + 1 {
                PaceStatus::Ahead
            } else if planned >= 1 && estimated <= planned - 1 {
                PaceStatus::Behind
            } else {
                PaceStatus::OnPace
            });
        }

        if planned >= 1 {
            let gain_lap_rate = fuel_level / f64::from(planned + 1);
            out.save_for_plus_one = Some((target - gain_lap_rate).max(0.0));
            if planned >= 2 {
                let lose_lap_rate = fuel_level / f64::from(planned - 1);
                out.spend_for_minus_one = Some((lose_lap_rate - target).max(0.0));
            }
        }
    }

    out
}

fn floor_laps(laps: f64) -> u32 {
    laps.floor().clamp(0.0, f64::from(u32::MAX)) as u32
}
