//! Fuel unit handling
//!
//! The engine computes everything in liters. Display values are converted
//! on the way out with a fixed factor (no locale lookup), and user input is
//! converted back to liters on the way in, so a unit-preference toggle never
//! drifts the stored value.

use serde::{Deserialize, Serialize};

/// 1 liter expressed in US gallons
pub const LITERS_TO_GALLONS: f64 = 0.264_172_052_4;

/// Unit the driver has chosen for fuel readouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelUnit {
    Liters,
    Gallons,
}

impl FuelUnit {
    /// Short label for readouts ("L" / "gal")
    pub fn label(&self) -> &'static str {
        match self {
            FuelUnit::Liters => "L",
            FuelUnit::Gallons => "gal",
        }
    }

    /// Convert an internal liters value into this unit
    pub fn from_liters(&self, liters: f64) -> f64 {
        match self {
            FuelUnit::Liters => liters,
            FuelUnit::Gallons => liters * LITERS_TO_GALLONS,
        }
    }

    /// Convert a value expressed in this unit back to liters
    pub fn to_liters(&self, value: f64) -> f64 {
        match self {
            FuelUnit::Liters => value,
            FuelUnit::Gallons => value / LITERS_TO_GALLONS,
        }
    }

    /// Map iRacing's `DisplayUnits` variable (0 = imperial, 1 = metric).
    /// Any other value means the preference is unknown and is ignored.
    pub fn from_iracing(raw: i32) -> Option<FuelUnit> {
        match raw {
            0 => Some(FuelUnit::Gallons),
            1 => Some(FuelUnit::Liters),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liters_unit_is_identity() {
        assert_eq!(FuelUnit::Liters.from_liters(12.5), 12.5);
        assert_eq!(FuelUnit::Liters.to_liters(12.5), 12.5);
    }

    #[test]
    fn test_gallons_round_trip_within_tolerance() {
        let liters = 57.3;
        let gallons = FuelUnit::Gallons.from_liters(liters);
        let back = FuelUnit::Gallons.to_liters(gallons);
        let rel = (back - liters).abs() / liters;
        assert!(rel < 1e-9, "round trip drifted by {}", rel);
    }

    #[test]
    fn test_gallons_conversion_factor() {
        let gallons = FuelUnit::Gallons.from_liters(1.0);
        assert!((gallons - 0.2641720524).abs() < 1e-12);
    }

    #[test]
    fn test_from_iracing_display_units() {
        assert_eq!(FuelUnit::from_iracing(0), Some(FuelUnit::Gallons));
        assert_eq!(FuelUnit::from_iracing(1), Some(FuelUnit::Liters));
        assert_eq!(FuelUnit::from_iracing(2), None);
        assert_eq!(FuelUnit::from_iracing(-1), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(FuelUnit::Liters.label(), "L");
        assert_eq!(FuelUnit::Gallons.label(), "gal");
    }
}
