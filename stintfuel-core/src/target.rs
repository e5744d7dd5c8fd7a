//! Target consumption state
//!
//! The driver enters a free-form numeric target in the currently displayed
//! unit. Internally the target is always liters, so a unit-preference
//! toggle rewrites the displayed text without changing the stored value.
//! Parse failure is "no target", never an error.

use crate::units::FuelUnit;

/// Decimal places used when the engine rewrites the target text
const DISPLAY_PRECISION: usize = 2;

#[derive(Debug, Clone)]
pub struct TargetState {
    /// Raw text as last entered or rewritten, in the display unit
    text: String,

    /// Locked target in liters, captured at lock time
    locked: Option<f64>,

    display_unit: FuelUnit,

    /// Whether a display-unit preference has been observed yet. The first
    /// observation adopts the unit without converting the existing text.
    unit_observed: bool,
}

impl TargetState {
    pub fn new() -> Self {
        Self {
            text: "2.50".to_string(),
            locked: None,
            display_unit: FuelUnit::Liters,
            unit_observed: false,
        }
    }

    pub fn display_unit(&self) -> FuelUnit {
        self.display_unit
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_locked(&self) -> bool {
        self.locked.is_some()
    }

    /// Replace the target text. Ignored while locked.
    pub fn set_text(&mut self, text: &str) {
        if self.locked.is_none() {
            self.text = text.to_string();
        }
    }

    /// Current text parsed into liters, `None` when unparsable
    pub fn parsed(&self) -> Option<f64> {
        self.parsed_with_unit(self.display_unit)
    }

    fn parsed_with_unit(&self, unit: FuelUnit) -> Option<f64> {
        let value: f64 = self.text.trim().parse().ok()?;
        Some(unit.to_liters(value))
    }

    /// The target in effect this tick: the locked value if locked,
    /// otherwise whatever the text parses to.
    pub fn effective(&self) -> Option<f64> {
        self.locked.or_else(|| self.parsed())
    }

    /// Toggle the lock. Locking with no parseable target is a no-op that
    /// leaves the lock off. Returns the resulting lock state.
    pub fn toggle_lock(&mut self) -> bool {
        if self.locked.is_some() {
            self.locked = None;
            false
        } else {
            match self.parsed() {
                Some(liters) => {
                    self.locked = Some(liters);
                    true
                }
                None => false,
            }
        }
    }

    /// Adopt a new display-unit preference, rewriting the displayed text so
    /// the underlying liters value is preserved. The first observed unit is
    /// adopted as-is since the existing text was entered against no known
    /// preference.
    pub fn set_display_unit(&mut self, unit: FuelUnit) {
        if !self.unit_observed {
            self.unit_observed = true;
            self.display_unit = unit;
            return;
        }
        if unit == self.display_unit {
            return;
        }
        let liters = self.parsed_with_unit(self.display_unit);
        self.display_unit = unit;
        if let Some(liters) = liters {
            self.text = format_value(unit.from_liters(liters));
        }
    }

    /// Overwrite the target with a computed liters value (the ±1-lap
    /// targets). Also updates the locked value when locked.
    pub fn apply(&mut self, liters: f64) {
        self.text = format_value(self.display_unit.from_liters(liters));
        if self.locked.is_some() {
            self.locked = Some(liters);
        }
    }
}

impl Default for TargetState {
    fn default() -> Self {
        Self::new()
    }
}

fn format_value(value: f64) -> String {
    format!("{:.*}", DISPLAY_PRECISION, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_parses() {
        let t = TargetState::new();
        assert_eq!(t.effective(), Some(2.5));
    }

    #[test]
    fn test_unparsable_text_is_no_target() {
        let mut t = TargetState::new();
        t.set_text("abc");
        assert_eq!(t.parsed(), None);
        assert_eq!(t.effective(), None);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let mut t = TargetState::new();
        t.set_text("  3.1 ");
        assert_eq!(t.parsed(), Some(3.1));
    }

    #[test]
    fn test_lock_captures_value() {
        let mut t = TargetState::new();
        t.set_text("3.00");
        assert!(t.toggle_lock());
        assert!(t.is_locked());

        // Text edits are ignored while locked
        t.set_text("9.99");
        assert_eq!(t.effective(), Some(3.0));

        assert!(!t.toggle_lock());
        assert!(!t.is_locked());
    }

    #[test]
    fn test_lock_with_unparseable_target_is_noop() {
        let mut t = TargetState::new();
        t.set_text("not a number");
        assert!(!t.toggle_lock());
        assert!(!t.is_locked());
    }

    #[test]
    fn test_first_unit_observation_keeps_text() {
        let mut t = TargetState::new();
        t.set_display_unit(FuelUnit::Gallons);
        assert_eq!(t.display_unit(), FuelUnit::Gallons);
        // "2.50" is now interpreted as gallons, not converted
        assert_eq!(t.text(), "2.50");
    }

    #[test]
    fn test_unit_toggle_rewrites_text_without_drift() {
        let mut t = TargetState::new();
        t.set_display_unit(FuelUnit::Liters);
        t.set_text("10.00");
        let liters_before = t.parsed().unwrap();

        t.set_display_unit(FuelUnit::Gallons);
        assert_eq!(t.text(), "2.64");
        // The underlying liters value only moves by display precision
        let liters_after = t.parsed().unwrap();
        assert!((liters_after - liters_before).abs() < 0.02);
    }

    #[test]
    fn test_redundant_unit_change_is_noop() {
        let mut t = TargetState::new();
        t.set_display_unit(FuelUnit::Liters);
        t.set_text("4.20");
        t.set_display_unit(FuelUnit::Liters);
        assert_eq!(t.text(), "4.20");
    }

    #[test]
    fn test_unit_change_with_unparseable_text_keeps_text() {
        let mut t = TargetState::new();
        t.set_display_unit(FuelUnit::Liters);
        t.set_text("oops");
        t.set_display_unit(FuelUnit::Gallons);
        assert_eq!(t.display_unit(), FuelUnit::Gallons);
        assert_eq!(t.text(), "oops");
    }

    #[test]
    fn test_apply_writes_display_unit_text() {
        let mut t = TargetState::new();
        t.set_display_unit(FuelUnit::Liters);
        t.apply(2.345);
        assert_eq!(t.text(), "2.35");
        assert!((t.effective().unwrap() - 2.35).abs() < 1e-9);
    }

    #[test]
    fn test_apply_updates_locked_value() {
        let mut t = TargetState::new();
        t.set_text("3.00");
        t.toggle_lock();
        t.apply(2.0);
        assert_eq!(t.effective(), Some(2.0));
        assert!(t.is_locked());
    }
}
