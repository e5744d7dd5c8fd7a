//! Session flag vocabulary
//!
//! The tracker only cares whether a lap ran under caution. Rather than
//! binding the engine to a specific telemetry SDK's flag enumeration, the
//! yellow/caution bits are passed in as a configuration value; the defaults
//! match iRacing's `SessionFlags` bit layout.

/// Individual iRacing session flag bits relevant to fuel tracking
pub const YELLOW: u32 = 0x0000_0008;
pub const YELLOW_WAVING: u32 = 0x0000_0100;
pub const CAUTION: u32 = 0x0000_4000;
pub const CAUTION_WAVING: u32 = 0x0000_8000;

/// Bitmask of session flags treated as yellow-flag conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMask(pub u32);

impl FlagMask {
    /// The iRacing yellow/caution bit set
    pub fn iracing_yellow() -> Self {
        FlagMask(YELLOW | YELLOW_WAVING | CAUTION | CAUTION_WAVING)
    }

    /// Whether the given session flags contain any masked bit.
    /// A missing flags value is treated as not-yellow (permissive default).
    pub fn matches(&self, session_flags: Option<u32>) -> bool {
        match session_flags {
            Some(flags) => flags & self.0 != 0,
            None => false,
        }
    }
}

impl Default for FlagMask {
    fn default() -> Self {
        Self::iracing_yellow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_flags_are_not_yellow() {
        assert!(!FlagMask::iracing_yellow().matches(None));
    }

    #[test]
    fn test_green_flags_are_not_yellow() {
        // Green = 0x4 in iRacing's layout
        assert!(!FlagMask::iracing_yellow().matches(Some(0x0004)));
        assert!(!FlagMask::iracing_yellow().matches(Some(0)));
    }

    #[test]
    fn test_each_caution_bit_matches() {
        let mask = FlagMask::iracing_yellow();
        assert!(mask.matches(Some(YELLOW)));
        assert!(mask.matches(Some(YELLOW_WAVING)));
        assert!(mask.matches(Some(CAUTION)));
        assert!(mask.matches(Some(CAUTION_WAVING)));
    }

    #[test]
    fn test_caution_bit_combined_with_others() {
        let mask = FlagMask::iracing_yellow();
        assert!(mask.matches(Some(0x0004 | CAUTION)));
    }

    #[test]
    fn test_custom_mask() {
        let mask = FlagMask(0x1);
        assert!(mask.matches(Some(0x1)));
        assert!(!mask.matches(Some(YELLOW)));
    }
}
