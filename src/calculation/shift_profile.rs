//! Shift profile resolution.

use crate::models::ShiftProfile;

/// Selects the shift profile that applies to a worker on a day.
///
/// The night-shift flag comes from the shift schedule; the resolver only
/// chooses between the two configured profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftProfileResolver {
    day_shift: ShiftProfile,
    night_shift: ShiftProfile,
}

impl Default for ShiftProfileResolver {
    fn default() -> Self {
        Self::new(ShiftProfile::day_shift(), ShiftProfile::night_shift())
    }
}

impl ShiftProfileResolver {
    /// Creates a resolver over the given profiles.
    pub fn new(day_shift: ShiftProfile, night_shift: ShiftProfile) -> Self {
        Self {
            day_shift,
            night_shift,
        }
    }

    /// Returns the night-shift profile when `is_night_shift` is set, the day-shift profile otherwise.
    pub fn resolve(&self, is_night_shift: bool) -> ShiftProfile {
        if is_night_shift {
            self.night_shift
        } else {
            self.day_shift
        }
    }
}
