//! Shift profile model.
//!
//! A [`ShiftProfile`] carries the standard threshold and late-night window that
//! apply to one worker on one day.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Standard threshold for the day-shift profile (7.5 hours).
pub const DAY_SHIFT_THRESHOLD_MINUTES: u32 = 450;

/// Standard threshold for the night-shift profile (15 hours).
pub const NIGHT_SHIFT_THRESHOLD_MINUTES: u32 = 900;

/// Start of the default late-night window.
pub const DEFAULT_NIGHT_WINDOW_START: NaiveTime = match NaiveTime::from_hms_opt(22, 0, 0) {
    Some(time) => time,
    None => panic!("invalid night window time"),
};

/// End of the default late-night window (on the following day).
pub const DEFAULT_NIGHT_WINDOW_END: NaiveTime = match NaiveTime::from_hms_opt(5, 0, 0) {
    Some(time) => time,
    None => panic!("invalid night window time"),
};

/// The working-hours standard applied to a worker on a given day.
///
/// # Example
///
/// ```
/// use timecard_engine::models::ShiftProfile;
///
/// let profile = ShiftProfile::day_shift();
/// assert_eq!(profile.standard_threshold_minutes, 450);
/// assert!(!profile.is_night_shift);
///
/// let profile = ShiftProfile::night_shift();
/// assert_eq!(profile.standard_threshold_minutes, 900);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftProfile {
    /// Minutes of work in a day before the excess counts as overtime.
    pub standard_threshold_minutes: u32,
    /// Start of the late-night window.
    pub night_window_start: NaiveTime,
    /// End of the late-night window; before the start means it ends the next day.
    pub night_window_end: NaiveTime,
    /// Whether this is the night-shift profile.
    pub is_night_shift: bool,
}

impl ShiftProfile {
    /// The canonical day-shift profile.
    pub fn day_shift() -> Self {
        Self {
            standard_threshold_minutes: DAY_SHIFT_THRESHOLD_MINUTES,
            night_window_start: DEFAULT_NIGHT_WINDOW_START,
            night_window_end: DEFAULT_NIGHT_WINDOW_END,
            is_night_shift: false,
        }
    }

    /// The canonical night-shift profile.
    pub fn night_shift() -> Self {
        Self {
            standard_threshold_minutes: NIGHT_SHIFT_THRESHOLD_MINUTES,
            night_window_start: DEFAULT_NIGHT_WINDOW_START,
            night_window_end: DEFAULT_NIGHT_WINDOW_END,
            is_night_shift: true,
        }
    }
}
