//! Configuration types for the timecard engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveTime;
use serde::Deserialize;

use crate::models::{
    DAY_SHIFT_THRESHOLD_MINUTES, DEFAULT_NIGHT_WINDOW_END, DEFAULT_NIGHT_WINDOW_START, DayCategory,
    NIGHT_SHIFT_THRESHOLD_MINUTES, ShiftProfile,
};

/// Default rest allowance deducted once per work interval.
pub const DEFAULT_REST_ALLOWANCE_MINUTES: u32 = 60;

/// Threshold and late-night window for one shift profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfileConfig {
    /// Minutes of work before the excess counts as overtime.
    pub standard_threshold_minutes: u32,
    /// Start of the late-night window.
    pub night_window_start: NaiveTime,
    /// End of the late-night window.
    pub night_window_end: NaiveTime,
}

impl ProfileConfig {
    /// Builds the immutable profile this configuration describes.
    pub fn to_profile(&self, is_night_shift: bool) -> ShiftProfile {
        ShiftProfile {
            standard_threshold_minutes: self.standard_threshold_minutes,
            night_window_start: self.night_window_start,
            night_window_end: self.night_window_end,
            is_night_shift,
        }
    }
}

/// The two canonical profiles.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProfilesConfig {
    /// Day-shift profile.
    pub day_shift: ProfileConfig,
    /// Night-shift profile.
    pub night_shift: ProfileConfig,
}

/// Engine constants from engine.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Rest allowance deducted from each interval's day-of-record portion.
    #[serde(default = "default_rest_allowance")]
    pub rest_allowance_minutes: u32,
    /// Shift profiles.
    pub profiles: ProfilesConfig,
}

fn default_rest_allowance() -> u32 {
    DEFAULT_REST_ALLOWANCE_MINUTES
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rest_allowance_minutes: DEFAULT_REST_ALLOWANCE_MINUTES,
            profiles: ProfilesConfig {
                day_shift: ProfileConfig {
                    standard_threshold_minutes: DAY_SHIFT_THRESHOLD_MINUTES,
                    night_window_start: DEFAULT_NIGHT_WINDOW_START,
                    night_window_end: DEFAULT_NIGHT_WINDOW_END,
                },
                night_shift: ProfileConfig {
                    standard_threshold_minutes: NIGHT_SHIFT_THRESHOLD_MINUTES,
                    night_window_start: DEFAULT_NIGHT_WINDOW_START,
                    night_window_end: DEFAULT_NIGHT_WINDOW_END,
                },
            },
        }
    }
}

/// An attendance label added to (or overriding) the built-in table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AttendanceLabelEntry {
    /// The raw label as recorded by the attendance system.
    pub label: String,
    /// The category the label maps to.
    pub category: DayCategory,
}

/// Attendance label configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AttendanceTypesConfig {
    /// Extra label mappings.
    #[serde(default)]
    pub attendance_types: Vec<AttendanceLabelEntry>,
}

/// The complete configuration loaded from a config directory.
#[derive(Debug, Clone, Default)]
pub struct TimecardConfig {
    engine: EngineConfig,
    attendance_types: Vec<AttendanceLabelEntry>,
}

impl TimecardConfig {
    /// Creates a new TimecardConfig from its component parts.
    pub fn new(engine: EngineConfig, attendance_types: Vec<AttendanceLabelEntry>) -> Self {
        Self {
            engine,
            attendance_types,
        }
    }

    /// Returns the engine constants.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the configured label mappings.
    pub fn attendance_types(&self) -> &[AttendanceLabelEntry] {
        &self.attendance_types
    }
}
