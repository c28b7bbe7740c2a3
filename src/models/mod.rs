//! Core data models for the timecard engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod calendar_day;
mod export;
mod minute_buckets;
mod shift_profile;
mod work_interval;

pub use calculation_result::{
    AssignmentBuckets, AuditStep, AuditTrace, AuditWarning, DayReport, MonthlyTotals,
    TimecardReport,
};
pub use calendar_day::{AttendanceType, CalendarDay, DayCategory};
pub use export::{PayrollExportRow, minutes_to_hours};
pub use minute_buckets::{Categorization, CategorizedMinutes, MinuteBuckets};
pub use shift_profile::{
    DAY_SHIFT_THRESHOLD_MINUTES, DEFAULT_NIGHT_WINDOW_END, DEFAULT_NIGHT_WINDOW_START,
    NIGHT_SHIFT_THRESHOLD_MINUTES, ShiftProfile,
};
pub use work_interval::WorkInterval;
pub(crate) use work_interval::minutes_between;
