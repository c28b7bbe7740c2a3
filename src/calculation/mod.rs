//! Calculation logic for the timecard engine.
//!
//! This module contains the rules that turn punched intervals into minute
//! buckets: attendance-day classification, shift profile resolution,
//! splitting at midnight, the late-night window, threshold and rest-day
//! apportionment, and aggregation across the assignments of a day.

mod day_aggregation;
mod day_classification;
mod late_night;
mod midnight_split;
mod minute_buckets;
mod shift_profile;
mod timesheet;

pub use day_aggregation::{DayAggregation, aggregate_day};
pub use day_classification::AttendanceDayClassifier;
pub use late_night::{LateNightResult, calculate_late_night, late_night_overlap_minutes};
pub use midnight_split::{MidnightSplit, split_at_midnight};
pub use minute_buckets::{BucketCalculation, calculate_minute_buckets, categorize_minutes};
pub use shift_profile::ShiftProfileResolver;
pub use timesheet::{
    AttendanceSource, InMemoryTimesheet, ShiftScheduleSource, TimesheetSource, WorkIntervalSource,
};
