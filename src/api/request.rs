//! Request types for the timecard API.
//!
//! This module defines the JSON request structure shared by the
//! `/timecard/compute` and `/timecard/export` endpoints.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::calculation::InMemoryTimesheet;
use crate::error::{EngineError, EngineResult};
use crate::models::WorkInterval;

/// Request body for the timecard endpoints.
///
/// Carries one worker's already-resolved timesheet for a month. Days may
/// include the first day of the following month so that overnight work on
/// the last day can be categorized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimecardRequest {
    /// The worker.
    pub worker_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Recorded days.
    #[serde(default)]
    pub days: Vec<DayRequest>,
}

/// One recorded day in a timecard request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRequest {
    /// The calendar date.
    pub date: NaiveDate,
    /// The attendance label, if recorded.
    #[serde(default)]
    pub attendance_type: Option<String>,
    /// Whether the worker is on the night-shift profile.
    #[serde(default)]
    pub night_shift: bool,
    /// Intervals clocked in on this day.
    #[serde(default)]
    pub intervals: Vec<IntervalRequest>,
}

/// A punched interval in a timecard request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalRequest {
    /// The work assignment.
    pub assignment_id: String,
    /// Clock-in timestamp.
    pub entry: NaiveDateTime,
    /// Clock-out timestamp.
    pub exit: NaiveDateTime,
}

impl TryFrom<IntervalRequest> for WorkInterval {
    type Error = EngineError;

    fn try_from(req: IntervalRequest) -> Result<Self, Self::Error> {
        WorkInterval::new(req.assignment_id, req.entry, req.exit)
    }
}

impl TimecardRequest {
    /// Builds the in-memory timesheet the engine reads from.
    ///
    /// Fails on the first interval whose exit is not after its entry.
    pub fn to_timesheet(&self) -> EngineResult<InMemoryTimesheet> {
        let mut timesheet = InMemoryTimesheet::new();
        for day in &self.days {
            if let Some(label) = &day.attendance_type {
                timesheet.set_attendance_label(&self.worker_id, day.date, label.clone());
            }
            timesheet.set_night_shift(&self.worker_id, day.date, day.night_shift);
            for interval in &day.intervals {
                let interval = WorkInterval::try_from(interval.clone())?;
                timesheet.push_interval(&self.worker_id, interval);
            }
        }
        Ok(timesheet)
    }
}
