//! Collaborator lookups for the timecard engine.
//!
//! The engine does not read storage itself. Attendance labels, shift
//! schedules, and punched intervals arrive through the traits in this
//! module; [`InMemoryTimesheet`] implements all of them over plain maps.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::EngineResult;
use crate::models::WorkInterval;

/// Supplies the raw attendance label recorded against a worker's day.
pub trait AttendanceSource {
    /// The label for the day, or `None` if nothing has been recorded.
    fn attendance_label(&self, worker_id: &str, date: NaiveDate) -> Option<String>;
}

/// Supplies the shift schedule.
pub trait ShiftScheduleSource {
    /// Whether the worker is on the night-shift profile for the day.
    fn is_night_shift(&self, worker_id: &str, date: NaiveDate) -> bool;
}

/// Supplies punched work intervals.
pub trait WorkIntervalSource {
    /// The intervals whose day of record is `date`.
    fn work_intervals(&self, worker_id: &str, date: NaiveDate) -> Vec<WorkInterval>;
}

/// Everything the engine needs to compute a worker's days.
pub trait TimesheetSource: AttendanceSource + ShiftScheduleSource + WorkIntervalSource {}

impl<T> TimesheetSource for T where T: AttendanceSource + ShiftScheduleSource + WorkIntervalSource {}

type WorkerDay = (String, NaiveDate);

/// A timesheet held in memory.
///
/// Intervals are filed under their day of record, so an overnight interval
/// is returned for the day it started.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::{AttendanceSource, InMemoryTimesheet, WorkIntervalSource};
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
///
/// let mut timesheet = InMemoryTimesheet::new();
/// timesheet.set_attendance_label("w_001", date, "出勤");
/// timesheet
///     .add_interval("w_001", "matter_01", at("2026-04-01 22:00"), at("2026-04-02 06:00"))
///     .unwrap();
///
/// assert_eq!(timesheet.attendance_label("w_001", date).as_deref(), Some("出勤"));
/// assert_eq!(timesheet.work_intervals("w_001", date).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTimesheet {
    labels: HashMap<WorkerDay, String>,
    night_shifts: HashSet<WorkerDay>,
    intervals: HashMap<WorkerDay, Vec<WorkInterval>>,
}

impl InMemoryTimesheet {
    /// Creates an empty timesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the attendance label for a worker's day.
    pub fn set_attendance_label(
        &mut self,
        worker_id: &str,
        date: NaiveDate,
        label: impl Into<String>,
    ) {
        self.labels
            .insert((worker_id.to_string(), date), label.into());
    }

    /// Removes the attendance label for a worker's day.
    pub fn clear_attendance_label(&mut self, worker_id: &str, date: NaiveDate) {
        self.labels.remove(&(worker_id.to_string(), date));
    }

    /// Marks a worker's day as night shift or day shift.
    pub fn set_night_shift(&mut self, worker_id: &str, date: NaiveDate, is_night_shift: bool) {
        let key = (worker_id.to_string(), date);
        if is_night_shift {
            self.night_shifts.insert(key);
        } else {
            self.night_shifts.remove(&key);
        }
    }

    /// Validates and records a punched interval.
    pub fn add_interval(
        &mut self,
        worker_id: &str,
        assignment_id: &str,
        entry: NaiveDateTime,
        exit: NaiveDateTime,
    ) -> EngineResult<()> {
        let interval = WorkInterval::new(assignment_id, entry, exit)?;
        self.push_interval(worker_id, interval);
        Ok(())
    }

    /// Records an already-validated interval.
    pub fn push_interval(&mut self, worker_id: &str, interval: WorkInterval) {
        self.intervals
            .entry((worker_id.to_string(), interval.day_of_record()))
            .or_default()
            .push(interval);
    }
}

impl AttendanceSource for InMemoryTimesheet {
    fn attendance_label(&self, worker_id: &str, date: NaiveDate) -> Option<String> {
        self.labels.get(&(worker_id.to_string(), date)).cloned()
    }
}

impl ShiftScheduleSource for InMemoryTimesheet {
    fn is_night_shift(&self, worker_id: &str, date: NaiveDate) -> bool {
        self.night_shifts.contains(&(worker_id.to_string(), date))
    }
}

impl WorkIntervalSource for InMemoryTimesheet {
    fn work_intervals(&self, worker_id: &str, date: NaiveDate) -> Vec<WorkInterval> {
        self.intervals
            .get(&(worker_id.to_string(), date))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_overnight_interval_filed_under_day_of_record() {
        let mut timesheet = InMemoryTimesheet::new();
        timesheet
            .add_interval(
                "w_001",
                "matter_01",
                make_datetime("2026-04-01", "22:00:00"),
                make_datetime("2026-04-02", "06:00:00"),
            )
            .unwrap();

        assert_eq!(timesheet.work_intervals("w_001", make_date("2026-04-01")).len(), 1);
        assert!(timesheet.work_intervals("w_001", make_date("2026-04-02")).is_empty());
    }

    #[test]
    fn test_workers_are_kept_apart() {
        let mut timesheet = InMemoryTimesheet::new();
        let date = make_date("2026-04-01");
        timesheet.set_attendance_label("w_001", date, "法定休日");
        timesheet.set_night_shift("w_001", date, true);

        assert!(timesheet.attendance_label("w_002", date).is_none());
        assert!(!timesheet.is_night_shift("w_002", date));
        assert!(timesheet.is_night_shift("w_001", date));
    }

    #[test]
    fn test_night_shift_can_be_unset() {
        let mut timesheet = InMemoryTimesheet::new();
        let date = make_date("2026-04-01");
        timesheet.set_night_shift("w_001", date, true);
        timesheet.set_night_shift("w_001", date, false);
        assert!(!timesheet.is_night_shift("w_001", date));
    }

    #[test]
    fn test_label_can_be_cleared() {
        let mut timesheet = InMemoryTimesheet::new();
        let date = make_date("2026-04-01");
        timesheet.set_attendance_label("w_001", date, "出勤");
        timesheet.clear_attendance_label("w_001", date);
        assert!(timesheet.attendance_label("w_001", date).is_none());
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let mut timesheet = InMemoryTimesheet::new();
        let result = timesheet.add_interval(
            "w_001",
            "matter_01",
            make_datetime("2026-04-01", "17:00:00"),
            make_datetime("2026-04-01", "09:00:00"),
        );
        assert!(matches!(result, Err(EngineError::InvalidInterval { .. })));
        assert!(timesheet.work_intervals("w_001", make_date("2026-04-01")).is_empty());
    }
}
