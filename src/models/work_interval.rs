//! Work interval model.
//!
//! A [`WorkInterval`] is one clock-in/clock-out pair recorded against a work
//! assignment ("matter"). Intervals may cross one midnight.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// One clock-in/clock-out pair.
///
/// The engine assumes `exit > entry`; [`WorkInterval::new`] is the validating
/// constructor used where raw punches enter the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkInterval {
    /// The work assignment the time was recorded against.
    pub assignment_id: String,
    /// Clock-in timestamp.
    pub entry: NaiveDateTime,
    /// Clock-out timestamp.
    pub exit: NaiveDateTime,
}

impl WorkInterval {
    /// Builds an interval, rejecting one whose exit is not after its entry.
    ///
    /// # Example
    ///
    /// ```
    /// use timecard_engine::models::WorkInterval;
    /// use chrono::NaiveDateTime;
    ///
    /// let entry = NaiveDateTime::parse_from_str("2026-04-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let exit = NaiveDateTime::parse_from_str("2026-04-01 17:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let interval = WorkInterval::new("matter_01", entry, exit).unwrap();
    /// assert_eq!(interval.raw_minutes(), 510);
    /// assert!(WorkInterval::new("matter_01", exit, entry).is_err());
    /// ```
    pub fn new(
        assignment_id: impl Into<String>,
        entry: NaiveDateTime,
        exit: NaiveDateTime,
    ) -> EngineResult<Self> {
        let assignment_id = assignment_id.into();
        if exit <= entry {
            return Err(EngineError::InvalidInterval {
                assignment_id,
                entry,
                exit,
            });
        }
        Ok(Self {
            assignment_id,
            entry,
            exit,
        })
    }

    /// The calendar day the interval belongs to (the day of clock-in).
    pub fn day_of_record(&self) -> NaiveDate {
        self.entry.date()
    }

    /// Total minutes between entry and exit.
    pub fn raw_minutes(&self) -> u32 {
        minutes_between(self.entry, self.exit)
    }

    /// The midnight that ends the day of record.
    ///
    /// Saturates at [`NaiveDateTime::MAX`] on the last representable date.
    pub fn next_midnight(&self) -> NaiveDateTime {
        self.day_of_record()
            .succ_opt()
            .map(start_of_day)
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// Whether any worked time falls after the day of record's midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.exit > self.next_midnight()
    }
}

/// Whole minutes from `start` to `end`, zero when `end` is not after `start`.
pub(crate) fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let minutes = (end - start).num_minutes();
    u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
}

/// 00:00 on the given date.
pub(crate) fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(chrono::NaiveTime::MIN)
}
