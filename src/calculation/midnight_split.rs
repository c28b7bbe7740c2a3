//! Cross-midnight splitting functionality.
//!
//! This module splits a work interval at the midnight that ends its day of
//! record and applies the rest allowance to the day-of-record portion.

use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, WorkInterval};

/// The result of splitting one work interval at midnight.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::split_at_midnight;
/// use timecard_engine::models::WorkInterval;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let interval = WorkInterval::new("matter_01", at("2026-04-01 09:00"), at("2026-04-02 04:30")).unwrap();
///
/// let split = split_at_midnight(&interval, 60, 1);
/// assert_eq!(split.day_of_record_raw_minutes, 900);
/// assert_eq!(split.next_day_raw_minutes, 270);
/// assert_eq!(split.day_of_record_work_minutes, 840);
/// assert_eq!(split.next_day_work_minutes, 270);
/// assert_eq!(split.work_minutes(), 1110);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MidnightSplit {
    /// Raw minutes from entry to the end of the day of record (or to exit).
    pub day_of_record_raw_minutes: u32,
    /// Raw minutes after midnight.
    pub next_day_raw_minutes: u32,
    /// Day-of-record minutes after the rest allowance.
    pub day_of_record_work_minutes: u32,
    /// Next-day minutes; the rest allowance is never taken from this portion.
    pub next_day_work_minutes: u32,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

impl MidnightSplit {
    /// Total worked minutes.
    pub fn work_minutes(&self) -> u32 {
        self.day_of_record_work_minutes + self.next_day_work_minutes
    }

    /// Total raw minutes.
    pub fn raw_minutes(&self) -> u32 {
        self.day_of_record_raw_minutes + self.next_day_raw_minutes
    }

    /// Raw minutes removed by the rest allowance.
    pub fn exclude_minutes(&self) -> u32 {
        self.raw_minutes() - self.work_minutes()
    }

    /// Whether any work falls on the next calendar day.
    pub fn has_next_day_portion(&self) -> bool {
        self.next_day_raw_minutes > 0
    }
}

/// Splits an interval at midnight and deducts the rest allowance.
///
/// The rest allowance comes out of the day-of-record portion only and is
/// clamped so that portion never goes negative. An exit exactly at midnight
/// leaves no next-day portion. Anything past the first midnight counts as
/// next-day time.
pub fn split_at_midnight(
    interval: &WorkInterval,
    rest_allowance_minutes: u32,
    step_number: u32,
) -> MidnightSplit {
    let total_raw = interval.raw_minutes();

    let (day_of_record_raw_minutes, next_day_raw_minutes) = if interval.crosses_midnight() {
        let before = crate::models::minutes_between(interval.entry, interval.next_midnight());
        (before, total_raw.saturating_sub(before))
    } else {
        (total_raw, 0)
    };

    let day_of_record_work_minutes = day_of_record_raw_minutes.saturating_sub(rest_allowance_minutes);
    let next_day_work_minutes = next_day_raw_minutes;

    let reasoning = if next_day_raw_minutes > 0 {
        format!(
            "Interval crosses midnight: {} raw minutes on {} less {} minute rest allowance gives {}, plus {} minutes after midnight",
            day_of_record_raw_minutes,
            interval.day_of_record(),
            rest_allowance_minutes,
            day_of_record_work_minutes,
            next_day_work_minutes
        )
    } else {
        format!(
            "Interval within {}: {} raw minutes less {} minute rest allowance gives {}",
            interval.day_of_record(),
            day_of_record_raw_minutes,
            rest_allowance_minutes,
            day_of_record_work_minutes
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "midnight_split".to_string(),
        rule_name: "Cross-Midnight Split".to_string(),
        input: serde_json::json!({
            "assignment_id": interval.assignment_id,
            "entry": interval.entry.to_string(),
            "exit": interval.exit.to_string(),
            "rest_allowance_minutes": rest_allowance_minutes
        }),
        output: serde_json::json!({
            "day_of_record_raw_minutes": day_of_record_raw_minutes,
            "next_day_raw_minutes": next_day_raw_minutes,
            "day_of_record_work_minutes": day_of_record_work_minutes,
            "next_day_work_minutes": next_day_work_minutes
        }),
        reasoning,
    };

    MidnightSplit {
        day_of_record_raw_minutes,
        next_day_raw_minutes,
        day_of_record_work_minutes,
        next_day_work_minutes,
        audit_step,
    }
}
