//! Late-night window overlap.
//!
//! Minutes that fall inside the late-night window are reported separately
//! from the threshold buckets. Under the day-shift profile they are
//! late-night overtime; under the night-shift profile they are night-shift
//! minutes.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ShiftProfile, WorkInterval, minutes_between};

/// The late-night minutes of one work interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LateNightResult {
    /// Overlap with the window under the day-shift profile, zero otherwise.
    pub midnight_overtime_minutes: u32,
    /// Overlap with the window under the night-shift profile, zero otherwise.
    pub night_shift_minutes: u32,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Raw minutes of `[entry, exit)` that fall inside the daily window.
///
/// A window whose end is not after its start wraps past midnight, so the
/// default 22:00 to 05:00 window is `[d 22:00, d+1 05:00)` for every date `d`
/// the interval could touch. The rest allowance plays no part here.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::late_night_overlap_minutes;
/// use chrono::{NaiveDateTime, NaiveTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let start = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(5, 0, 0).unwrap();
///
/// let minutes = late_night_overlap_minutes(at("2026-04-01 09:00"), at("2026-04-02 04:30"), start, end);
/// assert_eq!(minutes, 390);
/// ```
pub fn late_night_overlap_minutes(
    entry: NaiveDateTime,
    exit: NaiveDateTime,
    window_start: NaiveTime,
    window_end: NaiveTime,
) -> u32 {
    let wraps = window_end <= window_start;
    let last = exit.date();
    let mut total = 0;
    let mut date = match entry.date().pred_opt() {
        Some(previous) => previous,
        None => {
            // The window opened before the first representable date.
            if wraps {
                total += minutes_between(entry, exit.min(entry.date().and_time(window_end)));
            }
            entry.date()
        }
    };

    loop {
        let next = date.succ_opt();
        let start = date.and_time(window_start);
        let end = match (wraps, next) {
            (true, Some(next)) => next.and_time(window_end),
            (true, None) => NaiveDateTime::MAX,
            (false, _) => date.and_time(window_end),
        };
        total += minutes_between(entry.max(start), exit.min(end));

        match next {
            Some(next) if next <= last => date = next,
            _ => break,
        }
    }

    total
}

/// Calculates the late-night minutes of one interval under a profile.
pub fn calculate_late_night(
    interval: &WorkInterval,
    profile: &ShiftProfile,
    step_number: u32,
) -> LateNightResult {
    let overlap = late_night_overlap_minutes(
        interval.entry,
        interval.exit,
        profile.night_window_start,
        profile.night_window_end,
    );

    let (midnight_overtime_minutes, night_shift_minutes) = if profile.is_night_shift {
        (0, overlap)
    } else {
        (overlap, 0)
    };

    let bucket = if profile.is_night_shift {
        "night-shift"
    } else {
        "late-night overtime"
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "late_night_window".to_string(),
        rule_name: "Late-Night Window".to_string(),
        input: serde_json::json!({
            "assignment_id": interval.assignment_id,
            "entry": interval.entry.to_string(),
            "exit": interval.exit.to_string(),
            "window_start": profile.night_window_start.to_string(),
            "window_end": profile.night_window_end.to_string(),
            "is_night_shift": profile.is_night_shift
        }),
        output: serde_json::json!({
            "midnight_overtime_minutes": midnight_overtime_minutes,
            "night_shift_minutes": night_shift_minutes
        }),
        reasoning: format!(
            "{} minutes inside {}-{} counted as {}",
            overlap, profile.night_window_start, profile.night_window_end, bucket
        ),
    };

    LateNightResult {
        midnight_overtime_minutes,
        night_shift_minutes,
        audit_step,
    }
}
