//! Minute bucket apportionment.
//!
//! This module applies the threshold and rest-day rules that divide worked
//! minutes into overtime, non-statutory holiday work, and statutory holiday
//! work, taking the category of both the day of record and the following
//! day into account.

use serde::{Deserialize, Serialize};

use crate::models::{
    AuditStep, Categorization, CategorizedMinutes, DayCategory, MinuteBuckets, ShiftProfile,
    WorkInterval,
};

use super::late_night::calculate_late_night;
use super::midnight_split::split_at_midnight;

/// The result of calculating the buckets for a single work interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCalculation {
    /// The calculated buckets.
    pub buckets: MinuteBuckets,
    /// The audit steps recording this calculation.
    pub audit_steps: Vec<AuditStep>,
}

/// Divides worked minutes into categorized buckets.
///
/// On a workday the excess over `threshold_minutes` is overtime, except that
/// up to `next_day_work_minutes` of it moves to the next day's rest-day
/// bucket when the next day is a rest day. On a rest day the day-of-record
/// minutes go to that day's bucket with no threshold, and the next-day
/// minutes go to overtime (next day is a workday) or the next day's bucket.
///
/// Returns [`Categorization::Indeterminate`] when there is next-day work and
/// `next_day_category` is unknown.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::categorize_minutes;
/// use timecard_engine::models::DayCategory;
///
/// let result = categorize_minutes(840, 270, DayCategory::Workday, Some(DayCategory::Holiday), 450);
/// let minutes = result.resolved().unwrap();
/// assert_eq!(minutes.overtime_minutes, 390);
/// assert_eq!(minutes.holiday_work_minutes, 270);
/// ```
pub fn categorize_minutes(
    day_of_record_work_minutes: u32,
    next_day_work_minutes: u32,
    category: DayCategory,
    next_day_category: Option<DayCategory>,
    threshold_minutes: u32,
) -> Categorization {
    let next_day_category = match (next_day_work_minutes, next_day_category) {
        (0, category) => category.unwrap_or_default(),
        (_, Some(category)) => category,
        (_, None) => return Categorization::Indeterminate,
    };

    let mut minutes = CategorizedMinutes::default();

    if category.is_rest_day() {
        minutes.add_to(category, day_of_record_work_minutes);
        minutes.add_to(next_day_category, next_day_work_minutes);
    } else {
        let work_minutes = day_of_record_work_minutes + next_day_work_minutes;
        let excess = work_minutes.saturating_sub(threshold_minutes);
        let crossover = if next_day_category.is_rest_day() {
            excess.min(next_day_work_minutes)
        } else {
            0
        };
        minutes.add_to(next_day_category, crossover);
        minutes.overtime_minutes += excess - crossover;
    }

    Categorization::Resolved(minutes)
}

/// Calculates the complete buckets for one interval on its own.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::calculate_minute_buckets;
/// use timecard_engine::models::{DayCategory, ShiftProfile, WorkInterval};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let interval = WorkInterval::new("matter_01", at("2026-04-01 09:00"), at("2026-04-01 23:30")).unwrap();
///
/// let result = calculate_minute_buckets(
///     &interval,
///     DayCategory::Workday,
///     Some(DayCategory::Workday),
///     &ShiftProfile::day_shift(),
///     60,
///     1,
/// );
/// assert_eq!(result.buckets.work_minutes, 810);
/// assert_eq!(result.buckets.overtime_minutes(), Some(360));
/// assert_eq!(result.buckets.midnight_overtime_minutes, 90);
/// ```
pub fn calculate_minute_buckets(
    interval: &WorkInterval,
    category: DayCategory,
    next_day_category: Option<DayCategory>,
    profile: &ShiftProfile,
    rest_allowance_minutes: u32,
    step_number: u32,
) -> BucketCalculation {
    let split = split_at_midnight(interval, rest_allowance_minutes, step_number);
    let late_night = calculate_late_night(interval, profile, step_number + 1);

    let categorization = categorize_minutes(
        split.day_of_record_work_minutes,
        split.next_day_work_minutes,
        category,
        next_day_category,
        profile.standard_threshold_minutes,
    );

    let buckets = MinuteBuckets {
        work_minutes: split.work_minutes(),
        exclude_minutes: split.exclude_minutes(),
        midnight_overtime_minutes: late_night.midnight_overtime_minutes,
        night_shift_minutes: late_night.night_shift_minutes,
        categorization,
    };

    let audit_steps = vec![
        split.audit_step,
        late_night.audit_step,
        categorization_step(
            step_number + 2,
            &interval.assignment_id,
            split.day_of_record_work_minutes,
            split.next_day_work_minutes,
            category,
            next_day_category,
            profile,
            &categorization,
        ),
    ];

    BucketCalculation {
        buckets,
        audit_steps,
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn categorization_step(
    step_number: u32,
    subject: &str,
    day_of_record_work_minutes: u32,
    next_day_work_minutes: u32,
    category: DayCategory,
    next_day_category: Option<DayCategory>,
    profile: &ShiftProfile,
    categorization: &Categorization,
) -> AuditStep {
    let next_label = next_day_category
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let (output, reasoning) = match categorization {
        Categorization::Indeterminate => (
            serde_json::json!({ "status": "indeterminate" }),
            format!(
                "{} minutes fall on the next day, whose category is not recorded yet; categorized buckets withheld",
                next_day_work_minutes
            ),
        ),
        Categorization::Resolved(minutes) => {
            let reasoning = if category.is_rest_day() {
                format!(
                    "{} day: {} minutes to its own bucket, {} next-day minutes follow {}",
                    category, day_of_record_work_minutes, next_day_work_minutes, next_label
                )
            } else {
                format!(
                    "Workday: {} minutes against {} minute threshold, next day {}",
                    day_of_record_work_minutes + next_day_work_minutes,
                    profile.standard_threshold_minutes,
                    next_label
                )
            };
            (
                serde_json::json!({
                    "status": "resolved",
                    "overtime_minutes": minutes.overtime_minutes,
                    "holiday_work_minutes": minutes.holiday_work_minutes,
                    "legal_holiday_work_minutes": minutes.legal_holiday_work_minutes
                }),
                reasoning,
            )
        }
    };

    AuditStep {
        step_number,
        rule_id: "minute_categorization".to_string(),
        rule_name: "Minute Categorization".to_string(),
        input: serde_json::json!({
            "subject": subject,
            "day_of_record_work_minutes": day_of_record_work_minutes,
            "next_day_work_minutes": next_day_work_minutes,
            "category": category,
            "next_day_category": next_day_category,
            "threshold_minutes": profile.standard_threshold_minutes
        }),
        output,
        reasoning,
    }
}
