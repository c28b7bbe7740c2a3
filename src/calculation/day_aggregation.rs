//! Day-level aggregation across work assignments.
//!
//! A worker may clock several intervals against different assignments on
//! one day. The threshold applies to the day as a whole, so the categorized
//! minutes are computed from day totals and then apportioned back to the
//! intervals that produced them.

use serde::{Deserialize, Serialize};

use crate::models::{
    AssignmentBuckets, AuditStep, Categorization, CategorizedMinutes, DayCategory, MinuteBuckets,
    ShiftProfile, WorkInterval,
};

use super::late_night::{LateNightResult, calculate_late_night};
use super::midnight_split::{MidnightSplit, split_at_midnight};
use super::minute_buckets::{categorization_step, categorize_minutes};

/// The buckets for one day of record, per assignment and in total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregation {
    /// Per-assignment buckets in first-clock-in order.
    pub assignments: Vec<AssignmentBuckets>,
    /// Sum of all assignments.
    pub total: MinuteBuckets,
    /// The audit steps recording this aggregation.
    pub audit_steps: Vec<AuditStep>,
}

struct IntervalPart<'a> {
    interval: &'a WorkInterval,
    split: MidnightSplit,
    late_night: LateNightResult,
}

/// Aggregates all intervals recorded on one day of record.
///
/// On a workday the day's total work is measured against the threshold. The
/// resulting crossover and overtime minutes are handed back to intervals
/// latest-first: each interval takes crossover minutes up to its next-day
/// work, then overtime up to the rest of its work. On a rest day there is
/// no threshold and each interval is categorized on its own.
///
/// If any interval runs into a next day whose category is unknown, every
/// assignment and the total are [`Categorization::Indeterminate`].
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::aggregate_day;
/// use timecard_engine::models::{DayCategory, ShiftProfile, WorkInterval};
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let intervals = vec![
///     WorkInterval::new("matter_01", at("2026-04-01 08:00"), at("2026-04-01 18:00")).unwrap(),
///     WorkInterval::new("matter_02", at("2026-04-01 19:00"), at("2026-04-01 20:30")).unwrap(),
/// ];
///
/// let day = aggregate_day(
///     &intervals,
///     DayCategory::Workday,
///     Some(DayCategory::Workday),
///     &ShiftProfile::day_shift(),
///     60,
///     1,
/// );
/// assert_eq!(day.total.overtime_minutes(), Some(120));
/// assert_eq!(day.assignments[0].buckets.overtime_minutes(), Some(90));
/// assert_eq!(day.assignments[1].buckets.overtime_minutes(), Some(30));
/// ```
pub fn aggregate_day(
    intervals: &[WorkInterval],
    category: DayCategory,
    next_day_category: Option<DayCategory>,
    profile: &ShiftProfile,
    rest_allowance_minutes: u32,
    step_number: u32,
) -> DayAggregation {
    if intervals.is_empty() {
        return DayAggregation {
            assignments: Vec::new(),
            total: MinuteBuckets::empty(),
            audit_steps: Vec::new(),
        };
    }

    let mut ordered: Vec<&WorkInterval> = intervals.iter().collect();
    ordered.sort_by_key(|interval| interval.entry);

    let mut step = step_number;
    let mut audit_steps = Vec::new();
    let mut parts = Vec::with_capacity(ordered.len());

    for interval in ordered {
        let split = split_at_midnight(interval, rest_allowance_minutes, step);
        let late_night = calculate_late_night(interval, profile, step + 1);
        step += 2;
        audit_steps.push(split.audit_step.clone());
        audit_steps.push(late_night.audit_step.clone());
        parts.push(IntervalPart {
            interval,
            split,
            late_night,
        });
    }

    let day_of_record_work: u32 = parts
        .iter()
        .map(|p| p.split.day_of_record_work_minutes)
        .sum();
    let next_day_work: u32 = parts.iter().map(|p| p.split.next_day_work_minutes).sum();

    let day_categorization = categorize_minutes(
        day_of_record_work,
        next_day_work,
        category,
        next_day_category,
        profile.standard_threshold_minutes,
    );
    audit_steps.push(categorization_step(
        step,
        "day",
        day_of_record_work,
        next_day_work,
        category,
        next_day_category,
        profile,
        &day_categorization,
    ));
    step += 1;

    let shares: Vec<Categorization> = match day_categorization {
        Categorization::Indeterminate => vec![Categorization::Indeterminate; parts.len()],
        Categorization::Resolved(_) if category.is_rest_day() => parts
            .iter()
            .map(|p| {
                categorize_minutes(
                    p.split.day_of_record_work_minutes,
                    p.split.next_day_work_minutes,
                    category,
                    next_day_category,
                    profile.standard_threshold_minutes,
                )
            })
            .collect(),
        Categorization::Resolved(day) => {
            let shares = apportion_latest_first(&parts, day, next_day_category);
            if parts.len() > 1 {
                audit_steps.push(apportionment_step(step, &parts, &shares));
            }
            shares.into_iter().map(Categorization::Resolved).collect()
        }
    };

    let mut assignments: Vec<AssignmentBuckets> = Vec::new();
    for (part, categorization) in parts.iter().zip(shares) {
        let buckets = MinuteBuckets {
            work_minutes: part.split.work_minutes(),
            exclude_minutes: part.split.exclude_minutes(),
            midnight_overtime_minutes: part.late_night.midnight_overtime_minutes,
            night_shift_minutes: part.late_night.night_shift_minutes,
            categorization,
        };
        match assignments
            .iter_mut()
            .find(|a| a.assignment_id == part.interval.assignment_id)
        {
            Some(existing) => existing.buckets = existing.buckets.merged_with(buckets),
            None => assignments.push(AssignmentBuckets {
                assignment_id: part.interval.assignment_id.clone(),
                buckets,
            }),
        }
    }

    let total = assignments
        .iter()
        .fold(MinuteBuckets::empty(), |acc, a| acc.merged_with(a.buckets));

    DayAggregation {
        assignments,
        total,
        audit_steps,
    }
}

fn apportion_latest_first(
    parts: &[IntervalPart<'_>],
    day: CategorizedMinutes,
    next_day_category: Option<DayCategory>,
) -> Vec<CategorizedMinutes> {
    let crossover_category = next_day_category.filter(|c| c.is_rest_day());
    let mut crossover_left = match crossover_category {
        Some(DayCategory::Holiday) => day.holiday_work_minutes,
        Some(DayCategory::LegalHoliday) => day.legal_holiday_work_minutes,
        _ => 0,
    };
    let mut overtime_left = day.overtime_minutes;

    let mut shares = vec![CategorizedMinutes::default(); parts.len()];
    for (part, share) in parts.iter().zip(shares.iter_mut()).rev() {
        let crossover = crossover_left.min(part.split.next_day_work_minutes);
        crossover_left -= crossover;
        let overtime = overtime_left.min(part.split.work_minutes() - crossover);
        overtime_left -= overtime;

        if let Some(category) = crossover_category {
            share.add_to(category, crossover);
        }
        share.overtime_minutes += overtime;
    }
    shares
}

fn apportionment_step(
    step_number: u32,
    parts: &[IntervalPart<'_>],
    shares: &[CategorizedMinutes],
) -> AuditStep {
    let rows: Vec<serde_json::Value> = parts
        .iter()
        .zip(shares)
        .map(|(part, share)| {
            serde_json::json!({
                "assignment_id": part.interval.assignment_id,
                "entry": part.interval.entry.to_string(),
                "overtime_minutes": share.overtime_minutes,
                "holiday_work_minutes": share.holiday_work_minutes,
                "legal_holiday_work_minutes": share.legal_holiday_work_minutes
            })
        })
        .collect();

    AuditStep {
        step_number,
        rule_id: "day_apportionment".to_string(),
        rule_name: "Day Apportionment".to_string(),
        input: serde_json::json!({ "intervals": parts.len() }),
        output: serde_json::json!({ "shares": rows }),
        reasoning: format!(
            "Day-level buckets handed back to {} intervals, latest clock-in first",
            parts.len()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn interval(assignment: &str, entry: (&str, &str), exit: (&str, &str)) -> WorkInterval {
        WorkInterval::new(
            assignment,
            make_datetime(entry.0, entry.1),
            make_datetime(exit.0, exit.1),
        )
        .unwrap()
    }

    fn aggregate(
        intervals: &[WorkInterval],
        category: DayCategory,
        next: Option<DayCategory>,
    ) -> DayAggregation {
        aggregate_day(intervals, category, next, &ShiftProfile::day_shift(), 60, 1)
    }

    #[test]
    fn test_no_intervals() {
        let day = aggregate(&[], DayCategory::Workday, None);
        assert!(day.assignments.is_empty());
        assert_eq!(day.total, MinuteBuckets::empty());
        assert!(day.audit_steps.is_empty());
    }

    #[test]
    fn test_single_interval_matches_direct_calculation() {
        let intervals = [interval(
            "matter_01",
            ("2026-04-01", "09:00:00"),
            ("2026-04-02", "04:30:00"),
        )];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Holiday));
        let direct = crate::calculation::calculate_minute_buckets(
            &intervals[0],
            DayCategory::Workday,
            Some(DayCategory::Holiday),
            &ShiftProfile::day_shift(),
            60,
            1,
        );
        assert_eq!(day.total, direct.buckets);
        assert_eq!(day.assignments.len(), 1);
    }

    #[test]
    fn test_threshold_applies_to_day_total() {
        let intervals = [
            interval("matter_01", ("2026-04-01", "08:00:00"), ("2026-04-01", "12:00:00")),
            interval("matter_02", ("2026-04-01", "13:00:00"), ("2026-04-01", "19:00:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Workday));

        // 180 + 300 worked against 450
        assert_eq!(day.total.work_minutes, 480);
        assert_eq!(day.total.overtime_minutes(), Some(30));
        assert_eq!(day.assignments[0].buckets.overtime_minutes(), Some(0));
        assert_eq!(day.assignments[1].buckets.overtime_minutes(), Some(30));
    }

    #[test]
    fn test_overtime_spills_to_earlier_interval() {
        let intervals = [
            interval("matter_01", ("2026-04-01", "08:00:00"), ("2026-04-01", "18:00:00")),
            interval("matter_02", ("2026-04-01", "19:00:00"), ("2026-04-01", "20:30:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Workday));

        assert_eq!(day.total.overtime_minutes(), Some(120));
        assert_eq!(day.assignments[0].buckets.overtime_minutes(), Some(90));
        assert_eq!(day.assignments[1].buckets.overtime_minutes(), Some(30));
    }

    #[test]
    fn test_crossover_goes_to_interval_that_crossed() {
        let intervals = [
            interval("matter_01", ("2026-04-01", "09:00:00"), ("2026-04-01", "13:00:00")),
            interval("matter_02", ("2026-04-01", "14:00:00"), ("2026-04-02", "04:30:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Holiday));

        assert_eq!(day.total.work_minutes, 990);
        assert_eq!(day.total.overtime_minutes(), Some(270));
        assert_eq!(day.total.holiday_work_minutes(), Some(270));

        let second = &day.assignments[1].buckets;
        assert_eq!(second.holiday_work_minutes(), Some(270));
        assert_eq!(second.overtime_minutes(), Some(270));
        assert_eq!(day.assignments[0].buckets.regular_minutes(), Some(180));
    }

    #[test]
    fn test_intervals_of_same_assignment_merge() {
        let intervals = [
            interval("matter_01", ("2026-04-01", "13:00:00"), ("2026-04-01", "19:00:00")),
            interval("matter_01", ("2026-04-01", "08:00:00"), ("2026-04-01", "12:00:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Workday));

        assert_eq!(day.assignments.len(), 1);
        assert_eq!(day.assignments[0].buckets.work_minutes, 480);
        assert_eq!(day.assignments[0].buckets.exclude_minutes, 120);
        assert_eq!(day.total, day.assignments[0].buckets);
    }

    #[test]
    fn test_assignments_in_first_clock_in_order() {
        let intervals = [
            interval("matter_02", ("2026-04-01", "13:00:00"), ("2026-04-01", "15:00:00")),
            interval("matter_01", ("2026-04-01", "08:00:00"), ("2026-04-01", "12:00:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, None);
        assert_eq!(day.assignments[0].assignment_id, "matter_01");
        assert_eq!(day.assignments[1].assignment_id, "matter_02");
    }

    #[test]
    fn test_rest_day_categorized_per_interval() {
        let intervals = [
            interval("matter_01", ("2026-04-04", "09:00:00"), ("2026-04-04", "13:00:00")),
            interval("matter_02", ("2026-04-04", "20:00:00"), ("2026-04-05", "02:00:00")),
        ];
        let day = aggregate(
            &intervals,
            DayCategory::LegalHoliday,
            Some(DayCategory::Workday),
        );

        assert_eq!(day.assignments[0].buckets.legal_holiday_work_minutes(), Some(180));
        assert_eq!(day.assignments[1].buckets.legal_holiday_work_minutes(), Some(180));
        assert_eq!(day.assignments[1].buckets.overtime_minutes(), Some(120));
        assert_eq!(day.total.legal_holiday_work_minutes(), Some(360));
        assert_eq!(day.total.overtime_minutes(), Some(120));
    }

    #[test]
    fn test_one_crossing_interval_makes_whole_day_indeterminate() {
        let intervals = [
            interval("matter_01", ("2026-04-30", "08:00:00"), ("2026-04-30", "12:00:00")),
            interval("matter_02", ("2026-04-30", "20:00:00"), ("2026-05-01", "02:00:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, None);

        assert!(day.total.is_indeterminate());
        assert!(day.assignments.iter().all(|a| a.buckets.is_indeterminate()));
        assert_eq!(day.total.work_minutes, 480);
        assert_eq!(day.total.midnight_overtime_minutes, 240);
    }

    #[test]
    fn test_apportionment_audit_step_recorded() {
        let intervals = [
            interval("matter_01", ("2026-04-01", "08:00:00"), ("2026-04-01", "18:00:00")),
            interval("matter_02", ("2026-04-01", "19:00:00"), ("2026-04-01", "20:30:00")),
        ];
        let day = aggregate(&intervals, DayCategory::Workday, Some(DayCategory::Workday));

        let last = day.audit_steps.last().unwrap();
        assert_eq!(last.rule_id, "day_apportionment");
        assert_eq!(last.step_number, 6);
        let numbers: Vec<u32> = day.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }
}
