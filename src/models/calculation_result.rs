//! Calculation result models for the timecard engine.
//!
//! This module contains the per-day [`DayReport`], the monthly
//! [`TimecardReport`], and the audit trace types that record every rule the
//! engine applied.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DayCategory, MinuteBuckets};

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data that was handled by a fallback rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// Buckets for one work assignment on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentBuckets {
    /// The work assignment.
    pub assignment_id: String,
    /// The assignment's share of the day's buckets.
    pub buckets: MinuteBuckets,
}

/// The engine's output for one worker on one day of record.
///
/// `total` is the sum of `assignments`; both are indeterminate together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    /// The day of record.
    pub date: NaiveDate,
    /// Category of the day of record.
    pub category: DayCategory,
    /// Category of the following day, if recorded.
    pub next_day_category: Option<DayCategory>,
    /// Whether the night-shift profile applied.
    pub night_shift: bool,
    /// Per-assignment buckets in first-clock-in order.
    pub assignments: Vec<AssignmentBuckets>,
    /// Day-level roll-up.
    pub total: MinuteBuckets,
}

impl DayReport {
    /// True when the day must be recomputed once the next day is classified.
    pub fn is_indeterminate(&self) -> bool {
        self.total.is_indeterminate()
    }
}

/// Month-level sums over every resolved day.
///
/// Indeterminate days contribute their timestamp-derived minutes but no
/// categorized minutes; they are listed in [`TimecardReport::pending_days`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    /// Total worked minutes.
    pub work_minutes: u32,
    /// Total overtime minutes on resolved days.
    pub overtime_minutes: u32,
    /// Total late-night minutes.
    pub midnight_overtime_minutes: u32,
    /// Total non-statutory rest-day minutes on resolved days.
    pub holiday_work_minutes: u32,
    /// Total statutory rest-day minutes on resolved days.
    pub legal_holiday_work_minutes: u32,
    /// Total night-shift minutes.
    pub night_shift_minutes: u32,
    /// Number of days with any recorded work.
    pub days_worked: u32,
}

impl MonthlyTotals {
    /// Sums the day-level roll-ups of the given reports.
    pub fn from_days(days: &[DayReport]) -> Self {
        days.iter().fold(Self::default(), |mut totals, day| {
            let bucket = &day.total;
            totals.work_minutes += bucket.work_minutes;
            totals.midnight_overtime_minutes += bucket.midnight_overtime_minutes;
            totals.night_shift_minutes += bucket.night_shift_minutes;
            if let Some(categorized) = bucket.categorization.resolved() {
                totals.overtime_minutes += categorized.overtime_minutes;
                totals.holiday_work_minutes += categorized.holiday_work_minutes;
                totals.legal_holiday_work_minutes += categorized.legal_holiday_work_minutes;
            }
            if !day.assignments.is_empty() {
                totals.days_worked += 1;
            }
            totals
        })
    }
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The result of computing one worker's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimecardReport {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The worker the report is for.
    pub worker_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// One report per day of the month, in date order.
    pub days: Vec<DayReport>,
    /// Month-level sums.
    pub totals: MonthlyTotals,
    /// Days whose categorized buckets are withheld.
    pub pending_days: Vec<NaiveDate>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl TimecardReport {
    /// Looks up the report for a single date.
    pub fn day(&self, date: NaiveDate) -> Option<&DayReport> {
        self.days.iter().find(|d| d.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Categorization, CategorizedMinutes};

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn day_report(date: &str, total: MinuteBuckets) -> DayReport {
        DayReport {
            date: make_date(date),
            category: DayCategory::Workday,
            next_day_category: Some(DayCategory::Workday),
            night_shift: false,
            assignments: vec![AssignmentBuckets {
                assignment_id: "matter_01".to_string(),
                buckets: total,
            }],
            total,
        }
    }

    fn buckets(work: u32, overtime: u32, midnight: u32) -> MinuteBuckets {
        MinuteBuckets {
            work_minutes: work,
            exclude_minutes: 60,
            midnight_overtime_minutes: midnight,
            night_shift_minutes: 0,
            categorization: Categorization::Resolved(CategorizedMinutes {
                overtime_minutes: overtime,
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_monthly_totals_sum_resolved_days() {
        let days = vec![
            day_report("2026-04-01", buckets(450, 0, 0)),
            day_report("2026-04-02", buckets(810, 360, 90)),
        ];
        let totals = MonthlyTotals::from_days(&days);
        assert_eq!(totals.work_minutes, 1260);
        assert_eq!(totals.overtime_minutes, 360);
        assert_eq!(totals.midnight_overtime_minutes, 90);
        assert_eq!(totals.days_worked, 2);
    }

    #[test]
    fn test_monthly_totals_skip_categories_of_pending_days() {
        let pending = MinuteBuckets {
            categorization: Categorization::Indeterminate,
            ..buckets(1110, 0, 390)
        };
        let days = vec![
            day_report("2026-04-01", buckets(810, 360, 90)),
            day_report("2026-04-30", pending),
        ];
        let totals = MonthlyTotals::from_days(&days);
        assert_eq!(totals.work_minutes, 1920);
        assert_eq!(totals.overtime_minutes, 360);
        assert_eq!(totals.midnight_overtime_minutes, 480);
    }

    #[test]
    fn test_days_without_work_are_not_counted() {
        let mut idle = day_report("2026-04-03", MinuteBuckets::empty());
        idle.assignments.clear();
        let totals = MonthlyTotals::from_days(&[idle]);
        assert_eq!(totals.days_worked, 0);
    }

    #[test]
    fn test_day_report_serialization() {
        let report = day_report("2026-04-02", buckets(810, 360, 90));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"date\":\"2026-04-02\""));
        assert!(json.contains("\"category\":\"workday\""));
        assert!(json.contains("\"assignment_id\":\"matter_01\""));
        assert!(json.contains("\"work_minutes\":810"));

        let deserialized: DayReport = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, report);
    }

    #[test]
    fn test_audit_step_serialization() {
        let step = AuditStep {
            step_number: 1,
            rule_id: "cross_midnight_split".to_string(),
            rule_name: "Cross-Midnight Split".to_string(),
            input: serde_json::json!({"raw_minutes": 510}),
            output: serde_json::json!({"work_minutes": 450}),
            reasoning: "No midnight crossing".to_string(),
        };

        let json = serde_json::to_string(&step).unwrap();
        assert!(json.contains("\"step_number\":1"));
        assert!(json.contains("\"rule_id\":\"cross_midnight_split\""));
    }

    #[test]
    fn test_report_day_lookup() {
        let report = TimecardReport {
            calculation_id: Uuid::nil(),
            timestamp: DateTime::parse_from_rfc3339("2026-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            engine_version: "0.1.0".to_string(),
            worker_id: "w_001".to_string(),
            year: 2026,
            month: 4,
            days: vec![day_report("2026-04-02", buckets(810, 360, 90))],
            totals: MonthlyTotals::default(),
            pending_days: vec![],
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        };
        assert!(report.day(make_date("2026-04-02")).is_some());
        assert!(report.day(make_date("2026-04-03")).is_none());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"calculation_id\":\"00000000-0000-0000-0000-000000000000\""));
        assert!(json.contains("\"pending_days\":[]"));
    }
}
