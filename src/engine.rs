//! The timecard engine.
//!
//! [`TimecardEngine`] drives the calculation pipeline for one worker: it
//! pulls labels, schedules, and intervals from a [`TimesheetSource`],
//! classifies the day of record and the following day, resolves the shift
//! profile, and aggregates the day's intervals into minute buckets.

use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    AttendanceDayClassifier, ShiftProfileResolver, TimesheetSource, aggregate_day,
};
use crate::config::{ConfigLoader, DEFAULT_REST_ALLOWANCE_MINUTES};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, CalendarDay, DayCategory, DayReport, MonthlyTotals,
    TimecardReport,
};

/// Warning code for an attendance label missing from the classification table.
pub const UNKNOWN_ATTENDANCE_TYPE: &str = "UNKNOWN_ATTENDANCE_TYPE";

/// The outcome of computing a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCalculation {
    /// The day's buckets.
    pub report: DayReport,
    /// The audit steps recording the calculation.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings raised while classifying the day.
    pub warnings: Vec<AuditWarning>,
}

/// Computes minute buckets for a worker's days and months.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::InMemoryTimesheet;
/// use timecard_engine::engine::TimecardEngine;
/// use timecard_engine::models::DayCategory;
/// use chrono::{NaiveDate, NaiveDateTime};
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
/// let date = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
///
/// let mut timesheet = InMemoryTimesheet::new();
/// timesheet.set_attendance_label("w_001", date.succ_opt().unwrap(), "法定外休日");
/// timesheet
///     .add_interval("w_001", "matter_01", at("2026-04-01 09:00"), at("2026-04-02 04:30"))
///     .unwrap();
///
/// let day = TimecardEngine::default().compute_day("w_001", date, &timesheet);
/// assert_eq!(day.report.next_day_category, Some(DayCategory::Holiday));
/// assert_eq!(day.report.total.overtime_minutes(), Some(390));
/// assert_eq!(day.report.total.holiday_work_minutes(), Some(270));
/// ```
#[derive(Debug, Clone)]
pub struct TimecardEngine {
    classifier: AttendanceDayClassifier,
    profiles: ShiftProfileResolver,
    rest_allowance_minutes: u32,
}

impl Default for TimecardEngine {
    fn default() -> Self {
        Self::new(
            AttendanceDayClassifier::default(),
            ShiftProfileResolver::default(),
            DEFAULT_REST_ALLOWANCE_MINUTES,
        )
    }
}

impl TimecardEngine {
    /// Creates an engine from its parts.
    pub fn new(
        classifier: AttendanceDayClassifier,
        profiles: ShiftProfileResolver,
        rest_allowance_minutes: u32,
    ) -> Self {
        Self {
            classifier,
            profiles,
            rest_allowance_minutes,
        }
    }

    /// Creates an engine from loaded configuration.
    pub fn from_config(config: &ConfigLoader) -> Self {
        Self::new(
            config.classifier(),
            config.profile_resolver(),
            config.rest_allowance_minutes(),
        )
    }

    /// The attendance classifier in use.
    pub fn classifier(&self) -> &AttendanceDayClassifier {
        &self.classifier
    }

    /// The rest allowance in minutes.
    pub fn rest_allowance_minutes(&self) -> u32 {
        self.rest_allowance_minutes
    }

    /// Computes one day of record.
    ///
    /// A missing label on the day itself means a workday. A missing or unset
    /// label on the following day leaves any work that crosses midnight
    /// pending. Unknown labels on either day raise a warning.
    pub fn compute_day<S>(&self, worker_id: &str, date: NaiveDate, sources: &S) -> DayCalculation
    where
        S: TimesheetSource + ?Sized,
    {
        self.compute_day_from(worker_id, date, sources, 1)
    }

    fn compute_day_from<S>(
        &self,
        worker_id: &str,
        date: NaiveDate,
        sources: &S,
        step_number: u32,
    ) -> DayCalculation
    where
        S: TimesheetSource + ?Sized,
    {
        let mut warnings = Vec::new();

        let label = sources.attendance_label(worker_id, date);
        self.check_label(worker_id, date, label.as_deref(), &mut warnings);
        let day = CalendarDay::new(date, label, &self.classifier);

        let next_date = date.succ_opt();
        let next_label = next_date.and_then(|next| sources.attendance_label(worker_id, next));
        if let Some(next) = next_date {
            self.check_label(worker_id, next, next_label.as_deref(), &mut warnings);
        }
        let next_day_category = if AttendanceDayClassifier::is_unrecorded(next_label.as_deref()) {
            None
        } else {
            Some(self.classifier.classify(next_label.as_deref()))
        };

        let night_shift = sources.is_night_shift(worker_id, date);
        let profile = self.profiles.resolve(night_shift);

        let classification_step = AuditStep {
            step_number,
            rule_id: "day_classification".to_string(),
            rule_name: "Attendance Day Classification".to_string(),
            input: serde_json::json!({
                "date": date.to_string(),
                "attendance_label": day.raw_attendance_type,
                "next_day_attendance_label": next_label,
                "night_shift": night_shift
            }),
            output: serde_json::json!({
                "category": day.category,
                "next_day_category": next_day_category,
                "threshold_minutes": profile.standard_threshold_minutes
            }),
            reasoning: format!(
                "{} classified as {}, next day {}",
                date,
                day.category,
                next_day_category
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "not recorded".to_string())
            ),
        };

        let intervals = sources.work_intervals(worker_id, date);
        let aggregation = aggregate_day(
            &intervals,
            day.category,
            next_day_category,
            &profile,
            self.rest_allowance_minutes,
            step_number + 1,
        );

        let report = DayReport {
            date,
            category: day.category,
            next_day_category,
            night_shift,
            assignments: aggregation.assignments,
            total: aggregation.total,
        };

        if report.is_indeterminate() {
            debug!(
                worker_id = %worker_id,
                date = %date,
                "Day pending next-day classification"
            );
        }

        let mut audit_steps = Vec::with_capacity(aggregation.audit_steps.len() + 1);
        audit_steps.push(classification_step);
        audit_steps.extend(aggregation.audit_steps);

        DayCalculation {
            report,
            audit_steps,
            warnings,
        }
    }

    fn check_label(
        &self,
        worker_id: &str,
        date: NaiveDate,
        label: Option<&str>,
        warnings: &mut Vec<AuditWarning>,
    ) {
        let Some(label) = label else {
            return;
        };
        if label.trim().is_empty() || self.classifier.lookup(label).is_some() {
            return;
        }
        warn!(
            worker_id = %worker_id,
            date = %date,
            label = %label,
            "Unknown attendance type, treating as workday"
        );
        warnings.push(AuditWarning {
            code: UNKNOWN_ATTENDANCE_TYPE.to_string(),
            message: format!(
                "Attendance type '{}' on {} is not recognized; classified as {}",
                label,
                date,
                DayCategory::Workday
            ),
            severity: "medium".to_string(),
        });
    }

    /// Computes every day of a calendar month.
    ///
    /// Returns [`EngineError::InvalidPeriod`] if `year`/`month` is not a valid month.
    pub fn compute_month<S>(
        &self,
        worker_id: &str,
        year: i32,
        month: u32,
        sources: &S,
    ) -> EngineResult<TimecardReport>
    where
        S: TimesheetSource + ?Sized,
    {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(EngineError::InvalidPeriod { year, month })?;

        let start_time = Instant::now();
        let mut days = Vec::new();
        let mut steps = Vec::new();
        let mut warnings = Vec::new();

        let mut date = first;
        while date.month() == month {
            let day = self.compute_day_from(worker_id, date, sources, steps.len() as u32 + 1);
            steps.extend(day.audit_steps);
            merge_warnings(&mut warnings, day.warnings);
            days.push(day.report);

            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        let report = assemble_report(worker_id, year, month, days, steps, warnings, start_time);

        info!(
            worker_id = %worker_id,
            year = year,
            month = month,
            days_worked = report.totals.days_worked,
            pending_days = report.pending_days.len(),
            warnings = report.audit_trace.warnings.len(),
            duration_us = report.audit_trace.duration_us,
            "Month computed"
        );

        Ok(report)
    }

    /// Recomputes the days of a report that were pending next-day classification.
    ///
    /// Resolved days are carried over unchanged. The result is a new report
    /// with its own calculation id; days whose next day is still unrecorded
    /// stay pending.
    pub fn recompute_pending<S>(&self, report: &TimecardReport, sources: &S) -> TimecardReport
    where
        S: TimesheetSource + ?Sized,
    {
        let start_time = Instant::now();
        let mut steps = report.audit_trace.steps.clone();
        let mut warnings = report.audit_trace.warnings.clone();
        let mut days = Vec::with_capacity(report.days.len());

        for day in &report.days {
            if day.is_indeterminate() {
                let recomputed = self.compute_day_from(
                    &report.worker_id,
                    day.date,
                    sources,
                    steps.len() as u32 + 1,
                );
                steps.extend(recomputed.audit_steps);
                merge_warnings(&mut warnings, recomputed.warnings);
                days.push(recomputed.report);
            } else {
                days.push(day.clone());
            }
        }

        let updated = assemble_report(
            &report.worker_id,
            report.year,
            report.month,
            days,
            steps,
            warnings,
            start_time,
        );

        info!(
            worker_id = %report.worker_id,
            previously_pending = report.pending_days.len(),
            still_pending = updated.pending_days.len(),
            "Pending days recomputed"
        );

        updated
    }
}

/// Appends warnings not already raised. A label is checked both as its own
/// day and as the previous day's next day.
fn merge_warnings(warnings: &mut Vec<AuditWarning>, new: Vec<AuditWarning>) {
    for warning in new {
        if !warnings.contains(&warning) {
            warnings.push(warning);
        }
    }
}

fn assemble_report(
    worker_id: &str,
    year: i32,
    month: u32,
    days: Vec<DayReport>,
    steps: Vec<AuditStep>,
    warnings: Vec<AuditWarning>,
    start_time: Instant,
) -> TimecardReport {
    let totals = MonthlyTotals::from_days(&days);
    let pending_days = days
        .iter()
        .filter(|d| d.is_indeterminate())
        .map(|d| d.date)
        .collect();

    TimecardReport {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        worker_id: worker_id.to_string(),
        year,
        month,
        days,
        totals,
        pending_days,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    }
}
