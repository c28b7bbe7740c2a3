//! Payroll export rows.
//!
//! A [`TimecardReport`] is flattened into one row per assignment per day plus
//! a day-level roll-up row, which is the shape the payroll feed consumes.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{MinuteBuckets, TimecardReport};

/// One line of the payroll feed.
///
/// Categorized fields are `None` and `indeterminate` is set while the next
/// day's category is unknown; consumers must not read those as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollExportRow {
    /// The worker.
    pub worker_id: String,
    /// The day of record.
    pub date: NaiveDate,
    /// The assignment, or `None` for the day-level roll-up.
    pub assignment_id: Option<String>,
    /// Worked minutes after the rest allowance.
    pub work_minutes: u32,
    /// Overtime minutes.
    pub overtime_minutes: Option<u32>,
    /// Late-night minutes.
    pub midnight_overtime_minutes: u32,
    /// Non-statutory rest-day minutes.
    pub holiday_work_minutes: Option<u32>,
    /// Statutory rest-day minutes.
    pub legal_holiday_work_minutes: Option<u32>,
    /// Night-shift minutes.
    pub night_shift_minutes: u32,
    /// Whether categorized fields are withheld.
    pub indeterminate: bool,
    /// `work_minutes` in hours, two decimal places.
    pub work_hours: Decimal,
    /// `overtime_minutes` in hours, two decimal places.
    pub overtime_hours: Option<Decimal>,
}

impl PayrollExportRow {
    fn new(
        worker_id: &str,
        date: NaiveDate,
        assignment_id: Option<String>,
        buckets: &MinuteBuckets,
    ) -> Self {
        let overtime_minutes = buckets.overtime_minutes();
        Self {
            worker_id: worker_id.to_string(),
            date,
            assignment_id,
            work_minutes: buckets.work_minutes,
            overtime_minutes,
            midnight_overtime_minutes: buckets.midnight_overtime_minutes,
            holiday_work_minutes: buckets.holiday_work_minutes(),
            legal_holiday_work_minutes: buckets.legal_holiday_work_minutes(),
            night_shift_minutes: buckets.night_shift_minutes,
            indeterminate: buckets.is_indeterminate(),
            work_hours: minutes_to_hours(buckets.work_minutes),
            overtime_hours: overtime_minutes.map(minutes_to_hours),
        }
    }

    /// Flattens a report: for each worked day, the assignment rows followed by
    /// the roll-up row. Days without work are skipped.
    ///
    /// # Example
    ///
    /// ```
    /// use timecard_engine::calculation::InMemoryTimesheet;
    /// use timecard_engine::engine::TimecardEngine;
    /// use timecard_engine::models::PayrollExportRow;
    /// use chrono::NaiveDateTime;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap();
    /// let mut timesheet = InMemoryTimesheet::new();
    /// timesheet
    ///     .add_interval("w_001", "matter_01", at("2026-04-01 09:00"), at("2026-04-01 23:30"))
    ///     .unwrap();
    ///
    /// let engine = TimecardEngine::default();
    /// let report = engine.compute_month("w_001", 2026, 4, &timesheet).unwrap();
    /// let rows = PayrollExportRow::rows_for(&report);
    ///
    /// assert_eq!(rows.len(), 2);
    /// assert_eq!(rows[1].assignment_id, None);
    /// assert_eq!(rows[1].overtime_minutes, Some(360));
    /// ```
    pub fn rows_for(report: &TimecardReport) -> Vec<Self> {
        report
            .days
            .iter()
            .filter(|day| !day.assignments.is_empty())
            .flat_map(|day| {
                day.assignments
                    .iter()
                    .map(move |a| {
                        Self::new(
                            &report.worker_id,
                            day.date,
                            Some(a.assignment_id.clone()),
                            &a.buckets,
                        )
                    })
                    .chain(std::iter::once(Self::new(
                        &report.worker_id,
                        day.date,
                        None,
                        &day.total,
                    )))
            })
            .collect()
    }
}

/// Converts minutes to hours rounded half-up to two decimal places.
pub fn minutes_to_hours(minutes: u32) -> Decimal {
    (Decimal::from(minutes) / Decimal::from(60))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
