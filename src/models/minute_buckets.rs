//! Minute bucket models.
//!
//! [`MinuteBuckets`] is the output of the engine for one (worker, day,
//! assignment) tuple. The mutually exclusive categorized portions of the work
//! minutes live in [`Categorization`], which is explicitly
//! [`Categorization::Indeterminate`] while the next day's category is unknown.

use serde::{Deserialize, Serialize};

use super::DayCategory;

/// The mutually exclusive categorized portions of the work minutes.
///
/// Together with the implicit regular portion they sum to the work minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedMinutes {
    /// Minutes beyond the standard threshold (or carried onto a workday).
    pub overtime_minutes: u32,
    /// Minutes worked on a non-statutory rest day.
    pub holiday_work_minutes: u32,
    /// Minutes worked on a statutory rest day.
    pub legal_holiday_work_minutes: u32,
}

impl CategorizedMinutes {
    /// Sum of all categorized minutes.
    pub fn total(&self) -> u32 {
        self.overtime_minutes + self.holiday_work_minutes + self.legal_holiday_work_minutes
    }

    /// Adds minutes to the bucket a day category feeds; workday time is overtime.
    pub(crate) fn add_to(&mut self, category: DayCategory, minutes: u32) {
        match category {
            DayCategory::Workday => self.overtime_minutes += minutes,
            DayCategory::Holiday => self.holiday_work_minutes += minutes,
            DayCategory::LegalHoliday => self.legal_holiday_work_minutes += minutes,
        }
    }

    fn merged_with(self, other: Self) -> Self {
        Self {
            overtime_minutes: self.overtime_minutes + other.overtime_minutes,
            holiday_work_minutes: self.holiday_work_minutes + other.holiday_work_minutes,
            legal_holiday_work_minutes: self.legal_holiday_work_minutes
                + other.legal_holiday_work_minutes,
        }
    }
}

/// Whether the categorized buckets could be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Categorization {
    /// All inputs were known.
    Resolved(CategorizedMinutes),
    /// Work crossed into a next day whose category has not been recorded yet.
    Indeterminate,
}

impl Categorization {
    /// Returns the categorized minutes when resolved.
    pub fn resolved(&self) -> Option<&CategorizedMinutes> {
        match self {
            Categorization::Resolved(minutes) => Some(minutes),
            Categorization::Indeterminate => None,
        }
    }
}

/// Categorized minute totals for one day of record.
///
/// # Example
///
/// ```
/// use timecard_engine::models::{Categorization, CategorizedMinutes, MinuteBuckets};
///
/// let buckets = MinuteBuckets {
///     work_minutes: 810,
///     exclude_minutes: 60,
///     midnight_overtime_minutes: 90,
///     night_shift_minutes: 0,
///     categorization: Categorization::Resolved(CategorizedMinutes {
///         overtime_minutes: 360,
///         ..Default::default()
///     }),
/// };
/// assert_eq!(buckets.overtime_minutes(), Some(360));
/// assert_eq!(buckets.regular_minutes(), Some(450));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBuckets {
    /// Worked minutes after the rest allowance.
    pub work_minutes: u32,
    /// Raw minutes removed by the rest allowance.
    pub exclude_minutes: u32,
    /// Raw minutes inside the late-night window (day-shift profile only).
    pub midnight_overtime_minutes: u32,
    /// Raw minutes inside the late-night window under the night-shift profile.
    pub night_shift_minutes: u32,
    /// Overtime and rest-day portions of `work_minutes`.
    pub categorization: Categorization,
}

impl MinuteBuckets {
    /// An all-zero, resolved bucket set.
    pub fn empty() -> Self {
        Self {
            work_minutes: 0,
            exclude_minutes: 0,
            midnight_overtime_minutes: 0,
            night_shift_minutes: 0,
            categorization: Categorization::Resolved(CategorizedMinutes::default()),
        }
    }

    /// True while the next day's category is unknown.
    pub fn is_indeterminate(&self) -> bool {
        matches!(self.categorization, Categorization::Indeterminate)
    }

    /// Overtime minutes, or `None` while indeterminate.
    pub fn overtime_minutes(&self) -> Option<u32> {
        self.categorization.resolved().map(|c| c.overtime_minutes)
    }

    /// Non-statutory rest-day minutes, or `None` while indeterminate.
    pub fn holiday_work_minutes(&self) -> Option<u32> {
        self.categorization.resolved().map(|c| c.holiday_work_minutes)
    }

    /// Statutory rest-day minutes, or `None` while indeterminate.
    pub fn legal_holiday_work_minutes(&self) -> Option<u32> {
        self.categorization
            .resolved()
            .map(|c| c.legal_holiday_work_minutes)
    }

    /// Work minutes not claimed by any category, or `None` while indeterminate.
    pub fn regular_minutes(&self) -> Option<u32> {
        self.categorization
            .resolved()
            .map(|c| self.work_minutes.saturating_sub(c.total()))
    }

    /// Adds two bucket sets; the result is indeterminate if either side is.
    pub fn merged_with(self, other: Self) -> Self {
        let categorization = match (self.categorization, other.categorization) {
            (Categorization::Resolved(a), Categorization::Resolved(b)) => {
                Categorization::Resolved(a.merged_with(b))
            }
            _ => Categorization::Indeterminate,
        };
        Self {
            work_minutes: self.work_minutes + other.work_minutes,
            exclude_minutes: self.exclude_minutes + other.exclude_minutes,
            midnight_overtime_minutes: self.midnight_overtime_minutes
                + other.midnight_overtime_minutes,
            night_shift_minutes: self.night_shift_minutes + other.night_shift_minutes,
            categorization,
        }
    }
}

impl Default for MinuteBuckets {
    fn default() -> Self {
        Self::empty()
    }
}
