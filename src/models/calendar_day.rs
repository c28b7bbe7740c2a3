//! Calendar day and attendance-type models.
//!
//! This module defines the three-way [`DayCategory`] that drives minute
//! apportionment, the [`AttendanceType`] labels recorded against a day, and the
//! [`CalendarDay`] record that caches the category derived from its label.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Labor category of a calendar day.
///
/// # Example
///
/// ```
/// use timecard_engine::models::DayCategory;
///
/// assert!(DayCategory::Holiday.is_rest_day());
/// assert!(!DayCategory::Workday.is_rest_day());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayCategory {
    /// An ordinary working day; the standard threshold applies.
    #[default]
    Workday,
    /// A company-granted (non-statutory) rest day.
    Holiday,
    /// A statutorily mandated rest day.
    LegalHoliday,
}

impl DayCategory {
    /// Returns true for either kind of rest day.
    pub fn is_rest_day(self) -> bool {
        !matches!(self, DayCategory::Workday)
    }
}

impl std::fmt::Display for DayCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayCategory::Workday => write!(f, "Workday"),
            DayCategory::Holiday => write!(f, "Holiday"),
            DayCategory::LegalHoliday => write!(f, "LegalHoliday"),
        }
    }
}

/// The attendance types recorded against a day by the attendance system.
///
/// Each type has a canonical snake_case code and the label used on the
/// attendance screens. Both forms are accepted when classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceType {
    /// Ordinary attendance.
    Ordinary,
    /// Arrived late.
    Tardy,
    /// Left early.
    EarlyLeave,
    /// Absent.
    Absence,
    /// Special leave.
    SpecialLeave,
    /// Ordinary night-shift attendance.
    NightShift,
    /// Arrived late on a night shift.
    NightShiftTardy,
    /// Left early from a night shift.
    NightShiftEarlyLeave,
    /// Nothing recorded yet for the day.
    Unset,
    /// Non-statutory rest day.
    Holiday,
    /// Worked on a non-statutory rest day.
    HolidayWork,
    /// Substitute rest day.
    SubstituteHoliday,
    /// Non-statutory rest day moved from another date.
    TransferredHoliday,
    /// Work on a non-statutory rest day moved from another date.
    TransferredHolidayWork,
    /// Substitute rest day moved from another date.
    TransferredSubstituteHoliday,
    /// Statutory rest day.
    LegalHoliday,
    /// Worked on a statutory rest day.
    LegalHolidayWork,
    /// Statutory rest day moved from another date.
    TransferredLegalHoliday,
}

impl AttendanceType {
    /// Every known attendance type.
    pub const ALL: [AttendanceType; 18] = [
        AttendanceType::Ordinary,
        AttendanceType::Tardy,
        AttendanceType::EarlyLeave,
        AttendanceType::Absence,
        AttendanceType::SpecialLeave,
        AttendanceType::NightShift,
        AttendanceType::NightShiftTardy,
        AttendanceType::NightShiftEarlyLeave,
        AttendanceType::Unset,
        AttendanceType::Holiday,
        AttendanceType::HolidayWork,
        AttendanceType::SubstituteHoliday,
        AttendanceType::TransferredHoliday,
        AttendanceType::TransferredHolidayWork,
        AttendanceType::TransferredSubstituteHoliday,
        AttendanceType::LegalHoliday,
        AttendanceType::LegalHolidayWork,
        AttendanceType::TransferredLegalHoliday,
    ];

    /// The canonical snake_case code.
    pub fn code(self) -> &'static str {
        match self {
            AttendanceType::Ordinary => "ordinary",
            AttendanceType::Tardy => "tardy",
            AttendanceType::EarlyLeave => "early_leave",
            AttendanceType::Absence => "absence",
            AttendanceType::SpecialLeave => "special_leave",
            AttendanceType::NightShift => "night_shift",
            AttendanceType::NightShiftTardy => "night_shift_tardy",
            AttendanceType::NightShiftEarlyLeave => "night_shift_early_leave",
            AttendanceType::Unset => "unset",
            AttendanceType::Holiday => "holiday",
            AttendanceType::HolidayWork => "holiday_work",
            AttendanceType::SubstituteHoliday => "substitute_holiday",
            AttendanceType::TransferredHoliday => "transferred_holiday",
            AttendanceType::TransferredHolidayWork => "transferred_holiday_work",
            AttendanceType::TransferredSubstituteHoliday => "transferred_substitute_holiday",
            AttendanceType::LegalHoliday => "legal_holiday",
            AttendanceType::LegalHolidayWork => "legal_holiday_work",
            AttendanceType::TransferredLegalHoliday => "transferred_legal_holiday",
        }
    }

    /// The label shown on the attendance screens.
    pub fn label(self) -> &'static str {
        match self {
            AttendanceType::Ordinary => "出勤",
            AttendanceType::Tardy => "遅刻",
            AttendanceType::EarlyLeave => "早退",
            AttendanceType::Absence => "欠勤",
            AttendanceType::SpecialLeave => "特別休暇",
            AttendanceType::NightShift => "夜勤",
            AttendanceType::NightShiftTardy => "夜勤遅刻",
            AttendanceType::NightShiftEarlyLeave => "夜勤早退",
            AttendanceType::Unset => "未設定",
            AttendanceType::Holiday => "法定外休日",
            AttendanceType::HolidayWork => "法定外休日出勤",
            AttendanceType::SubstituteHoliday => "代休",
            AttendanceType::TransferredHoliday => "振法定外休日",
            AttendanceType::TransferredHolidayWork => "振法定外休日出勤",
            AttendanceType::TransferredSubstituteHoliday => "振代休",
            AttendanceType::LegalHoliday => "法定休日",
            AttendanceType::LegalHolidayWork => "法定休日出勤",
            AttendanceType::TransferredLegalHoliday => "振法定休日",
        }
    }

    /// The labor category this attendance type implies.
    pub fn category(self) -> DayCategory {
        match self {
            AttendanceType::Ordinary
            | AttendanceType::Tardy
            | AttendanceType::EarlyLeave
            | AttendanceType::Absence
            | AttendanceType::SpecialLeave
            | AttendanceType::NightShift
            | AttendanceType::NightShiftTardy
            | AttendanceType::NightShiftEarlyLeave
            | AttendanceType::Unset => DayCategory::Workday,
            AttendanceType::Holiday
            | AttendanceType::HolidayWork
            | AttendanceType::SubstituteHoliday
            | AttendanceType::TransferredHoliday
            | AttendanceType::TransferredHolidayWork
            | AttendanceType::TransferredSubstituteHoliday => DayCategory::Holiday,
            AttendanceType::LegalHoliday
            | AttendanceType::LegalHolidayWork
            | AttendanceType::TransferredLegalHoliday => DayCategory::LegalHoliday,
        }
    }
}

/// A calendar day with its raw attendance label and the cached category.
///
/// The category is a pure function of the label, computed once when the
/// record is built.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::AttendanceDayClassifier;
/// use timecard_engine::models::{CalendarDay, DayCategory};
/// use chrono::NaiveDate;
///
/// let classifier = AttendanceDayClassifier::default();
/// let day = CalendarDay::new(
///     NaiveDate::from_ymd_opt(2026, 5, 3).unwrap(),
///     Some("法定休日".to_string()),
///     &classifier,
/// );
/// assert_eq!(day.category, DayCategory::LegalHoliday);
/// assert_eq!((day.year(), day.month(), day.day()), (2026, 5, 3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// The attendance label as recorded, if any.
    pub raw_attendance_type: Option<String>,
    /// The category derived from the label.
    pub category: DayCategory,
}

impl CalendarDay {
    /// Builds a day record, classifying its label once.
    pub fn new(
        date: NaiveDate,
        raw_attendance_type: Option<String>,
        classifier: &crate::calculation::AttendanceDayClassifier,
    ) -> Self {
        let category = classifier.classify(raw_attendance_type.as_deref());
        Self {
            date,
            raw_attendance_type,
            category,
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of month (1-31).
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}
