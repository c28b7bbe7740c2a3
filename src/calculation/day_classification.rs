//! Attendance-day classification.
//!
//! This module maps the raw attendance label recorded against a calendar day
//! to one of the three [`DayCategory`] values. The mapping is a lookup table
//! seeded from [`AttendanceType`] and extended from configuration.

use std::collections::HashMap;

use crate::models::{AttendanceType, DayCategory};

/// Classifies raw attendance labels into day categories.
///
/// Both the canonical code (`"legal_holiday"`) and the screen label
/// (`"法定休日"`) of every [`AttendanceType`] are recognized. Labels that are
/// absent, blank, or unknown classify as [`DayCategory::Workday`]; use
/// [`AttendanceDayClassifier::lookup`] to tell an unknown label apart.
///
/// # Example
///
/// ```
/// use timecard_engine::calculation::AttendanceDayClassifier;
/// use timecard_engine::models::DayCategory;
///
/// let classifier = AttendanceDayClassifier::default();
///
/// assert_eq!(classifier.classify(Some("代休")), DayCategory::Holiday);
/// assert_eq!(classifier.classify(Some("legal_holiday_work")), DayCategory::LegalHoliday);
/// assert_eq!(classifier.classify(None), DayCategory::Workday);
/// assert_eq!(classifier.lookup("something else"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceDayClassifier {
    table: HashMap<String, DayCategory>,
}

impl Default for AttendanceDayClassifier {
    fn default() -> Self {
        let table = AttendanceType::ALL
            .iter()
            .flat_map(|t| {
                [
                    (t.code().to_string(), t.category()),
                    (t.label().to_string(), t.category()),
                ]
            })
            .collect();
        Self { table }
    }
}

impl AttendanceDayClassifier {
    /// Adds a label mapping, replacing any existing mapping for the label.
    pub fn insert(&mut self, label: impl Into<String>, category: DayCategory) {
        let label = label.into();
        self.table.insert(label.trim().to_string(), category);
    }

    /// Returns the category for a known label, or `None` if it is not in the table.
    pub fn lookup(&self, label: &str) -> Option<DayCategory> {
        self.table.get(label.trim()).copied()
    }

    /// Returns true when the label is absent or blank.
    pub fn is_blank(label: Option<&str>) -> bool {
        label.is_none_or(|l| l.trim().is_empty())
    }

    /// Returns true when nothing has been recorded for the day yet: the label
    /// is absent, blank, or the explicit unset type.
    ///
    /// ```
    /// use timecard_engine::calculation::AttendanceDayClassifier;
    ///
    /// assert!(AttendanceDayClassifier::is_unrecorded(Some("未設定")));
    /// assert!(AttendanceDayClassifier::is_unrecorded(Some(" unset ")));
    /// assert!(!AttendanceDayClassifier::is_unrecorded(Some("出勤")));
    /// ```
    pub fn is_unrecorded(label: Option<&str>) -> bool {
        let unset = AttendanceType::Unset;
        Self::is_blank(label)
            || label.is_some_and(|l| {
                let l = l.trim();
                l == unset.code() || l == unset.label()
            })
    }

    /// Classifies a label, falling back to [`DayCategory::Workday`].
    pub fn classify(&self, label: Option<&str>) -> DayCategory {
        label.and_then(|l| self.lookup(l)).unwrap_or_default()
    }
}
