use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use timecard_engine::calculation::{
    InMemoryTimesheet, aggregate_day, calculate_minute_buckets, late_night_overlap_minutes,
    split_at_midnight,
};
use timecard_engine::engine::TimecardEngine;
use timecard_engine::models::{DayCategory, ShiftProfile, WorkInterval};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()
}

fn arb_interval(assignment_id: &'static str) -> impl Strategy<Value = WorkInterval> {
    (0i64..1440, 1i64..2000).prop_map(move |(start, length)| {
        let entry: NaiveDateTime =
            base_date().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(start);
        WorkInterval::new(assignment_id, entry, entry + Duration::minutes(length)).unwrap()
    })
}

fn arb_category() -> impl Strategy<Value = DayCategory> {
    prop_oneof![
        Just(DayCategory::Workday),
        Just(DayCategory::Holiday),
        Just(DayCategory::LegalHoliday),
    ]
}

fn arb_profile() -> impl Strategy<Value = ShiftProfile> {
    prop_oneof![Just(ShiftProfile::day_shift()), Just(ShiftProfile::night_shift())]
}

proptest! {
    #[test]
    fn rest_allowance_only_reduces_day_of_record(
        interval in arb_interval("matter_01"),
        rest in 0u32..180,
    ) {
        let split = split_at_midnight(&interval, rest, 1);

        prop_assert_eq!(split.raw_minutes(), interval.raw_minutes());
        prop_assert_eq!(
            split.day_of_record_work_minutes,
            split.day_of_record_raw_minutes.saturating_sub(rest)
        );
        prop_assert_eq!(split.next_day_work_minutes, split.next_day_raw_minutes);
        prop_assert_eq!(split.work_minutes() + split.exclude_minutes(), split.raw_minutes());
        if !interval.crosses_midnight() {
            prop_assert_eq!(split.work_minutes(), interval.raw_minutes().saturating_sub(rest));
        }
    }

    #[test]
    fn categorized_minutes_never_exceed_work(
        interval in arb_interval("matter_01"),
        category in arb_category(),
        next_day_category in arb_category(),
        profile in arb_profile(),
    ) {
        let result = calculate_minute_buckets(
            &interval,
            category,
            Some(next_day_category),
            &profile,
            60,
            1,
        );
        let buckets = result.buckets;
        let categorized = buckets.categorization.resolved().unwrap().total();

        prop_assert!(categorized <= buckets.work_minutes);
        if category.is_rest_day() {
            prop_assert_eq!(categorized, buckets.work_minutes);
        } else {
            prop_assert_eq!(
                categorized,
                buckets.work_minutes.saturating_sub(profile.standard_threshold_minutes)
            );
        }
        prop_assert!(
            buckets.midnight_overtime_minutes + buckets.night_shift_minutes
                <= interval.raw_minutes()
        );
    }

    #[test]
    fn late_night_overlap_bounded_by_interval(interval in arb_interval("matter_01")) {
        let profile = ShiftProfile::day_shift();
        let overlap = late_night_overlap_minutes(
            interval.entry,
            interval.exit,
            profile.night_window_start,
            profile.night_window_end,
        );
        prop_assert!(overlap <= interval.raw_minutes());
    }

    #[test]
    fn single_interval_day_matches_interval_buckets(
        interval in arb_interval("matter_01"),
        category in arb_category(),
        next_day_category in arb_category(),
        profile in arb_profile(),
    ) {
        let day = aggregate_day(
            std::slice::from_ref(&interval),
            category,
            Some(next_day_category),
            &profile,
            60,
            1,
        );
        let single = calculate_minute_buckets(
            &interval,
            category,
            Some(next_day_category),
            &profile,
            60,
            1,
        );

        prop_assert_eq!(day.assignments.len(), 1);
        prop_assert_eq!(day.total, single.buckets);
    }

    #[test]
    fn day_total_is_sum_of_assignments(
        first in arb_interval("matter_01"),
        second in arb_interval("matter_02"),
        third in arb_interval("matter_01"),
        category in arb_category(),
        next_day_category in arb_category(),
    ) {
        let profile = ShiftProfile::day_shift();
        let intervals = vec![first, second, third];
        let day = aggregate_day(&intervals, category, Some(next_day_category), &profile, 60, 1);

        let work: u32 = day.assignments.iter().map(|a| a.buckets.work_minutes).sum();
        let overtime: u32 = day
            .assignments
            .iter()
            .map(|a| a.buckets.overtime_minutes().unwrap())
            .sum();
        let holiday: u32 = day
            .assignments
            .iter()
            .map(|a| a.buckets.holiday_work_minutes().unwrap())
            .sum();

        prop_assert_eq!(day.total.work_minutes, work);
        prop_assert_eq!(day.total.overtime_minutes(), Some(overtime));
        prop_assert_eq!(day.total.holiday_work_minutes(), Some(holiday));
        prop_assert!(day.total.categorization.resolved().unwrap().total() <= day.total.work_minutes);
        for assignment in &day.assignments {
            let share = assignment.buckets.categorization.resolved().unwrap().total();
            prop_assert!(share <= assignment.buckets.work_minutes);
        }
    }

    #[test]
    fn unrecorded_next_day_is_pending_only_with_next_day_work(
        interval in arb_interval("matter_01"),
        category in arb_category(),
    ) {
        let day = aggregate_day(
            std::slice::from_ref(&interval),
            category,
            None,
            &ShiftProfile::day_shift(),
            60,
            1,
        );
        let split = split_at_midnight(&interval, 60, 1);
        prop_assert_eq!(day.total.is_indeterminate(), split.has_next_day_portion());
    }

    #[test]
    fn computing_a_day_twice_gives_the_same_report(
        interval in arb_interval("matter_01"),
        next_label in prop_oneof![Just("出勤"), Just("法定外休日"), Just("法定休日")],
    ) {
        let mut timesheet = InMemoryTimesheet::new();
        timesheet.set_attendance_label("w_001", base_date().succ_opt().unwrap(), next_label);
        timesheet.push_interval("w_001", interval);

        let engine = TimecardEngine::default();
        let first = engine.compute_day("w_001", base_date(), &timesheet);
        let second = engine.compute_day("w_001", base_date(), &timesheet);
        prop_assert_eq!(first, second);
    }
}
