use chrono::{Datelike, Duration, NaiveDate, Weekday};
use hr_portal::calendar::{CalendarError, WorkCalendar, WorkCalendarConfig, count_business_days};
use proptest::prelude::*;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn default_calendar_weekends_unavailable() {
    let cal = WorkCalendar::default();
    // 2025-01-04 is a Saturday, 2025-01-05 is a Sunday
    assert!(!cal.is_available(d(2025, 1, 4)));
    assert!(!cal.is_available(d(2025, 1, 5)));
    // No holidays by default, so New Year's Day is a working day.
    assert!(cal.is_available(d(2025, 1, 1)));
}

#[test]
fn single_day_counts_one_only_on_weekdays() {
    assert_eq!(count_business_days(d(2025, 1, 6), d(2025, 1, 6)), 1);
    assert_eq!(count_business_days(d(2025, 1, 4), d(2025, 1, 4)), 0);
    assert_eq!(count_business_days(d(2025, 1, 5), d(2025, 1, 5)), 0);
}

#[test]
fn inverted_range_counts_zero() {
    assert_eq!(count_business_days(d(2025, 1, 10), d(2025, 1, 6)), 0);
}

#[test]
fn full_work_week_counts_five() {
    assert_eq!(count_business_days(d(2025, 1, 6), d(2025, 1, 10)), 5);
    assert_eq!(count_business_days(d(2025, 1, 11), d(2025, 1, 19)), 5);
}

#[test]
fn counting_up_to_the_last_representable_date() {
    let end = NaiveDate::MAX;
    assert_eq!(count_business_days(end - Duration::days(6), end), 5);
    assert!(count_business_days(end - Duration::days(3), end) <= 4);
    assert_eq!(count_business_days(end, end), i64::from(end.weekday().num_days_from_monday() < 5));
}

#[test]
fn full_date_range_counts_without_walking_every_day() {
    let whole = count_business_days(NaiveDate::MIN, NaiveDate::MAX);
    let mid = d(2025, 1, 8);
    let split = count_business_days(NaiveDate::MIN, mid)
        + count_business_days(mid + Duration::days(1), NaiveDate::MAX);
    assert_eq!(whole, split);
    assert!(whole > 0);
}

#[test]
fn weekend_holiday_is_not_subtracted_twice() {
    let mut cal = WorkCalendar::default();
    cal.add_holiday(d(2025, 1, 11));
    assert_eq!(cal.count_available_days(d(2025, 1, 6), d(2025, 1, 12)), 5);
}

#[test]
fn holidays_reduce_the_count() {
    let mut cal = WorkCalendar::default();
    cal.add_holiday(d(2025, 1, 8));
    assert_eq!(cal.count_available_days(d(2025, 1, 6), d(2025, 1, 10)), 4);

    cal.add_recurring_holiday(12, 25, 2025, 2026);
    assert!(!cal.is_available(d(2025, 12, 25)));
    assert!(!cal.is_available(d(2026, 12, 25)));
}

#[test]
fn set_working_days_includes_saturday() {
    let mut cal = WorkCalendar::default();
    cal.set_working_days(&[
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ])
    .unwrap();
    assert!(cal.is_available(d(2025, 1, 4)));
    assert!(!cal.is_available(d(2025, 1, 5)));
}

#[test]
fn empty_working_week_is_rejected() {
    let mut cal = WorkCalendar::default();
    assert_eq!(cal.set_working_days(&[]), Err(CalendarError::NoWorkingDays));

    let config = WorkCalendarConfig::new(Vec::new(), Vec::new());
    assert_eq!(
        WorkCalendar::from_config(&config),
        Err(CalendarError::NoWorkingDays)
    );
}

#[test]
fn config_round_trip_preserves_calendar() {
    let cal = WorkCalendar::custom(
        [Weekday::Sun, Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu],
        [d(2025, 3, 31), d(2025, 1, 1)],
    )
    .unwrap();
    let config = cal.to_config();
    assert_eq!(config.working_days()[0], Weekday::Mon);
    assert_eq!(config.holidays(), &[d(2025, 1, 1), d(2025, 3, 31)]);

    let json = serde_json::to_string(&config).unwrap();
    let restored: WorkCalendarConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(WorkCalendar::from_config(&restored).unwrap(), cal);
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    // 2000-01-01 .. roughly 2060
    (0i64..22_000).prop_map(|offset| d(2000, 1, 1) + Duration::days(offset))
}

proptest! {
    #[test]
    fn any_seven_day_window_has_five_business_days(start in arb_date()) {
        let end = start + Duration::days(6);
        prop_assert_eq!(count_business_days(start, end), 5);
    }

    #[test]
    fn count_is_bounded_by_calendar_days(start in arb_date(), len in 0i64..400) {
        let end = start + Duration::days(len);
        let count = count_business_days(start, end);
        prop_assert!(count >= 0);
        prop_assert!(count <= len + 1);
    }

    #[test]
    fn splitting_a_range_preserves_the_count(start in arb_date(), len in 1i64..200, cut in 0i64..200) {
        let end = start + Duration::days(len);
        let mid = start + Duration::days(cut.min(len - 1));
        let whole = count_business_days(start, end);
        let parts = count_business_days(start, mid)
            + count_business_days(mid + Duration::days(1), end);
        prop_assert_eq!(whole, parts);
    }

    #[test]
    fn count_matches_walking_each_day(start in arb_date(), len in 0i64..60, holiday in 0i64..60) {
        let mut cal = WorkCalendar::custom(
            [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Sat],
            std::iter::empty::<NaiveDate>(),
        )
        .unwrap();
        cal.add_holiday(start + Duration::days(holiday));
        let end = start + Duration::days(len);
        let walked = start
            .iter_days()
            .take_while(|date| *date <= end)
            .filter(|date| cal.is_available(*date))
            .count() as i64;
        prop_assert_eq!(cal.count_available_days(start, end), walked);
    }
}
