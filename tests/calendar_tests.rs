mod common;

use capacity_planner::{WorkCalendar, WorkCalendarConfig};
use chrono::Weekday;
use common::{d, wk};

#[test]
fn weeks_without_holidays_deduct_nothing() {
    let cal = WorkCalendar::new(1, "Standard", 40.0);
    assert_eq!(cal.holiday_deduction(wk(2024, 10)), 0.0);
}

#[test]
fn holiday_date_on_working_day_deducts_one_day() {
    let mut cal = WorkCalendar::new(1, "Standard", 40.0);
    // 2024-12-25 is a Wednesday in ISO week 52.
    cal.add_holiday(d(2024, 12, 25));
    assert_eq!(cal.holiday_deduction(wk(2024, 52)), 8.0);

    // Saturday is not a working day.
    cal.add_holiday(d(2024, 12, 28));
    assert_eq!(cal.holiday_deduction(wk(2024, 52)), 8.0);
}

#[test]
fn duplicate_holiday_dates_count_once() {
    let mut cal = WorkCalendar::new(1, "Standard", 40.0);
    cal.add_holidays(&[d(2024, 12, 25), d(2024, 12, 26), d(2024, 12, 25)]);
    assert_eq!(cal.holiday_deduction(wk(2024, 52)), 16.0);
}

#[test]
fn recurring_holidays_hit_each_year() {
    let mut cal = WorkCalendar::new(1, "Standard", 40.0);
    // Dec 24 is a Tuesday in 2024 and a Wednesday in 2025.
    cal.add_recurring_holiday(12, 24, 2024, 2025);
    assert_eq!(cal.holiday_deduction(wk(2024, 52)), 8.0);
    assert_eq!(cal.holiday_deduction(wk(2025, 52)), 8.0);
}

#[test]
fn dated_holidays_never_exceed_base_hours() {
    let mut cal = WorkCalendar::new(1, "Mondays", 10.0);
    cal.set_working_days(vec![Weekday::Mon]);
    cal.add_holiday(d(2024, 3, 4));
    cal.add_holiday(d(2024, 3, 4));
    assert_eq!(cal.hours_per_working_day(), 10.0);
    assert_eq!(cal.holiday_deduction(wk(2024, 10)), 10.0);
}

#[test]
fn explicit_week_deductions_accumulate() {
    let cal = WorkCalendar::new(1, "Standard", 40.0)
        .with_holiday_hours(wk(2024, 1), 8.0)
        .with_holiday_hours(wk(2024, 1), 8.0);
    assert_eq!(cal.holiday_deduction(wk(2024, 1)), 16.0);
}

#[test]
fn six_day_week_splits_base_hours_by_six() {
    let mut cal = WorkCalendar::new(1, "Six days", 48.0);
    cal.set_working_days(vec![
        Weekday::Sat,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
    ]);
    assert_eq!(cal.working_days().first(), Some(&Weekday::Mon));
    cal.add_holiday(d(2024, 3, 9)); // Saturday
    assert_eq!(cal.holiday_deduction(wk(2024, 10)), 8.0);
}

#[test]
fn config_json_accepts_weeks_and_dates() {
    let json = r#"{
        "id": 3,
        "name": "Sweden",
        "base_hours_per_week": 40.0,
        "holiday_weeks": [{ "year": 2024, "week": 1, "hours": 8.0 }],
        "holidays": ["2024-01-05", "2024-12-25"]
    }"#;
    let cal: WorkCalendar = serde_json::from_str(json).unwrap();
    assert_eq!(cal.id(), 3);
    assert_eq!(cal.name(), "Sweden");
    assert_eq!(cal.holiday_deduction(wk(2024, 1)), 16.0);
    assert_eq!(cal.holiday_deduction(wk(2024, 52)), 8.0);

    let round_tripped: WorkCalendar =
        serde_json::from_str(&serde_json::to_string(&cal).unwrap()).unwrap();
    assert_eq!(round_tripped, cal);
}

#[test]
fn config_json_rejects_non_existent_week() {
    let json = r#"{
        "id": 3,
        "name": "Broken",
        "base_hours_per_week": 40.0,
        "holiday_weeks": [{ "year": 2021, "week": 53, "hours": 8.0 }]
    }"#;
    assert!(serde_json::from_str::<WorkCalendar>(json).is_err());
}

#[test]
fn to_config_folds_dates_into_weeks() {
    let mut cal = WorkCalendar::new(1, "Standard", 40.0);
    cal.add_holiday(d(2024, 12, 25));
    let config: WorkCalendarConfig = cal.to_config();
    assert!(config.holidays.is_empty());
    assert_eq!(config.holiday_weeks.len(), 1);
    assert_eq!(config.holiday_weeks[0].week, 52);
    assert_eq!(config.holiday_weeks[0].hours, 8.0);
}
