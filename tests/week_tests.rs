mod common;

use capacity_planner::{
    EngineError, FixedClock, Locale, MonthKey, WeekKey, current_year_week, month_label,
    month_range, week_date_range, week_range, weeks_in_year,
};
use common::{d, wk};

#[test]
fn full_year_ranges_follow_iso_week_count() {
    assert_eq!(week_range(2024, 1, 2024, 52).unwrap().len(), 52);
    assert_eq!(weeks_in_year(2024).unwrap(), 52);

    assert_eq!(weeks_in_year(2020).unwrap(), 53);
    assert_eq!(week_range(2020, 1, 2020, 53).unwrap().len(), 53);
    assert_eq!(weeks_in_year(2026).unwrap(), 53);
}

#[test]
fn range_is_strictly_increasing_without_gaps() {
    let weeks = week_range(2023, 1, 2023, 52).unwrap();
    for (idx, pair) in weeks.windows(2).enumerate() {
        assert!(pair[0] < pair[1]);
        assert_eq!(pair[1].week, pair[0].week + 1, "gap after index {idx}");
    }
}

#[test]
fn range_crosses_into_next_year_after_week_52() {
    let weeks = week_range(2021, 51, 2022, 2).unwrap();
    assert_eq!(weeks, vec![wk(2021, 51), wk(2021, 52), wk(2022, 1), wk(2022, 2)]);
}

#[test]
fn range_includes_week_53_in_long_years() {
    let weeks = week_range(2020, 52, 2021, 1).unwrap();
    assert_eq!(weeks, vec![wk(2020, 52), wk(2020, 53), wk(2021, 1)]);
}

#[test]
fn reversed_range_is_empty() {
    assert!(week_range(2024, 10, 2024, 9).unwrap().is_empty());
}

#[test]
fn invalid_weeks_and_years_are_rejected() {
    assert_eq!(
        week_range(2024, 0, 2024, 5),
        Err(EngineError::InvalidWeek {
            year: 2024,
            week: 0
        })
    );
    assert_eq!(
        WeekKey::new(2024, 54),
        Err(EngineError::InvalidWeek {
            year: 2024,
            week: 54
        })
    );
    assert_eq!(
        WeekKey::new(2021, 53),
        Err(EngineError::InvalidWeek {
            year: 2021,
            week: 53
        })
    );
    assert_eq!(
        week_range(-1, 1, 2024, 1),
        Err(EngineError::InvalidYear { year: -1 })
    );
}

#[test]
fn week_date_range_runs_monday_to_sunday() {
    assert_eq!(
        week_date_range(2021, 13).unwrap(),
        (d(2021, 3, 29), d(2021, 4, 4))
    );
    // Week 1 of 2020 starts in December 2019.
    assert_eq!(
        week_date_range(2020, 1).unwrap(),
        (d(2019, 12, 30), d(2020, 1, 5))
    );
}

#[test]
fn current_week_comes_from_the_injected_clock() {
    assert_eq!(current_year_week(&FixedClock(d(2021, 1, 1))), wk(2020, 53));
    assert_eq!(current_year_week(&FixedClock(d(2024, 12, 30))), wk(2025, 1));
    assert_eq!(current_year_week(&FixedClock(d(2024, 3, 6))), wk(2024, 10));
}

#[test]
fn month_labels_use_the_requested_locale() {
    assert_eq!(month_label(3, 2021, Locale::English).unwrap(), "March 2021");
    assert_eq!(month_label(3, 2021, Locale::Swedish).unwrap(), "mars 2021");
    assert_eq!(
        month_label(13, 2021, Locale::English),
        Err(EngineError::InvalidMonth { month: 13 })
    );
    assert_eq!(
        month_label(0, 2021, Locale::English),
        Err(EngineError::InvalidMonth { month: 0 })
    );
}

#[test]
fn month_range_rolls_over_years() {
    let months = month_range(2023, 11, 2024, 2).unwrap();
    assert_eq!(
        months,
        vec![
            MonthKey {
                year: 2023,
                month: 11
            },
            MonthKey {
                year: 2023,
                month: 12
            },
            MonthKey {
                year: 2024,
                month: 1
            },
            MonthKey {
                year: 2024,
                month: 2
            },
        ]
    );
}

#[test]
fn week_keys_display_with_padded_week() {
    assert_eq!(wk(2024, 3).to_string(), "2024-W03");
}
