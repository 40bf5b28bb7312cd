mod common;

use capacity_planner::{
    Allocation, Customer, EngineError, Project, ProjectType, RevenueEntry, Snapshot, forecast,
};
use common::*;

fn entry(year: i32, month: u32, revenue: f64, currency: &str) -> RevenueEntry {
    RevenueEntry {
        year,
        month,
        revenue,
        currency: currency.to_string(),
    }
}

fn acme_only(allocations: Vec<Allocation>) -> Snapshot {
    Snapshot {
        allocations,
        ..sample_snapshot()
    }
}

#[test]
fn week_spanning_two_months_is_split_by_days() {
    // 2021-W13 runs Monday 29 March to Sunday 4 April.
    let snapshot = acme_only(vec![Allocation::new(ALICE, APOLLO, 2021, 13, 14.0)]);
    let result = snapshot.forecast(2021, 3, 2021, 4).unwrap();
    assert_eq!(
        result.entries,
        vec![entry(2021, 3, 6000.0, "SEK"), entry(2021, 4, 8000.0, "SEK")]
    );
}

#[test]
fn days_outside_the_window_are_dropped() {
    let snapshot = acme_only(vec![Allocation::new(ALICE, APOLLO, 2021, 13, 14.0)]);
    let result = snapshot.forecast(2021, 3, 2021, 3).unwrap();
    assert_eq!(result.entries, vec![entry(2021, 3, 6000.0, "SEK")]);
}

#[test]
fn week_53_splits_across_the_year_boundary() {
    // 2020-W53 has four days in December and three in January.
    let snapshot = acme_only(vec![Allocation::new(BOB, BOREALIS, 2020, 53, 7.0)]);
    let result = snapshot.forecast(2020, 12, 2021, 1).unwrap();
    assert_eq!(
        result.entries,
        vec![entry(2020, 12, 400.0, "EUR"), entry(2021, 1, 300.0, "EUR")]
    );
}

#[test]
fn fixture_month_is_grouped_by_currency() {
    let result = sample_snapshot().forecast(2024, 1, 2024, 12).unwrap();
    assert_eq!(
        result.entries,
        vec![
            entry(2024, 3, 1000.0, "EUR"),
            entry(2024, 3, 86000.0, "SEK"),
        ]
    );
    let totals = result.totals_by_currency();
    assert_eq!(totals.get("SEK"), Some(&86000.0));
    assert_eq!(totals.get("EUR"), Some(&1000.0));
}

#[test]
fn internal_projects_and_unbilled_customers_earn_nothing() {
    let mut snapshot = acme_only(vec![
        Allocation::new(BOB, TOOLING, 2024, 10, 10.0),
        Allocation::new(BOB, VACATION, 2024, 10, 10.0),
        Allocation::new(BOB, 30, 2024, 10, 10.0),
    ]);
    snapshot
        .customers
        .push(Customer::new(9, "Rate only").with_billing(500.0, " "));
    snapshot
        .projects
        .push(Project::new(30, "Unbilled", 9, ProjectType::Customer));

    let result = snapshot.forecast(2024, 1, 2024, 12).unwrap();
    assert!(result.entries.is_empty());
    assert_eq!(result.skipped_count, 0);
}

#[test]
fn inactive_projects_still_earn_revenue() {
    let snapshot = acme_only(vec![Allocation::new(ALICE, LEGACY, 2024, 10, 1.0)]);
    let result = snapshot.forecast(2024, 3, 2024, 3).unwrap();
    assert_eq!(result.entries, vec![entry(2024, 3, 1000.0, "SEK")]);
}

#[test]
fn dangling_and_malformed_rows_are_counted() {
    let snapshot = acme_only(vec![
        Allocation::new(ALICE, 999, 2024, 10, 8.0),
        Allocation::new(ALICE, APOLLO, 2021, 53, 8.0),
        Allocation::new(ALICE, APOLLO, 2024, 10, f64::NAN),
        Allocation::new(ALICE, APOLLO, 2024, 10, 1.0),
    ]);
    let result = snapshot.forecast(2024, 3, 2024, 3).unwrap();
    assert_eq!(result.skipped_count, 3);
    assert_eq!(result.entries, vec![entry(2024, 3, 1000.0, "SEK")]);
}

#[test]
fn reversed_window_is_empty() {
    let result = sample_snapshot().forecast(2024, 6, 2024, 1).unwrap();
    assert!(result.entries.is_empty());
}

#[test]
fn invalid_bounds_are_rejected() {
    assert_eq!(
        sample_snapshot().forecast(2024, 0, 2024, 3),
        Err(EngineError::InvalidMonth { month: 0 })
    );
    assert_eq!(
        sample_snapshot().forecast(2024, 1, 2024, 13),
        Err(EngineError::InvalidMonth { month: 13 })
    );
    assert_eq!(
        sample_snapshot().forecast(-5, 1, 2024, 3),
        Err(EngineError::InvalidYear { year: -5 })
    );
}

#[test]
fn input_order_does_not_change_the_result() {
    let snapshot = sample_snapshot();
    let mut reversed = snapshot.allocations.clone();
    reversed.reverse();

    let forward = snapshot.forecast(2024, 1, 2024, 12).unwrap();
    let backward = forecast(
        &reversed,
        &snapshot.projects,
        &snapshot.customers,
        2024,
        1,
        2024,
        12,
    )
    .unwrap();
    assert_eq!(
        serde_json::to_vec(&forward).unwrap(),
        serde_json::to_vec(&backward).unwrap()
    );
}
