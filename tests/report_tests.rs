mod common;

use capacity_planner::{Locale, UtilizationSummary, report};
use common::*;

#[test]
fn summary_counts_busy_and_idle_weeks() {
    let result = sample_snapshot().aggregate(2024, 10, 2024, 11).unwrap();
    let summary = UtilizationSummary::from_report(&result);
    assert_eq!(summary.consultant_count, 3);
    assert_eq!(summary.week_count, 6);
    assert_eq!(summary.overallocated_weeks, 1);
    assert_eq!(summary.unallocated_weeks, 3);
    assert_eq!(
        summary.to_cli_summary(),
        "consultants=3, weeks=6, over=1, idle=3, warnings=1"
    );
}

#[test]
fn utilization_frame_has_one_row_per_consultant_week() {
    let result = sample_snapshot().aggregate(2024, 10, 2024, 11).unwrap();
    let df = report::utilization_frame(&result).unwrap();
    assert_eq!(df.height(), 6);

    let allocation = df.column("allocation").unwrap().str().unwrap();
    assert_eq!(allocation.get(0), Some("50%"));
    assert_eq!(allocation.get(1), Some("125%"));

    let top = df.column("top_project").unwrap().str().unwrap();
    assert_eq!(top.get(2), Some("Borealis"));
    assert_eq!(top.get(3), None);
}

#[test]
fn capacity_frame_reports_missing_calendars_inline() {
    let snapshot = sample_snapshot();
    let table = snapshot.capacity(2024, 10).unwrap();
    let df = report::capacity_frame(&snapshot.consultants, &table).unwrap();
    assert_eq!(df.height(), 4);

    let status = df.column("status").unwrap().str().unwrap();
    assert_eq!(status.get(0), Some("ok"));
    assert!(status.get(2).unwrap().contains("calendar 99"));

    let billable = df.column("billable_hours").unwrap().f64().unwrap();
    assert_eq!(billable.get(0), Some(32.0));
    assert_eq!(billable.get(2), None);
}

#[test]
fn forecast_frame_labels_months_in_the_chosen_locale() {
    let forecast = sample_snapshot().forecast(2024, 3, 2024, 3).unwrap();

    let df = report::forecast_frame(&forecast, Locale::Swedish).unwrap();
    let labels = df.column("label").unwrap().str().unwrap();
    assert_eq!(labels.get(0), Some("mars 2024"));

    let df = report::forecast_frame(&forecast, Locale::English).unwrap();
    let currency = df.column("currency").unwrap().str().unwrap();
    assert_eq!(currency.get(0), Some("EUR"));
    assert_eq!(currency.get(1), Some("SEK"));
    assert_eq!(
        df.column("label").unwrap().str().unwrap().get(1),
        Some("March 2024")
    );
}

#[test]
fn kpi_frame_lists_dashboard_metrics() {
    let kpis = sample_snapshot().compute_kpis(wk(2024, 10));
    let df = report::kpi_frame(&kpis).unwrap();
    assert_eq!(df.height(), 7);
    let values = df.column("value").unwrap().str().unwrap();
    assert_eq!(values.get(0), Some("2024-W10"));
    assert_eq!(values.get(4), Some("50%"));
}
