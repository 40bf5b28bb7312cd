//! Tabular views of engine output for the CLI. Numbers are taken as the
//! engine produced them; nothing here re-derives business figures.

use polars::prelude::PlSmallStr;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::calculations::capacity::ConsultantCapacity;
use crate::calculations::forecast::RevenueForecast;
use crate::calculations::kpi::DashboardKpis;
use crate::calculations::utilization::UtilizationReport;
use crate::model::{Consultant, ConsultantId};
use crate::week::{Locale, MonthKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationSummary {
    pub consultant_count: usize,
    pub week_count: usize,
    pub overallocated_weeks: usize,
    pub unallocated_weeks: usize,
    pub skipped_count: usize,
    pub warning_count: usize,
}

impl UtilizationSummary {
    pub fn from_report(report: &UtilizationReport) -> Self {
        let weeks = report.consultants.iter().flat_map(|c| c.weeks.iter());
        let mut week_count = 0;
        let mut overallocated_weeks = 0;
        let mut unallocated_weeks = 0;
        for week in weeks {
            week_count += 1;
            if week.allocation_percent.is_overallocated() {
                overallocated_weeks += 1;
            }
            if week.total_hours_allocated == 0.0 {
                unallocated_weeks += 1;
            }
        }
        Self {
            consultant_count: report.consultants.len(),
            week_count,
            overallocated_weeks,
            unallocated_weeks,
            skipped_count: report.skipped_count,
            warning_count: report.warnings.len(),
        }
    }

    pub fn to_cli_summary(&self) -> String {
        let mut parts = Vec::new();
        parts.push(format!("consultants={}", self.consultant_count));
        parts.push(format!("weeks={}", self.week_count));
        if self.overallocated_weeks > 0 {
            parts.push(format!("over={}", self.overallocated_weeks));
        }
        if self.unallocated_weeks > 0 {
            parts.push(format!("idle={}", self.unallocated_weeks));
        }
        if self.skipped_count > 0 {
            parts.push(format!("skipped={}", self.skipped_count));
        }
        if self.warning_count > 0 {
            parts.push(format!("warnings={}", self.warning_count));
        }
        parts.join(", ")
    }
}

fn names_by_id(consultants: &[Consultant]) -> HashMap<ConsultantId, &str> {
    consultants
        .iter()
        .map(|c| (c.id, c.name.as_str()))
        .collect()
}

pub fn capacity_frame(
    consultants: &[Consultant],
    table: &[ConsultantCapacity],
) -> PolarsResult<DataFrame> {
    let names = names_by_id(consultants);
    let mut ids: Vec<i64> = Vec::new();
    let mut consultant: Vec<&str> = Vec::new();
    let mut week: Vec<String> = Vec::new();
    let mut capacity: Vec<Option<f64>> = Vec::new();
    let mut billable: Vec<Option<f64>> = Vec::new();
    let mut status: Vec<String> = Vec::new();

    for entry in table {
        let name = names.get(&entry.consultant_id).copied().unwrap_or("");
        match &entry.weeks {
            Ok(snapshots) => {
                for snapshot in snapshots {
                    ids.push(entry.consultant_id);
                    consultant.push(name);
                    week.push(snapshot.week.to_string());
                    capacity.push(Some(snapshot.capacity_hours_per_week));
                    billable.push(Some(snapshot.hours_per_week));
                    status.push("ok".to_string());
                }
            }
            Err(error) => {
                ids.push(entry.consultant_id);
                consultant.push(name);
                week.push(String::new());
                capacity.push(None);
                billable.push(None);
                status.push(error.to_string());
            }
        }
    }

    let week: Vec<&str> = week.iter().map(String::as_str).collect();
    let status: Vec<&str> = status.iter().map(String::as_str).collect();
    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("consultant_id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("consultant"), consultant).into_column(),
        Series::new(PlSmallStr::from_static("week"), week).into_column(),
        Series::new(PlSmallStr::from_static("capacity_hours"), capacity).into_column(),
        Series::new(PlSmallStr::from_static("billable_hours"), billable).into_column(),
        Series::new(PlSmallStr::from_static("status"), status).into_column(),
    ])
}

/// One row per consultant and week.
pub fn utilization_frame(report: &UtilizationReport) -> PolarsResult<DataFrame> {
    let mut ids: Vec<i64> = Vec::new();
    let mut consultant: Vec<&str> = Vec::new();
    let mut week: Vec<String> = Vec::new();
    let mut billable: Vec<f64> = Vec::new();
    let mut allocated: Vec<f64> = Vec::new();
    let mut percent: Vec<String> = Vec::new();
    let mut top_project: Vec<Option<&str>> = Vec::new();

    for entry in &report.consultants {
        for row in &entry.weeks {
            ids.push(entry.consultant_id);
            consultant.push(entry.consultant_name.as_str());
            week.push(row.week.to_string());
            billable.push(row.hours_per_week);
            allocated.push(row.total_hours_allocated);
            percent.push(row.allocation_percent.to_string());
            top_project.push(
                row.project_breakdown
                    .first()
                    .map(|project| project.project_name.as_str()),
            );
        }
    }

    let week: Vec<&str> = week.iter().map(String::as_str).collect();
    let percent: Vec<&str> = percent.iter().map(String::as_str).collect();
    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("consultant_id"), ids).into_column(),
        Series::new(PlSmallStr::from_static("consultant"), consultant).into_column(),
        Series::new(PlSmallStr::from_static("week"), week).into_column(),
        Series::new(PlSmallStr::from_static("billable_hours"), billable).into_column(),
        Series::new(PlSmallStr::from_static("allocated_hours"), allocated).into_column(),
        Series::new(PlSmallStr::from_static("allocation"), percent).into_column(),
        Series::new(PlSmallStr::from_static("top_project"), top_project).into_column(),
    ])
}

pub fn forecast_frame(forecast: &RevenueForecast, locale: Locale) -> PolarsResult<DataFrame> {
    let labels: Vec<String> = forecast
        .entries
        .iter()
        .map(|entry| {
            MonthKey {
                year: entry.year,
                month: entry.month,
            }
            .label(locale)
        })
        .collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    let years: Vec<i32> = forecast.entries.iter().map(|e| e.year).collect();
    let months: Vec<i32> = forecast.entries.iter().map(|e| e.month as i32).collect();
    let currencies: Vec<&str> = forecast
        .entries
        .iter()
        .map(|e| e.currency.as_str())
        .collect();
    let revenue: Vec<f64> = forecast.entries.iter().map(|e| e.revenue).collect();

    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("year"), years).into_column(),
        Series::new(PlSmallStr::from_static("month"), months).into_column(),
        Series::new(PlSmallStr::from_static("label"), labels).into_column(),
        Series::new(PlSmallStr::from_static("currency"), currencies).into_column(),
        Series::new(PlSmallStr::from_static("revenue"), revenue).into_column(),
    ])
}

pub fn kpi_frame(kpis: &DashboardKpis) -> PolarsResult<DataFrame> {
    let metrics = [
        "week",
        "consultants",
        "customers",
        "active_projects",
        "allocation_this_week",
        "skipped",
        "warnings",
    ];
    let values = [
        kpis.week.to_string(),
        kpis.consultant_count.to_string(),
        kpis.customer_count.to_string(),
        kpis.active_project_count.to_string(),
        format!("{}%", kpis.allocation_this_week_percent),
        kpis.skipped_count.to_string(),
        kpis.warnings.len().to_string(),
    ];
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    DataFrame::new(vec![
        Series::new(PlSmallStr::from_static("metric"), metrics.to_vec()).into_column(),
        Series::new(PlSmallStr::from_static("value"), values).into_column(),
    ])
}
