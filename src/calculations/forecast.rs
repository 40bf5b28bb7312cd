use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::calculations::index_by;
use crate::error::EngineResult;
use crate::model::{Allocation, Customer, Project, ProjectType};
use crate::week::{MonthKey, WeekKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub year: i32,
    pub month: u32,
    pub revenue: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueForecast {
    /// One entry per (year, month, currency), chronological then by currency.
    pub entries: Vec<RevenueEntry>,
    /// Rows dropped for unknown projects, invalid hours or invalid weeks.
    pub skipped_count: usize,
}

impl RevenueForecast {
    /// Revenue per currency across the whole window.
    pub fn totals_by_currency(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for entry in &self.entries {
            *totals.entry(entry.currency.clone()).or_insert(0.0) += entry.revenue;
        }
        totals
    }
}

struct Billable<'a> {
    week: WeekKey,
    allocation: &'a Allocation,
    position: usize,
    rate: f64,
    currency: &'a str,
}

/// Monthly revenue from customer-project allocations over an inclusive month
/// window.
///
/// Each allocation week is split across the months its days fall in and
/// pro-rated by day count. Days outside the window are dropped. Customers
/// without a billing rate or currency contribute nothing.
pub fn forecast(
    allocations: &[Allocation],
    projects: &[Project],
    customers: &[Customer],
    year_from: i32,
    month_from: u32,
    year_to: i32,
    month_to: u32,
) -> EngineResult<RevenueForecast> {
    let start = MonthKey::new(year_from, month_from)?;
    let end = MonthKey::new(year_to, month_to)?;

    let projects_by_id = index_by(projects, |p| p.id);
    let customers_by_id = index_by(customers, |c| c.id);

    let mut skipped_count = 0;
    let mut billable = Vec::new();
    for (position, allocation) in allocations.iter().enumerate() {
        let (Some(week), Some(project)) = (
            allocation.week_key(),
            projects_by_id.get(&allocation.project_id),
        ) else {
            skipped_count += 1;
            continue;
        };
        if !allocation.has_valid_hours() {
            skipped_count += 1;
            continue;
        }
        if project.project_type != ProjectType::Customer {
            continue;
        }
        let Some((rate, currency)) = customers_by_id
            .get(&project.customer_id)
            .and_then(|customer| customer.billing())
        else {
            continue;
        };
        billable.push(Billable {
            week,
            allocation,
            position,
            rate,
            currency,
        });
    }

    // Chronological accumulation keeps float sums reproducible.
    billable.sort_by(|a, b| {
        a.week
            .cmp(&b.week)
            .then_with(|| a.allocation.consultant_id.cmp(&b.allocation.consultant_id))
            .then_with(|| a.allocation.project_id.cmp(&b.allocation.project_id))
            .then_with(|| a.position.cmp(&b.position))
    });

    let mut buckets: BTreeMap<(MonthKey, &str), f64> = BTreeMap::new();
    for item in &billable {
        let amount = item.allocation.hours * item.rate;
        for (month, days) in item.week.month_overlap() {
            if month < start || month > end {
                continue;
            }
            *buckets.entry((month, item.currency)).or_insert(0.0) += amount * days as f64 / 7.0;
        }
    }

    let entries = buckets
        .into_iter()
        .map(|((month, currency), revenue)| RevenueEntry {
            year: month.year,
            month: month.month,
            revenue,
            currency: currency.to_string(),
        })
        .collect();

    Ok(RevenueForecast {
        entries,
        skipped_count,
    })
}
