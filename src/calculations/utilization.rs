use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use crate::calculations::capacity::{CapacitySnapshot, resolve_capacity_table};
use crate::calculations::{index_by, round_half_up};
use crate::calendar::WorkCalendar;
use crate::error::ConsultantWarning;
use crate::model::{
    Allocation, Consultant, ConsultantId, Customer, CustomerId, Project, ProjectId,
};
use crate::week::WeekKey;

pub const INFINITE_OVERALLOCATION: &str = "INFINITE_OVERALLOCATION";

/// Allocated hours relative to billable capacity.
///
/// Values above 100 are kept as-is. When a consultant has no billable
/// capacity but still carries allocated hours the ratio is undefined and
/// reported as [`AllocationPercent::InfiniteOverallocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PercentRepr", into = "PercentRepr")]
pub enum AllocationPercent {
    Percent(i64),
    InfiniteOverallocation,
}

impl AllocationPercent {
    pub fn from_hours(allocated: f64, billable: f64) -> Self {
        if billable <= 0.0 {
            if allocated > 0.0 {
                AllocationPercent::InfiniteOverallocation
            } else {
                AllocationPercent::Percent(0)
            }
        } else {
            AllocationPercent::Percent(round_half_up(allocated / billable * 100.0))
        }
    }

    pub fn as_percent(&self) -> Option<i64> {
        match self {
            AllocationPercent::Percent(value) => Some(*value),
            AllocationPercent::InfiniteOverallocation => None,
        }
    }

    pub fn is_overallocated(&self) -> bool {
        match self {
            AllocationPercent::Percent(value) => *value > 100,
            AllocationPercent::InfiniteOverallocation => true,
        }
    }
}

impl fmt::Display for AllocationPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationPercent::Percent(value) => write!(f, "{value}%"),
            AllocationPercent::InfiniteOverallocation => write!(f, "{INFINITE_OVERALLOCATION}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PercentRepr {
    Percent(i64),
    Sentinel(String),
}

impl From<AllocationPercent> for PercentRepr {
    fn from(value: AllocationPercent) -> Self {
        match value {
            AllocationPercent::Percent(value) => PercentRepr::Percent(value),
            AllocationPercent::InfiniteOverallocation => {
                PercentRepr::Sentinel(INFINITE_OVERALLOCATION.to_string())
            }
        }
    }
}

impl TryFrom<PercentRepr> for AllocationPercent {
    type Error = String;

    fn try_from(value: PercentRepr) -> Result<Self, Self::Error> {
        match value {
            PercentRepr::Percent(value) => Ok(AllocationPercent::Percent(value)),
            PercentRepr::Sentinel(text) if text == INFINITE_OVERALLOCATION => {
                Ok(AllocationPercent::InfiniteOverallocation)
            }
            PercentRepr::Sentinel(text) => Err(format!("unknown allocation percent '{text}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHours {
    pub project_id: ProjectId,
    pub project_name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekUtilization {
    pub week: WeekKey,
    pub capacity_hours_per_week: f64,
    pub hours_per_week: f64,
    pub total_hours_allocated: f64,
    pub allocation_percent: AllocationPercent,
    pub project_breakdown: Vec<ProjectHours>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantUtilization {
    pub consultant_id: ConsultantId,
    pub consultant_name: String,
    pub weeks: Vec<WeekUtilization>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTotal {
    pub project_id: ProjectId,
    pub project_name: String,
    pub customer_id: CustomerId,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTotal {
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub hours: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub consultants: Vec<ConsultantUtilization>,
    pub project_totals: Vec<ProjectTotal>,
    pub customer_totals: Vec<CustomerTotal>,
    /// Allocation rows dropped for dangling ids, bad hours or bad weeks.
    pub skipped_count: usize,
    pub warnings: Vec<ConsultantWarning>,
}

impl UtilizationReport {
    pub fn consultant(&self, consultant_id: ConsultantId) -> Option<&ConsultantUtilization> {
        self.consultants
            .iter()
            .find(|entry| entry.consultant_id == consultant_id)
    }
}

/// Hours descending, then name ascending, then id ascending.
fn by_hours_then_name(a: (f64, &str, i64), b: (f64, &str, i64)) -> Ordering {
    b.0.total_cmp(&a.0)
        .then_with(|| a.1.cmp(b.1))
        .then_with(|| a.2.cmp(&b.2))
}

/// Aggregate allocations per consultant and week over `weeks`.
///
/// Allocations outside `weeks` are ignored. Rows with unknown consultant or
/// project ids, invalid hours, or weeks that do not exist on the ISO calendar
/// are skipped and counted. A consultant whose calendar is missing is left out
/// of `consultants` and reported in `warnings`.
pub fn aggregate(
    consultants: &[Consultant],
    allocations: &[Allocation],
    projects: &[Project],
    customers: &[Customer],
    calendars: &[WorkCalendar],
    weeks: &[WeekKey],
) -> UtilizationReport {
    let consultants_by_id = index_by(consultants, |c| c.id);
    let projects_by_id = index_by(projects, |p| p.id);
    let customers_by_id = index_by(customers, |c| c.id);
    let in_range: HashSet<WeekKey> = weeks.iter().copied().collect();

    let mut skipped_count = 0;
    let mut booked: HashMap<(ConsultantId, WeekKey), BTreeMap<ProjectId, f64>> = HashMap::new();
    let mut project_hours: BTreeMap<ProjectId, f64> = BTreeMap::new();

    for allocation in allocations {
        let Some(week) = allocation.week_key() else {
            skipped_count += 1;
            continue;
        };
        if !in_range.contains(&week) {
            continue;
        }
        if !consultants_by_id.contains_key(&allocation.consultant_id)
            || !projects_by_id.contains_key(&allocation.project_id)
            || !allocation.has_valid_hours()
        {
            skipped_count += 1;
            continue;
        }
        *booked
            .entry((allocation.consultant_id, week))
            .or_default()
            .entry(allocation.project_id)
            .or_insert(0.0) += allocation.hours;
        *project_hours.entry(allocation.project_id).or_insert(0.0) += allocation.hours;
    }

    let mut seen = HashSet::with_capacity(consultants.len());
    let unique: Vec<Consultant> = consultants
        .iter()
        .filter(|c| seen.insert(c.id))
        .cloned()
        .collect();
    let capacities = resolve_capacity_table(&unique, calendars, weeks);

    let mut rows = Vec::with_capacity(unique.len());
    let mut warnings = Vec::new();
    for (consultant, capacity) in unique.iter().zip(capacities) {
        match capacity.weeks {
            Ok(snapshots) => {
                let weeks = snapshots
                    .iter()
                    .map(|snapshot| {
                        week_row(
                            snapshot,
                            booked.get(&(consultant.id, snapshot.week)),
                            &projects_by_id,
                        )
                    })
                    .collect();
                rows.push(ConsultantUtilization {
                    consultant_id: consultant.id,
                    consultant_name: consultant.name.clone(),
                    weeks,
                });
            }
            Err(error) => warnings.push(ConsultantWarning::new(consultant.id, error)),
        }
    }
    rows.sort_by(|a, b| {
        a.consultant_name
            .cmp(&b.consultant_name)
            .then_with(|| a.consultant_id.cmp(&b.consultant_id))
    });

    let mut project_totals: Vec<ProjectTotal> = project_hours
        .iter()
        .filter_map(|(project_id, hours)| {
            projects_by_id.get(project_id).map(|project| ProjectTotal {
                project_id: *project_id,
                project_name: project.name.clone(),
                customer_id: project.customer_id,
                hours: *hours,
            })
        })
        .collect();
    project_totals.sort_by(|a, b| {
        by_hours_then_name(
            (a.hours, a.project_name.as_str(), a.project_id),
            (b.hours, b.project_name.as_str(), b.project_id),
        )
    });

    let mut customer_hours: BTreeMap<CustomerId, f64> = BTreeMap::new();
    for total in &project_totals {
        if customers_by_id.contains_key(&total.customer_id) {
            *customer_hours.entry(total.customer_id).or_insert(0.0) += total.hours;
        }
    }
    let mut customer_totals: Vec<CustomerTotal> = customer_hours
        .into_iter()
        .filter_map(|(customer_id, hours)| {
            customers_by_id.get(&customer_id).map(|customer| CustomerTotal {
                customer_id,
                customer_name: customer.name.clone(),
                hours,
            })
        })
        .collect();
    customer_totals.sort_by(|a, b| {
        by_hours_then_name(
            (a.hours, a.customer_name.as_str(), a.customer_id),
            (b.hours, b.customer_name.as_str(), b.customer_id),
        )
    });

    UtilizationReport {
        consultants: rows,
        project_totals,
        customer_totals,
        skipped_count,
        warnings,
    }
}

fn week_row(
    snapshot: &CapacitySnapshot,
    booked: Option<&BTreeMap<ProjectId, f64>>,
    projects_by_id: &HashMap<ProjectId, &Project>,
) -> WeekUtilization {
    let mut breakdown: Vec<ProjectHours> = booked
        .into_iter()
        .flatten()
        .filter_map(|(project_id, hours)| {
            projects_by_id.get(project_id).map(|project| ProjectHours {
                project_id: *project_id,
                project_name: project.name.clone(),
                hours: *hours,
            })
        })
        .collect();
    breakdown.sort_by(|a, b| {
        by_hours_then_name(
            (a.hours, a.project_name.as_str(), a.project_id),
            (b.hours, b.project_name.as_str(), b.project_id),
        )
    });

    let total: f64 = breakdown.iter().map(|entry| entry.hours).sum();
    WeekUtilization {
        week: snapshot.week,
        capacity_hours_per_week: snapshot.capacity_hours_per_week,
        hours_per_week: snapshot.hours_per_week,
        total_hours_allocated: total,
        allocation_percent: AllocationPercent::from_hours(total, snapshot.hours_per_week),
        project_breakdown: breakdown,
    }
}
