use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calculations::capacity::resolve_week;
use crate::calculations::{index_by, round_half_up};
use crate::calendar::WorkCalendar;
use crate::error::ConsultantWarning;
use crate::model::{Allocation, Consultant, ConsultantId, Customer, Project, ProjectType};
use crate::week::WeekKey;

/// Dashboard figures for a single week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardKpis {
    pub week: WeekKey,
    pub consultant_count: usize,
    pub customer_count: usize,
    /// Active customer projects. Internal and absence projects do not count.
    pub active_project_count: usize,
    /// Fleet-wide allocation for the week; 0 when there is no capacity.
    pub allocation_this_week_percent: i64,
    pub total_hours_allocated: f64,
    pub total_capacity_hours: f64,
    pub skipped_count: usize,
    pub warnings: Vec<ConsultantWarning>,
}

pub fn compute_kpis(
    consultants: &[Consultant],
    customers: &[Customer],
    projects: &[Project],
    allocations: &[Allocation],
    calendars: &[WorkCalendar],
    current_week: WeekKey,
) -> DashboardKpis {
    let calendars_by_id = index_by(calendars, WorkCalendar::id);
    let projects_by_id = index_by(projects, |p| p.id);

    let mut seen = HashSet::with_capacity(consultants.len());
    let mut counted: HashSet<ConsultantId> = HashSet::with_capacity(consultants.len());
    let mut warnings = Vec::new();
    let mut total_capacity = 0.0;
    for consultant in consultants.iter().filter(|c| seen.insert(c.id)) {
        let calendar = calendars_by_id.get(&consultant.calendar_id).copied();
        match resolve_week(consultant, calendar, current_week) {
            Ok(snapshot) => {
                total_capacity += snapshot.capacity_hours_per_week;
                counted.insert(consultant.id);
            }
            Err(error) => warnings.push(ConsultantWarning::new(consultant.id, error)),
        }
    }

    let mut skipped_count = 0;
    let mut total_allocated = 0.0;
    for allocation in allocations {
        if allocation.week_key() != Some(current_week) {
            continue;
        }
        if !seen.contains(&allocation.consultant_id)
            || !projects_by_id.contains_key(&allocation.project_id)
            || !allocation.has_valid_hours()
        {
            skipped_count += 1;
            continue;
        }
        if counted.contains(&allocation.consultant_id) {
            total_allocated += allocation.hours;
        }
    }

    let allocation_this_week_percent = if total_capacity > 0.0 {
        round_half_up(total_allocated / total_capacity * 100.0)
    } else {
        0
    };

    let active_project_count = projects
        .iter()
        .filter(|p| p.is_active && p.project_type == ProjectType::Customer)
        .count();

    DashboardKpis {
        week: current_week,
        consultant_count: seen.len(),
        customer_count: index_by(customers, |c| c.id).len(),
        active_project_count,
        allocation_this_week_percent,
        total_hours_allocated: total_allocated,
        total_capacity_hours: total_capacity,
        skipped_count,
        warnings,
    }
}
