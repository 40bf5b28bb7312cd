use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::calculations::capacity::{ConsultantCapacity, resolve_capacity_table};
use crate::calculations::forecast::{RevenueForecast, forecast};
use crate::calculations::kpi::{DashboardKpis, compute_kpis};
use crate::calculations::utilization::{UtilizationReport, aggregate};
use crate::calendar::WorkCalendar;
use crate::error::EngineResult;
use crate::model::{Allocation, Consultant, Customer, Project, Role, Team, TeamId};
use crate::week::{Clock, WeekKey, current_year_week, week_range};

/// Every record the engine reads, as fetched from the backend at one point
/// in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub calendars: Vec<WorkCalendar>,
    #[serde(default)]
    pub consultants: Vec<Consultant>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub allocations: Vec<Allocation>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every consultant's capacity for one week.
    pub fn capacity(&self, year: i32, week: u32) -> EngineResult<Vec<ConsultantCapacity>> {
        let week = WeekKey::new(year, week)?;
        Ok(resolve_capacity_table(
            &self.consultants,
            &self.calendars,
            &[week],
        ))
    }

    pub fn aggregate(
        &self,
        year_from: i32,
        week_from: u32,
        year_to: i32,
        week_to: u32,
    ) -> EngineResult<UtilizationReport> {
        let weeks = week_range(year_from, week_from, year_to, week_to)?;
        Ok(aggregate(
            &self.consultants,
            &self.allocations,
            &self.projects,
            &self.customers,
            &self.calendars,
            &weeks,
        ))
    }

    /// Restrict the snapshot to one team's consultants and their allocations.
    pub fn filter_team(&self, team_id: TeamId) -> Snapshot {
        let consultants: Vec<Consultant> = self
            .consultants
            .iter()
            .filter(|c| c.team_id == Some(team_id))
            .cloned()
            .collect();
        let members: HashSet<_> = consultants.iter().map(|c| c.id).collect();
        let allocations = self
            .allocations
            .iter()
            .filter(|a| members.contains(&a.consultant_id))
            .cloned()
            .collect();
        Snapshot {
            consultants,
            allocations,
            ..self.clone()
        }
    }

    pub fn compute_kpis(&self, week: WeekKey) -> DashboardKpis {
        compute_kpis(
            &self.consultants,
            &self.customers,
            &self.projects,
            &self.allocations,
            &self.calendars,
            week,
        )
    }

    pub fn current_kpis(&self, clock: &dyn Clock) -> DashboardKpis {
        self.compute_kpis(current_year_week(clock))
    }

    pub fn forecast(
        &self,
        year_from: i32,
        month_from: u32,
        year_to: i32,
        month_to: u32,
    ) -> EngineResult<RevenueForecast> {
        forecast(
            &self.allocations,
            &self.projects,
            &self.customers,
            year_from,
            month_from,
            year_to,
            month_to,
        )
    }
}
