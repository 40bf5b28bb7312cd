use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::week::WeekKey;

pub type CalendarId = i64;
pub type ConsultantId = i64;
pub type RoleId = i64;
pub type TeamId = i64;
pub type ProjectId = i64;
pub type CustomerId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consultant {
    pub id: ConsultantId,
    pub name: String,
    pub calendar_id: CalendarId,
    /// Share of full time employment, 0-100.
    pub work_percentage: f64,
    /// Share of capacity consumed by non-billable work, 0-100.
    #[serde(default)]
    pub overhead_percentage: f64,
    pub role_id: RoleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub is_external: bool,
}

impl Consultant {
    pub fn new(id: ConsultantId, name: impl Into<String>, calendar_id: CalendarId) -> Self {
        Self {
            id,
            name: name.into(),
            calendar_id,
            work_percentage: 100.0,
            overhead_percentage: 0.0,
            role_id: 0,
            team_id: None,
            is_external: false,
        }
    }

    pub fn with_work_percentage(mut self, work_percentage: f64) -> Self {
        self.work_percentage = work_percentage;
        self
    }

    pub fn with_overhead_percentage(mut self, overhead_percentage: f64) -> Self {
        self.overhead_percentage = overhead_percentage;
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Customer,
    Internal,
    Absence,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Customer => "customer",
            ProjectType::Internal => "internal",
            ProjectType::Absence => "absence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub customer_id: CustomerId,
    pub project_type: ProjectType,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Project {
    pub fn new(
        id: ProjectId,
        name: impl Into<String>,
        customer_id: CustomerId,
        project_type: ProjectType,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            customer_id,
            project_type,
            is_active: true,
            start_date: None,
            end_date: None,
            color: None,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            billing_rate: None,
            currency: None,
            is_active: true,
        }
    }

    pub fn with_billing(mut self, rate: f64, currency: impl Into<String>) -> Self {
        self.billing_rate = Some(rate);
        self.currency = Some(currency.into());
        self
    }

    /// Rate and currency, when both are set.
    pub fn billing(&self) -> Option<(f64, &str)> {
        match (self.billing_rate, self.currency.as_deref()) {
            (Some(rate), Some(currency)) if !currency.trim().is_empty() => Some((rate, currency)),
            _ => None,
        }
    }
}

/// Hours a consultant is booked on a project in one ISO week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub consultant_id: ConsultantId,
    pub project_id: ProjectId,
    pub year: i32,
    pub week: u32,
    pub hours: f64,
}

impl Allocation {
    pub fn new(
        consultant_id: ConsultantId,
        project_id: ProjectId,
        year: i32,
        week: u32,
        hours: f64,
    ) -> Self {
        Self {
            consultant_id,
            project_id,
            year,
            week,
            hours,
        }
    }

    /// The allocation's week, if it names a real ISO week.
    pub fn week_key(&self) -> Option<WeekKey> {
        WeekKey::new(self.year, self.week).ok()
    }

    pub fn has_valid_hours(&self) -> bool {
        self.hours.is_finite() && self.hours >= 0.0
    }
}

fn default_true() -> bool {
    true
}
