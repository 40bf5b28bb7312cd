pub mod calculations;
pub mod calendar;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
#[cfg(any(feature = "cli", feature = "http_api"))]
pub mod logging;
pub mod model;
pub mod persistence;
pub mod report;
pub mod snapshot;
pub mod validation;
pub mod week;

pub use calculations::capacity::{
    CapacitySnapshot, ConsultantCapacity, resolve_capacity, resolve_capacity_table,
};
pub use calculations::forecast::{RevenueEntry, RevenueForecast, forecast};
pub use calculations::kpi::{DashboardKpis, compute_kpis};
pub use calculations::round_half_up;
pub use calculations::utilization::{
    AllocationPercent, ConsultantUtilization, CustomerTotal, INFINITE_OVERALLOCATION,
    ProjectHours, ProjectTotal, UtilizationReport, WeekUtilization, aggregate,
};
pub use calendar::{HolidayWeek, WorkCalendar, WorkCalendarConfig};
pub use config::{ConfigError, ServiceConfig};
pub use error::{ConsultantWarning, EngineError, EngineResult};
pub use model::{
    Allocation, CalendarId, Consultant, ConsultantId, Customer, CustomerId, Project, ProjectId,
    ProjectType, Role, RoleId, Team, TeamId,
};
pub use persistence::{
    PersistenceError, load_allocations_from_csv, load_snapshot_from_json,
    save_allocations_to_csv, save_forecast_to_csv, save_snapshot_to_json,
};
pub use report::UtilizationSummary;
pub use snapshot::Snapshot;
pub use validation::{SnapshotValidationError, validate_snapshot};
pub use week::{
    Clock, FixedClock, Locale, MonthKey, SystemClock, WeekKey, current_year_week, month_label,
    month_range, week_date_range, week_range, weeks_in_year,
};
