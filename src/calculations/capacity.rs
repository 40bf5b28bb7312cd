use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calculations::index_by;
use crate::calendar::WorkCalendar;
use crate::error::{EngineError, EngineResult};
use crate::model::{Consultant, ConsultantId};
use crate::week::WeekKey;

/// Capacity of one consultant in one week.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub week: WeekKey,
    /// Hours the consultant could work, before overhead.
    pub capacity_hours_per_week: f64,
    /// Billable hours left after overhead.
    pub hours_per_week: f64,
}

/// Resolve a consultant's capacity for an ISO week.
///
/// `calendar` must be the consultant's own calendar. A missing calendar is an
/// error; no default is substituted.
pub fn resolve_capacity(
    consultant: &Consultant,
    calendar: Option<&WorkCalendar>,
    year: i32,
    week: u32,
) -> EngineResult<CapacitySnapshot> {
    let week = WeekKey::new(year, week)?;
    resolve_week(consultant, calendar, week)
}

pub(crate) fn resolve_week(
    consultant: &Consultant,
    calendar: Option<&WorkCalendar>,
    week: WeekKey,
) -> EngineResult<CapacitySnapshot> {
    let calendar = own_calendar(consultant, calendar)?;
    let available = calendar.base_hours_per_week() - calendar.holiday_deduction(week);
    let capacity = (available * consultant.work_percentage / 100.0).max(0.0);
    let billable = (capacity * (1.0 - consultant.overhead_percentage / 100.0)).max(0.0);

    Ok(CapacitySnapshot {
        week,
        capacity_hours_per_week: capacity,
        hours_per_week: billable,
    })
}

/// The consultant's own calendar. Any other calendar counts as missing.
fn own_calendar<'a>(
    consultant: &Consultant,
    calendar: Option<&'a WorkCalendar>,
) -> EngineResult<&'a WorkCalendar> {
    match calendar {
        Some(calendar) if calendar.id() == consultant.calendar_id => Ok(calendar),
        _ => Err(EngineError::MissingCalendar {
            consultant_id: consultant.id,
            calendar_id: consultant.calendar_id,
        }),
    }
}

/// Capacity of one consultant across a week range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultantCapacity {
    pub consultant_id: ConsultantId,
    pub weeks: EngineResult<Vec<CapacitySnapshot>>,
}

/// Resolve every consultant over `weeks`. Consultants are independent, so
/// they are resolved in parallel; output keeps the input order.
pub fn resolve_capacity_table(
    consultants: &[Consultant],
    calendars: &[WorkCalendar],
    weeks: &[WeekKey],
) -> Vec<ConsultantCapacity> {
    let calendars = index_by(calendars, WorkCalendar::id);
    consultants
        .par_iter()
        .map(|consultant| {
            // The calendar is checked even when `weeks` is empty.
            let calendar = calendars.get(&consultant.calendar_id).copied();
            let resolved = own_calendar(consultant, calendar).and_then(|calendar| {
                weeks
                    .iter()
                    .map(|week| resolve_week(consultant, Some(calendar), *week))
                    .collect::<EngineResult<Vec<_>>>()
            });
            ConsultantCapacity {
                consultant_id: consultant.id,
                weeks: resolved,
            }
        })
        .collect()
}
