use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{CalendarId, ConsultantId};

/// Failures raised by the computation engine.
///
/// Range errors are fatal to the call that received them. `MissingCalendar`
/// is fatal only for the consultant it names; the aggregators catch it and
/// surface it as a [`ConsultantWarning`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineError {
    #[error("invalid ISO week {week} for year {year}")]
    InvalidWeek { year: i32, week: u32 },

    #[error("invalid year {year}: years must not be negative")]
    InvalidYear { year: i32 },

    #[error("invalid month {month}: expected 1-12")]
    InvalidMonth { month: u32 },

    #[error("consultant {consultant_id} references calendar {calendar_id} which is not in the snapshot")]
    MissingCalendar {
        consultant_id: ConsultantId,
        calendar_id: CalendarId,
    },
}

pub type EngineResult<T> = Result<T, EngineError>;

/// A per-consultant failure that was isolated instead of aborting a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultantWarning {
    pub consultant_id: ConsultantId,
    pub error: EngineError,
}

impl ConsultantWarning {
    pub fn new(consultant_id: ConsultantId, error: EngineError) -> Self {
        Self {
            consultant_id,
            error,
        }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}
