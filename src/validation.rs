use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

use crate::snapshot::Snapshot;

const EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SnapshotValidationError {
    message: String,
}

impl SnapshotValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn unique_ids<T, K, F>(kind: &str, items: &[T], id: F) -> Result<(), SnapshotValidationError>
where
    K: Eq + Hash + std::fmt::Display,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        let key = id(item);
        if seen.contains(&key) {
            return Err(SnapshotValidationError::new(format!(
                "duplicate {kind} id {key}"
            )));
        }
        seen.insert(key);
    }
    Ok(())
}

fn percentage_in_range(value: f64) -> bool {
    value.is_finite() && value >= -EPSILON && value <= 100.0 + EPSILON
}

/// Structural checks run when a snapshot enters the process.
///
/// Allocation rows are not checked here; the engine skips and counts bad
/// rows itself so a single bad allocation never rejects a whole snapshot.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<(), SnapshotValidationError> {
    unique_ids("calendar", &snapshot.calendars, |c| c.id())?;
    unique_ids("consultant", &snapshot.consultants, |c| c.id)?;
    unique_ids("role", &snapshot.roles, |r| r.id)?;
    unique_ids("team", &snapshot.teams, |t| t.id)?;
    unique_ids("project", &snapshot.projects, |p| p.id)?;
    unique_ids("customer", &snapshot.customers, |c| c.id)?;

    for calendar in &snapshot.calendars {
        let base = calendar.base_hours_per_week();
        if !base.is_finite() || base < 0.0 {
            return Err(SnapshotValidationError::new(format!(
                "calendar {} has invalid base_hours_per_week {}",
                calendar.id(),
                base
            )));
        }
        for (week, hours) in calendar.holiday_weeks() {
            if !hours.is_finite() || hours < 0.0 {
                return Err(SnapshotValidationError::new(format!(
                    "calendar {} has invalid holiday deduction {} in {}",
                    calendar.id(),
                    hours,
                    week
                )));
            }
            if hours > base + EPSILON {
                return Err(SnapshotValidationError::new(format!(
                    "calendar {} deducts {} hours in {} but the base week is {} hours",
                    calendar.id(),
                    hours,
                    week,
                    base
                )));
            }
        }
    }

    for consultant in &snapshot.consultants {
        if !percentage_in_range(consultant.work_percentage) {
            return Err(SnapshotValidationError::new(format!(
                "consultant {} has invalid work_percentage {} (must be between 0 and 100)",
                consultant.id, consultant.work_percentage
            )));
        }
        if !percentage_in_range(consultant.overhead_percentage) {
            return Err(SnapshotValidationError::new(format!(
                "consultant {} has invalid overhead_percentage {} (must be between 0 and 100)",
                consultant.id, consultant.overhead_percentage
            )));
        }
    }

    for customer in &snapshot.customers {
        if let Some(rate) = customer.billing_rate {
            if !rate.is_finite() || rate < 0.0 {
                return Err(SnapshotValidationError::new(format!(
                    "customer {} has invalid billing_rate {}",
                    customer.id, rate
                )));
            }
        }
        if let Some(currency) = &customer.currency {
            if currency.trim().is_empty() {
                return Err(SnapshotValidationError::new(format!(
                    "customer {} has an empty currency",
                    customer.id
                )));
            }
        }
    }

    Ok(())
}
