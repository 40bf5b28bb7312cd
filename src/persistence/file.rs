use super::{PersistenceError, PersistenceResult};
use crate::calculations::forecast::RevenueForecast;
use crate::model::Allocation;
use crate::snapshot::Snapshot;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

pub fn save_snapshot_to_json<P: AsRef<Path>>(
    snapshot: &Snapshot,
    path: P,
) -> PersistenceResult<()> {
    super::validate_snapshot(snapshot)?;
    let file = File::create(path.as_ref())?;
    serde_json::to_writer_pretty(file, snapshot)?;
    debug!(path = %path.as_ref().display(), "snapshot written");
    Ok(())
}

pub fn load_snapshot_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Snapshot> {
    let file = File::open(path.as_ref())?;
    let snapshot: Snapshot = serde_json::from_reader(file)?;
    super::validate_snapshot(&snapshot)?;
    info!(
        path = %path.as_ref().display(),
        consultants = snapshot.consultants.len(),
        projects = snapshot.projects.len(),
        allocations = snapshot.allocations.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

#[derive(Debug, Serialize, Deserialize)]
struct AllocationCsvRecord {
    consultant_id: i64,
    project_id: i64,
    year: i32,
    week: u32,
    hours: String,
}

impl From<&Allocation> for AllocationCsvRecord {
    fn from(allocation: &Allocation) -> Self {
        Self {
            consultant_id: allocation.consultant_id,
            project_id: allocation.project_id,
            year: allocation.year,
            week: allocation.week,
            hours: allocation.hours.to_string(),
        }
    }
}

impl AllocationCsvRecord {
    fn into_allocation(self) -> PersistenceResult<Allocation> {
        let hours = parse_f64(&self.hours)?;
        Ok(Allocation::new(
            self.consultant_id,
            self.project_id,
            self.year,
            self.week,
            hours,
        ))
    }
}

/// Write allocations as `consultant_id,project_id,year,week,hours`.
pub fn save_allocations_to_csv<P: AsRef<Path>>(
    allocations: &[Allocation],
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    for allocation in allocations {
        writer.serialize(AllocationCsvRecord::from(allocation))?;
    }
    writer.flush()?;
    debug!(path = %path.as_ref().display(), rows = allocations.len(), "allocations written");
    Ok(())
}

/// Read allocation rows. Rows are returned as-is; the engine decides which
/// of them it can use.
pub fn load_allocations_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<Vec<Allocation>> {
    let file = File::open(path.as_ref())?;
    let mut reader = csv::Reader::from_reader(file);
    let mut allocations = Vec::new();
    for record in reader.deserialize::<AllocationCsvRecord>() {
        allocations.push(record?.into_allocation()?);
    }
    info!(path = %path.as_ref().display(), rows = allocations.len(), "allocations imported");
    Ok(allocations)
}

#[derive(Debug, Serialize)]
struct ForecastCsvRecord<'a> {
    year: i32,
    month: u32,
    currency: &'a str,
    revenue: String,
}

pub fn save_forecast_to_csv<P: AsRef<Path>>(
    forecast: &RevenueForecast,
    path: P,
) -> PersistenceResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    for entry in &forecast.entries {
        writer.serialize(ForecastCsvRecord {
            year: entry.year,
            month: entry.month,
            currency: &entry.currency,
            revenue: format!("{:.2}", entry.revenue),
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_f64(input: &str) -> PersistenceResult<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|e| PersistenceError::InvalidData(format!("invalid float '{input}': {e}")))
}
