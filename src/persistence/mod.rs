use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

use crate::snapshot::Snapshot;
use crate::validation::{self, SnapshotValidationError};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<SnapshotValidationError> for PersistenceError {
    fn from(value: SnapshotValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

pub fn validate_snapshot(snapshot: &Snapshot) -> PersistenceResult<()> {
    validation::validate_snapshot(snapshot)?;
    Ok(())
}

pub mod file;

pub use file::{
    load_allocations_from_csv, load_snapshot_from_json, save_allocations_to_csv,
    save_forecast_to_csv, save_snapshot_to_json,
};
