use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::telemetry::TelemetryFrame;
use crate::Airport;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0} is empty")]
    Empty(String),
}

pub fn read_json_file<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, DataError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Reads an airport list (a JSON array of airports).
pub fn read_airports_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Airport>, DataError> {
    read_json_file(path)
}

/// Reads a recorded telemetry script: a JSON array of frames, each mapping
/// quantities to unit-tagged samples. A script needs at least one frame.
pub fn read_telemetry_script<P: AsRef<Path>>(path: P) -> Result<Vec<TelemetryFrame>, DataError> {
    let path = path.as_ref();
    let frames: Vec<TelemetryFrame> = read_json_file(path)?;
    if frames.is_empty() {
        return Err(DataError::Empty(path.display().to_string()));
    }
    Ok(frames)
}
