//! JSON import and export of process lists.
//!
//! The persisted format is an ordered array of records:
//!
//! ```json
//! [
//!   { "id": 1, "label": "P1", "arrivalTime": 0, "burstTime": 5, "priority": 3 }
//! ]
//! ```
//!
//! Numeric fields are read as `i64` first, so a value that fits in `i64` but
//! is out of range for a process (negative arrival, zero burst, priority 0,
//! an id above `u32::MAX`, ...) is reported as a validation error naming the
//! record. Values that do not fit in `i64` at all, or are not integers, are
//! an [`ImportError::Parse`].

use serde::{Deserialize, Serialize};

use crate::error::ImportError;
use crate::models::{ProcessId, ProcessSpec};
use crate::validation::validate_import;

/// A process record as it appears in a persisted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRecord {
    /// Process identifier (≥ 1).
    pub id: i64,
    /// Display label (non-empty).
    pub label: String,
    /// Arrival time (≥ 0).
    pub arrival_time: i64,
    /// Burst time (> 0).
    pub burst_time: i64,
    /// Priority (≥ 1, lower = more important).
    pub priority: i64,
}

impl From<&ProcessSpec> for ProcessRecord {
    fn from(spec: &ProcessSpec) -> Self {
        Self {
            id: i64::from(spec.id),
            label: spec.label.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: i64::from(spec.priority),
        }
    }
}

/// Parses and validates a JSON process list.
///
/// # Errors
/// - [`ImportError::Parse`] if the text is not an array of records.
/// - [`ImportError::Invalid`] listing every offending record.
pub fn import_json(text: &str) -> Result<Vec<ProcessSpec>, ImportError> {
    let records: Vec<ProcessRecord> = serde_json::from_str(text)?;
    import_records(&records)
}

/// Validates records and converts them to process specs.
pub fn import_records(records: &[ProcessRecord]) -> Result<Vec<ProcessSpec>, ImportError> {
    validate_import(records).map_err(ImportError::Invalid)?;

    let mut specs = Vec::with_capacity(records.len());
    for r in records {
        // Ranges were checked by validate_import.
        let (Ok(id), Ok(priority)) = (ProcessId::try_from(r.id), i32::try_from(r.priority)) else {
            continue;
        };
        specs.push(ProcessSpec {
            id,
            label: r.label.clone(),
            arrival_time: r.arrival_time,
            burst_time: r.burst_time,
            priority,
        });
    }
    Ok(specs)
}

/// Serializes a process list as pretty-printed JSON.
pub fn export_json(processes: &[ProcessSpec]) -> Result<String, ImportError> {
    let records: Vec<ProcessRecord> = processes.iter().map(ProcessRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
