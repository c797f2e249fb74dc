//! Input validation for simulation runs.
//!
//! Checks process sets and policy parameters before any simulation work
//! begins. Detects:
//! - Duplicate IDs
//! - Non-positive burst times
//! - Negative arrival times
//! - Non-positive quanta
//!
//! Imported process lists are held to a stricter contract (positive ids,
//! non-empty labels, priority ≥ 1), see [`validate_import`].
//!
//! Every check runs; the caller receives all offending records at once.

use std::collections::HashSet;
use std::fmt;

use crate::import::ProcessRecord;
use crate::models::ProcessSpec;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description naming the offending record.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same ID.
    DuplicateId,
    /// A process ID is outside the accepted range.
    InvalidId,
    /// A process label is empty.
    EmptyLabel,
    /// Arrival time is negative.
    NegativeArrival,
    /// Burst time is zero or negative.
    NonPositiveBurst,
    /// Priority is outside the accepted range.
    InvalidPriority,
    /// A time quantum is zero or negative.
    NonPositiveQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a process set for a simulation run.
///
/// Checks:
/// 1. No duplicate process IDs
/// 2. Burst time > 0
/// 3. Arrival time ≥ 0
///
/// An empty set is valid.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_processes(processes: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for p in processes {
        if !ids.insert(p.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {} ('{}')", p.id, p.label),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!(
                    "Process {} ('{}') has non-positive burst time {}",
                    p.id, p.label, p.burst_time
                ),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!(
                    "Process {} ('{}') has negative arrival time {}",
                    p.id, p.label, p.arrival_time
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a time quantum.
///
/// `owner` names what the quantum belongs to (e.g. "round-robin",
/// "queue 0") and is included in the message.
pub fn validate_quantum(quantum: i64, owner: &str) -> Result<(), ValidationError> {
    if quantum <= 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Time quantum for {owner} must be positive, got {quantum}"),
        ));
    }
    Ok(())
}

/// Validates imported process records.
///
/// Checks:
/// 1. ID ≥ 1 and representable as a process ID
/// 2. No duplicate IDs
/// 3. Non-empty label
/// 4. Arrival time ≥ 0
/// 5. Burst time > 0
/// 6. Priority ≥ 1 and representable as a priority
///
/// Messages name the record by its position in the list and its ID.
pub fn validate_import(records: &[ProcessRecord]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for (index, r) in records.iter().enumerate() {
        let at = format!("record #{index} (id {})", r.id);

        if r.id < 1 || u32::try_from(r.id).is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidId,
                format!("{at}: id must be a positive integer"),
            ));
        }

        if !ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("{at}: duplicate process ID {}", r.id),
            ));
        }

        if r.label.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyLabel,
                format!("{at}: label must not be empty"),
            ));
        }

        if r.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("{at}: arrivalTime must be >= 0, got {}", r.arrival_time),
            ));
        }

        if r.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("{at}: burstTime must be > 0, got {}", r.burst_time),
            ));
        }

        if r.priority < 1 || i32::try_from(r.priority).is_err() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("{at}: priority must be >= 1, got {}", r.priority),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_processes() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new(1, 0, 5).with_priority(3),
            ProcessSpec::new(2, 2, 3).with_priority(1),
            ProcessSpec::new(3, 4, 8).with_priority(2),
        ]
    }

    fn record(id: i64, label: &str, arrival: i64, burst: i64, priority: i64) -> ProcessRecord {
        ProcessRecord {
            id,
            label: label.into(),
            arrival_time: arrival,
            burst_time: burst,
            priority,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_processes(&sample_processes()).is_ok());
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_processes(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_id() {
        let processes = vec![ProcessSpec::new(1, 0, 2), ProcessSpec::new(1, 3, 2)];

        let errors = validate_processes(&processes).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_positive_burst() {
        let processes = vec![ProcessSpec::new(1, 0, 0), ProcessSpec::new(2, 0, -4)];

        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
                .count(),
            2
        );
    }

    #[test]
    fn test_negative_arrival() {
        let processes = vec![ProcessSpec::new(4, -1, 2)];

        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
        assert!(errors[0].message.contains("Process 4"));
    }

    #[test]
    fn test_multiple_errors() {
        let processes = vec![ProcessSpec::new(1, -2, 0), ProcessSpec::new(1, 0, 1)];

        let errors = validate_processes(&processes).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum(1, "round-robin").is_ok());
        let err = validate_quantum(0, "round-robin").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveQuantum);
        assert!(err.message.contains("round-robin"));
        assert!(validate_quantum(-3, "queue 1").is_err());
    }

    #[test]
    fn test_import_valid() {
        let records = vec![record(1, "P1", 0, 5, 3), record(2, "P2", 2, 3, 1)];
        assert!(validate_import(&records).is_ok());
    }

    #[test]
    fn test_import_out_of_range_fields() {
        let records = vec![record(0, " ", -1, 0, 0)];

        let errors = validate_import(&records).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::InvalidId));
        assert!(kinds.contains(&ValidationErrorKind::EmptyLabel));
        assert!(kinds.contains(&ValidationErrorKind::NegativeArrival));
        assert!(kinds.contains(&ValidationErrorKind::NonPositiveBurst));
        assert!(kinds.contains(&ValidationErrorKind::InvalidPriority));
        assert!(errors.iter().all(|e| e.message.starts_with("record #0")));
    }

    #[test]
    fn test_import_duplicate_names_record() {
        let records = vec![record(5, "A", 0, 1, 1), record(5, "B", 0, 1, 1)];

        let errors = validate_import(&records).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
        assert!(errors[0].message.contains("record #1"));
    }

    #[test]
    fn test_import_id_overflow() {
        let records = vec![record(i64::from(u32::MAX) + 1, "big", 0, 1, 1)];

        let errors = validate_import(&records).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidId);
    }
}
