//! Error types for simulation runs and process-list import.
//!
//! All errors are immediate and final for the invocation that raised
//! them: the engine performs no I/O, so nothing is retryable. Callers may
//! retry with corrected input.
//!
//! # Categories
//! - **Validation**: malformed input, reported before any simulation work.
//! - **Configuration**: unknown policy, missing or inconsistent parameters.
//! - **Invariant violation**: an internal logic defect, reported with the
//!   full pending state for diagnosis.
//! - **Resource exhaustion**: the run would exceed its time cap.

use std::fmt;

use crate::models::ProcessRunState;
use crate::validation::ValidationError;

/// Errors from a simulation run.
#[derive(Debug)]
#[non_exhaustive]
pub enum SimulationError {
    /// Input failed validation. Contains every detected issue.
    Validation(Vec<ValidationError>),
    /// Policy identifier or parameters are unusable.
    Configuration(ConfigurationError),
    /// The engine reached a state it can never leave.
    InvariantViolation {
        /// Simulated clock when the violation was detected.
        clock: i64,
        /// What went wrong.
        message: String,
        /// Processes that had not completed.
        pending: Vec<ProcessRunState>,
    },
    /// Simulated time would pass the configured limit.
    ResourceExhausted {
        /// Configured time limit.
        limit: i64,
        /// Clock at the dispatch that would exceed it.
        clock: i64,
    },
}

/// Configuration problems detected before a run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// Policy identifier is not recognised.
    UnsupportedPolicy(String),
    /// The chosen policy needs a parameter that was not supplied.
    MissingParameter {
        /// Policy identifier.
        policy: &'static str,
        /// Name of the missing parameter.
        parameter: &'static str,
    },
    /// Multilevel queue setup is inconsistent.
    InvalidQueueSetup(String),
}

/// Errors from importing or exporting a process list.
#[derive(Debug)]
#[non_exhaustive]
pub enum ImportError {
    /// Input is not well-formed JSON of the expected shape.
    Parse(serde_json::Error),
    /// Records parsed but failed validation.
    Invalid(Vec<ValidationError>),
}

impl SimulationError {
    /// Whether this is a validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether this is a configuration failure.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Validation errors, if any.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "invalid input ({} error(s))", errors.len())?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
            Self::Configuration(err) => write!(f, "configuration error: {err}"),
            Self::InvariantViolation {
                clock,
                message,
                pending,
            } => write!(
                f,
                "invariant violation at t={clock}: {message} ({} process(es) pending)",
                pending.len()
            ),
            Self::ResourceExhausted { limit, clock } => write!(
                f,
                "simulated time limit {limit} exceeded (clock at {clock})"
            ),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Configuration(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigurationError> for SimulationError {
    fn from(err: ConfigurationError) -> Self {
        Self::Configuration(err)
    }
}

impl From<Vec<ValidationError>> for SimulationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<ValidationError> for SimulationError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(vec![err])
    }
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPolicy(name) => write!(f, "unsupported policy '{name}'"),
            Self::MissingParameter { policy, parameter } => {
                write!(f, "policy '{policy}' requires parameter '{parameter}'")
            }
            Self::InvalidQueueSetup(detail) => write!(f, "invalid multilevel queue setup: {detail}"),
        }
    }
}

impl std::error::Error for ConfigurationError {}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "malformed process list: {err}"),
            Self::Invalid(errors) => {
                write!(f, "invalid process list ({} error(s))", errors.len())?;
                for e in errors {
                    write!(f, "; {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
