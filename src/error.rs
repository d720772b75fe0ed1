//! Error taxonomy for scheduler runs and metric aggregation.
//!
//! Every variant is a caller input error. Simulations are deterministic,
//! so nothing here is retryable.

use std::fmt;

use crate::types::Pid;

/// Errors surfaced by the scheduling core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    /// A run parameter is out of range (zero quantum, bad seed string).
    InvalidConfiguration(String),
    /// A process record or workload is malformed.
    InvalidInput(String),
    /// Metrics were requested for a schedule with no records.
    EmptySchedule,
    /// Metrics were requested for a record that never started or finished.
    PreconditionViolation { pid: Pid },
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            SchedError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            SchedError::EmptySchedule => write!(f, "cannot compute metrics of an empty schedule"),
            SchedError::PreconditionViolation { pid } => {
                write!(f, "process {pid} has not been fully scheduled")
            }
        }
    }
}

impl std::error::Error for SchedError {}

impl From<serde_json::Error> for SchedError {
    fn from(e: serde_json::Error) -> Self {
        SchedError::InvalidInput(format!("workload JSON: {e}"))
    }
}

pub type Result<T> = std::result::Result<T, SchedError>;
