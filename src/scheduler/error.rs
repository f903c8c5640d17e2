use super::Tick;
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    DuplicatePid(String),
    InvalidBurst { pid: String },
    InvalidQuantum(i64),
    MissingQuantum,
    // Raised when metrics are requested for a process the policy never finished
    Incomplete { pid: String },
    NegativeMetric { pid: String, metric: &'static str },
    Stalled { tick: Tick },
    // A policy picked a process the engine has no run state for
    Untracked { pid: String },
}

impl fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerError::DuplicatePid(pid) => write!(f, "duplicate pid `{pid}`"),
            SchedulerError::InvalidBurst { pid } => {
                write!(f, "process `{pid}` has a burst below 1 tick")
            }
            SchedulerError::InvalidQuantum(quantum) => {
                write!(f, "round-robin quantum must be positive, got {quantum}")
            }
            SchedulerError::MissingQuantum => write!(f, "round-robin requires a quantum"),
            SchedulerError::Incomplete { pid } => {
                write!(f, "process `{pid}` has no start or completion time")
            }
            SchedulerError::NegativeMetric { pid, metric } => {
                write!(f, "process `{pid}` has a negative {metric} time")
            }
            SchedulerError::Stalled { tick } => {
                write!(f, "scheduler stalled at t={tick} with unfinished processes")
            }
            SchedulerError::Untracked { pid } => {
                write!(f, "scheduler picked `{pid}`, which is not in the process list")
            }
        }
    }
}

impl Error for SchedulerError {}
