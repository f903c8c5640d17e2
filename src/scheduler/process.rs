use super::{SchedulerError, Tick};
use std::collections::BTreeMap;

/// One schedulable unit, as read from the process file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pid: String,
    arrival: Tick,
    burst: Tick,
    priority: i32,
    index: usize,
}

impl Process {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(index: usize, pid: &str, arrival: Tick, burst: Tick) -> Self {
        Process::with_priority(index, pid, arrival, burst, Process::DEFAULT_PRIORITY)
    }

    pub fn with_priority(index: usize, pid: &str, arrival: Tick, burst: Tick, priority: i32) -> Self {
        Self {
            pid: pid.to_owned(),
            arrival,
            burst,
            priority,
            index,
        }
    }

    pub fn pid(&self) -> &str {
        &self.pid
    }

    pub fn arrival(&self) -> Tick {
        self.arrival
    }

    pub fn burst(&self) -> Tick {
        self.burst
    }

    /// Lower values are more urgent.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Position in the input list, only used to break ties.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Mutable bookkeeping for a process during a single simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub arrival: Tick,
    pub burst: Tick,
    pub start_time: Option<Tick>,
    pub completion_time: Option<Tick>,
    pub remaining: Tick,
}

impl RunState {
    pub fn new(process: &Process) -> Self {
        Self {
            arrival: process.arrival(),
            burst: process.burst(),
            start_time: None,
            completion_time: None,
            remaining: process.burst(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }
}

/// Builds a fresh pid -> run-state table, rejecting duplicate pids and empty bursts.
pub fn initialize_run_states(
    processes: &[Process],
) -> Result<BTreeMap<String, RunState>, SchedulerError> {
    let mut states = BTreeMap::new();
    for process in processes {
        if process.burst() < 1 {
            return Err(SchedulerError::InvalidBurst {
                pid: process.pid().to_owned(),
            });
        }
        if states
            .insert(process.pid().to_owned(), RunState::new(process))
            .is_some()
        {
            return Err(SchedulerError::DuplicatePid(process.pid().to_owned()));
        }
    }
    Ok(states)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_states_start_unset_with_full_burst_remaining() {
        let states = initialize_run_states(&[
            Process::with_priority(0, "P1", 0, 5, 2),
            Process::new(1, "P2", 3, 1),
        ])
        .unwrap();

        let p1 = &states["P1"];
        assert_eq!(p1.start_time, None);
        assert_eq!(p1.completion_time, None);
        assert_eq!(p1.remaining, 5);
        assert_eq!(states["P2"].arrival, 3);
    }

    #[test]
    fn duplicate_pid_is_rejected() {
        let err = initialize_run_states(&[Process::new(0, "A", 0, 1), Process::new(1, "A", 2, 4)])
            .unwrap_err();
        assert_eq!(err, SchedulerError::DuplicatePid("A".to_owned()));
    }

    #[test]
    fn zero_burst_is_rejected() {
        let err = initialize_run_states(&[Process::new(0, "A", 0, 0)]).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::InvalidBurst {
                pid: "A".to_owned()
            }
        );
    }

    #[test]
    fn default_priority_is_zero() {
        assert_eq!(Process::new(4, "X", 1, 1).priority(), 0);
        assert_eq!(Process::new(4, "X", 1, 1).index(), 4);
    }
}
