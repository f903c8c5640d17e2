use crate::scheduler::{compress, Occupant, Segment, SimulationResult, Tick};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    NotArrived,
    Ready,
    Running,
    Done,
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProcessStatus::NotArrived => "-",
            ProcessStatus::Ready => "ready",
            ProcessStatus::Running => "running",
            ProcessStatus::Done => "done",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRow {
    pub pid: String,
    pub burst: Tick,
    pub remaining: Tick,
    pub status: ProcessStatus,
    pub start: Option<Tick>,
    pub completion: Option<Tick>,
}

impl ProcessRow {
    pub fn cpu_share(&self, elapsed: Tick) -> String {
        if elapsed == 0 {
            return "0%".to_owned();
        }
        format!(
            "{}%",
            ((self.burst - self.remaining) as f64 / elapsed as f64 * 100.0).round()
        )
    }
}

/// What the CPU looked like after the first `tick` ticks of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub tick: Tick,
    pub running: Option<Occupant>,
    pub rows: Vec<ProcessRow>,
    pub segments: Vec<Segment>,
}

impl Frame {
    pub fn at(result: &SimulationResult, tick: Tick) -> Self {
        let tick = tick.min(result.timeline.len());
        let slots = &result.timeline.slots()[..tick as usize];
        let running = slots.last().cloned();

        let rows = result
            .run_states
            .iter()
            .map(|(pid, state)| {
                let executed = slots
                    .iter()
                    .filter(|occupant| occupant.pid() == Some(pid.as_str()))
                    .count() as Tick;
                let completion = state.completion_time.filter(|&done| done <= tick);
                let status = if completion.is_some() {
                    ProcessStatus::Done
                } else if running.as_ref().and_then(Occupant::pid) == Some(pid.as_str()) {
                    ProcessStatus::Running
                } else if state.arrival <= tick {
                    ProcessStatus::Ready
                } else {
                    ProcessStatus::NotArrived
                };

                ProcessRow {
                    pid: pid.clone(),
                    burst: state.burst,
                    remaining: state.burst - executed,
                    status,
                    start: state.start_time.filter(|&start| start < tick),
                    completion,
                }
            })
            .collect();

        Self {
            tick,
            running,
            rows,
            segments: compress(slots),
        }
    }
}
