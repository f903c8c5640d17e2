use super::Tick;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start { pid: String },
    Resume { pid: String },
    // `pid` lost the CPU to `by` with work left
    Preempt { pid: String, by: String },
    Complete { pid: String },
    Idle { until: Tick },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub tick: Tick,
    pub event: Event,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}: ", self.tick)?;
        match &self.event {
            Event::Start { pid } => write!(f, "{pid} starts running"),
            Event::Resume { pid } => write!(f, "{pid} resumes"),
            Event::Preempt { pid, by } => write!(f, "{by} preempts {pid}"),
            Event::Complete { pid } => write!(f, "{pid} completes"),
            Event::Idle { until } => write!(f, "CPU idle until t={until}"),
        }
    }
}
