mod engine;
mod error;
mod event;
mod fcfs;
mod metrics;
mod priority;
mod process;
mod round_robin;
mod shortest;
mod timeline;

use std::{num::NonZeroU64, panic, thread};

pub use engine::{simulate, ReadyProcess, SimulationResult};
pub use error::SchedulerError;
pub use event::{Event, LogEntry};
pub use fcfs::FcfsScheduler;
pub use metrics::{Averages, Metrics, ProcessMetrics};
pub use priority::{PreemptivePriorityScheduler, PriorityScheduler};
pub use process::{initialize_run_states, Process, RunState};
pub use round_robin::RoundRobinScheduler;
pub use shortest::{SjfScheduler, SrtfScheduler};
pub use timeline::{compress, count_context_switches, Occupant, Segment, Timeline};

/// Logical clock unit.
pub type Tick = u64;

/// How long a picked process keeps the CPU before the scheduler is asked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    RunToCompletion,
    Tick,
    Quantum(NonZeroU64),
}

/// A selection strategy plugged into [`simulate`].
pub trait Scheduler {
    const NAME: &'static str;

    fn name(&self) -> String {
        Self::NAME.to_owned()
    }

    fn dispatch(&self) -> Dispatch;

    /// Called once per process, in (arrival, index) order, as soon as its arrival tick is reached.
    fn admit(&mut self, _process: &Process) {}

    /// Picks the next process to run from the arrived, unfinished set. `None` idles the CPU.
    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], now: Tick) -> Option<&'a Process>;

    /// Called when a dispatched process gives up the CPU with work left.
    fn requeue(&mut self, _process: &Process) {}
}

// Smallest `key`, then earliest arrival, then input order
fn select_by<'a, K: Ord>(
    ready: &[ReadyProcess<'a>],
    key: impl Fn(&ReadyProcess<'a>) -> K,
) -> Option<&'a Process> {
    ready
        .iter()
        .min_by_key(|candidate| {
            (
                key(candidate),
                candidate.process.arrival(),
                candidate.process.index(),
            )
        })
        .map(|candidate| candidate.process)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtf,
    RoundRobin,
    PriorityNonPreemptive,
    PriorityPreemptive,
}

impl Policy {
    /// Every policy, in report order.
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::RoundRobin,
        Policy::PriorityNonPreemptive,
        Policy::PriorityPreemptive,
    ];

    pub fn simulate(
        self,
        processes: &[Process],
        quantum: Option<i64>,
    ) -> Result<SimulationResult, SchedulerError> {
        match self {
            Policy::Fcfs => simulate(FcfsScheduler, processes),
            Policy::Sjf => simulate(SjfScheduler, processes),
            Policy::Srtf => simulate(SrtfScheduler, processes),
            Policy::RoundRobin => {
                let quantum = quantum.ok_or(SchedulerError::MissingQuantum)?;
                simulate(RoundRobinScheduler::new(quantum)?, processes)
            }
            Policy::PriorityNonPreemptive => simulate(PriorityScheduler, processes),
            Policy::PriorityPreemptive => simulate(PreemptivePriorityScheduler, processes),
        }
    }
}

/// Runs every policy over the same processes, one thread per policy.
///
/// Results come back in [`Policy::ALL`] order. The quantum is checked before any thread starts.
pub fn simulate_all(
    processes: &[Process],
    quantum: i64,
) -> Result<Vec<SimulationResult>, SchedulerError> {
    RoundRobinScheduler::new(quantum)?;

    thread::scope(|scope| {
        let handles: Vec<_> = Policy::ALL
            .iter()
            .map(|&policy| scope.spawn(move || policy.simulate(processes, Some(quantum))))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|err| panic::resume_unwind(err)))
            .collect()
    })
}
