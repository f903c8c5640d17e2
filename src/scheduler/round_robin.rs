use super::{Dispatch, Process, ReadyProcess, Scheduler, SchedulerError, Tick};
use std::{collections::VecDeque, num::NonZeroU64};

pub struct RoundRobinScheduler {
    quantum: NonZeroU64,
    ready_queue: VecDeque<String>,
}

impl RoundRobinScheduler {
    pub fn new(quantum: i64) -> Result<Self, SchedulerError> {
        let quantum = u64::try_from(quantum)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(SchedulerError::InvalidQuantum(quantum))?;

        Ok(Self {
            quantum,
            ready_queue: VecDeque::new(),
        })
    }
}

impl Scheduler for RoundRobinScheduler {
    const NAME: &'static str = "RR";

    fn name(&self) -> String {
        format!("{}(q={})", Self::NAME, self.quantum)
    }

    fn dispatch(&self) -> Dispatch {
        Dispatch::Quantum(self.quantum)
    }

    fn admit(&mut self, process: &Process) {
        self.ready_queue.push_back(process.pid().to_owned());
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        let pid = self.ready_queue.pop_front()?;
        let picked = ready
            .iter()
            .find(|candidate| candidate.process.pid() == pid)
            .map(|candidate| candidate.process);
        debug_assert!(picked.is_some(), "queued process {pid} is not ready");
        picked
    }

    // Goes behind anything admitted while it was running
    fn requeue(&mut self, process: &Process) {
        self.ready_queue.push_back(process.pid().to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{simulate, Occupant, Segment};

    fn runs(segments: &[Segment]) -> Vec<(Tick, Tick, &str)> {
        segments
            .iter()
            .map(|segment| (segment.start, segment.end, segment.occupant.label()))
            .collect()
    }

    #[test]
    fn non_positive_quantum_is_rejected() {
        assert_eq!(
            RoundRobinScheduler::new(0).err(),
            Some(SchedulerError::InvalidQuantum(0))
        );
        assert_eq!(
            RoundRobinScheduler::new(-3).err(),
            Some(SchedulerError::InvalidQuantum(-3))
        );
        assert!(matches!(
            RoundRobinScheduler::new(2).unwrap().dispatch(),
            Dispatch::Quantum(quantum) if quantum.get() == 2
        ));
    }

    #[test]
    fn name_carries_the_quantum() {
        assert_eq!(RoundRobinScheduler::new(2).unwrap().name(), "RR(q=2)");
    }

    #[test]
    fn arrivals_during_a_quantum_go_ahead_of_the_preempted_process() {
        let processes = [Process::new(0, "P1", 0, 5), Process::new(1, "P2", 1, 3)];
        let result = simulate(RoundRobinScheduler::new(2).unwrap(), &processes).unwrap();

        assert_eq!(
            runs(&result.timeline.segments()),
            [(0, 2, "P1"), (2, 4, "P2"), (4, 6, "P1"), (6, 7, "P2"), (7, 8, "P1")]
        );
        assert_eq!(result.context_switches, 4);
        assert_eq!(result.run_states["P2"].completion_time, Some(7));
        assert_eq!(result.run_states["P1"].completion_time, Some(8));
    }

    #[test]
    fn arrival_at_quantum_expiry_is_queued_first() {
        let processes = [
            Process::new(0, "P1", 0, 3),
            Process::new(1, "P2", 0, 2),
            Process::new(2, "P3", 2, 1),
        ];
        let result = simulate(RoundRobinScheduler::new(2).unwrap(), &processes).unwrap();

        // P3 arrives at t=2 as P1's quantum ends, and so is queued before P1
        assert_eq!(
            runs(&result.timeline.segments()),
            [(0, 2, "P1"), (2, 4, "P2"), (4, 5, "P3"), (5, 6, "P1")]
        );
    }

    #[test]
    fn lone_process_keeps_the_cpu_across_quanta() {
        let processes = [Process::new(0, "P1", 1, 5)];
        let result = simulate(RoundRobinScheduler::new(2).unwrap(), &processes).unwrap();

        let labels: Vec<&str> = result.timeline.slots().iter().map(Occupant::label).collect();
        assert_eq!(labels, ["IDLE", "P1", "P1", "P1", "P1", "P1"]);
        assert_eq!(result.preemptions(), 0);
        assert_eq!(result.log.len(), 3);
    }
}
