use super::{select_by, Dispatch, Process, ReadyProcess, Scheduler, Tick};

/// Shortest job first. A picked job is never interrupted.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF";

    fn dispatch(&self) -> Dispatch {
        Dispatch::RunToCompletion
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        select_by(ready, |candidate| candidate.process.burst())
    }
}

/// Shortest remaining time first, re-evaluated every tick.
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "SRTF";

    fn dispatch(&self) -> Dispatch {
        Dispatch::Tick
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        select_by(ready, |candidate| candidate.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{simulate, Event, Occupant};

    fn labels(result: &crate::scheduler::SimulationResult) -> Vec<&str> {
        result.timeline.slots().iter().map(Occupant::label).collect()
    }

    #[test]
    fn sjf_does_not_interrupt_for_shorter_arrivals() {
        let processes = [
            Process::new(0, "P1", 0, 4),
            Process::new(1, "P2", 1, 1),
            Process::new(2, "P3", 1, 2),
        ];
        let result = simulate(SjfScheduler, &processes).unwrap();

        assert_eq!(labels(&result), ["P1", "P1", "P1", "P1", "P2", "P3", "P3"]);
        assert_eq!(result.preemptions(), 0);
    }

    #[test]
    fn sjf_ties_fall_back_to_arrival_then_index() {
        let processes = [
            Process::new(0, "late", 1, 2),
            Process::new(1, "first", 0, 3),
            Process::new(2, "b", 0, 2),
            Process::new(3, "a", 0, 2),
        ];
        let result = simulate(SjfScheduler, &processes).unwrap();

        // At t=0 "b" and "a" tie on burst and arrival, so input order decides
        assert_eq!(result.run_states["b"].start_time, Some(0));
        assert_eq!(result.run_states["a"].start_time, Some(2));
        assert_eq!(result.run_states["late"].start_time, Some(4));
        assert_eq!(result.run_states["first"].start_time, Some(6));
    }

    #[test]
    fn srtf_preempts_on_shorter_remaining_time() {
        let processes = [Process::new(0, "P1", 0, 8), Process::new(1, "P2", 1, 4)];
        let result = simulate(SrtfScheduler, &processes).unwrap();

        assert_eq!(result.run_states["P2"].start_time, Some(1));
        assert_eq!(result.run_states["P2"].completion_time, Some(5));
        assert_eq!(result.run_states["P1"].completion_time, Some(12));
        assert_eq!(result.preemptions(), 1);
        assert!(result.log.iter().any(|entry| entry.tick == 1
            && entry.event
                == Event::Preempt {
                    pid: "P1".into(),
                    by: "P2".into()
                }));
        assert!(result
            .log
            .iter()
            .any(|entry| entry.tick == 5 && entry.event == Event::Resume { pid: "P1".into() }));
    }

    #[test]
    fn srtf_keeps_running_on_equal_remaining_time() {
        // At t=1 both have 3 left; P1 arrived earlier and keeps the CPU
        let processes = [Process::new(0, "P1", 0, 4), Process::new(1, "P2", 1, 3)];
        let result = simulate(SrtfScheduler, &processes).unwrap();

        assert_eq!(labels(&result), ["P1", "P1", "P1", "P1", "P2", "P2", "P2"]);
        assert_eq!(result.preemptions(), 0);
    }
}
