use super::{select_by, Dispatch, Process, ReadyProcess, Scheduler, Tick};

/// Static priority, lower value first. A picked process runs to completion.
pub struct PriorityScheduler;

impl Scheduler for PriorityScheduler {
    const NAME: &'static str = "PRIO_NP";

    fn dispatch(&self) -> Dispatch {
        Dispatch::RunToCompletion
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        select_by(ready, |candidate| candidate.process.priority())
    }
}

/// Static priority re-evaluated every tick.
///
/// Equal priorities are resolved by arrival then input order on every tick, so the winner of a
/// tie can change without any new arrival being more urgent.
pub struct PreemptivePriorityScheduler;

impl Scheduler for PreemptivePriorityScheduler {
    const NAME: &'static str = "PRIO_P";

    fn dispatch(&self) -> Dispatch {
        Dispatch::Tick
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        select_by(ready, |candidate| candidate.process.priority())
    }
}
