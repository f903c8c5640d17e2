use super::{select_by, Dispatch, Process, ReadyProcess, Scheduler, Tick};

pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";

    fn dispatch(&self) -> Dispatch {
        Dispatch::RunToCompletion
    }

    fn pick<'a>(&mut self, ready: &[ReadyProcess<'a>], _now: Tick) -> Option<&'a Process> {
        select_by(ready, |candidate| candidate.process.arrival())
    }
}
