use super::{
    event::{Event, LogEntry},
    process::{initialize_run_states, Process, RunState},
    timeline::Timeline,
    Dispatch, Scheduler, SchedulerError, Tick,
};
use log::{debug, info, trace};
use std::collections::BTreeMap;

/// An arrived, unfinished process as offered to `Scheduler::pick`.
#[derive(Debug, Clone, Copy)]
pub struct ReadyProcess<'a> {
    pub process: &'a Process,
    pub remaining: Tick,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationResult {
    pub name: String,
    pub timeline: Timeline,
    pub run_states: BTreeMap<String, RunState>,
    pub log: Vec<LogEntry>,
    pub context_switches: usize,
}

impl SimulationResult {
    pub fn preemptions(&self) -> usize {
        self.log
            .iter()
            .filter(|entry| matches!(entry.event, Event::Preempt { .. }))
            .count()
    }
}

// Processes in (arrival, index) order, with a cursor past everything already admitted
struct Arrivals<'a> {
    queue: Vec<&'a Process>,
    cursor: usize,
}

impl<'a> Arrivals<'a> {
    fn new(processes: &'a [Process]) -> Self {
        let mut queue: Vec<&Process> = processes.iter().collect();
        queue.sort_by_key(|process| (process.arrival(), process.index()));
        Self { queue, cursor: 0 }
    }

    fn admit<S: Scheduler>(&mut self, scheduler: &mut S, now: Tick) {
        while let Some(process) = self
            .queue
            .get(self.cursor)
            .copied()
            .filter(|process| process.arrival() <= now)
        {
            trace!("t={now}: {} arrives", process.pid());
            scheduler.admit(process);
            self.cursor += 1;
        }
    }

    fn arrived(&self) -> &[&'a Process] {
        &self.queue[..self.cursor]
    }

    fn next_arrival(&self) -> Option<Tick> {
        self.queue.get(self.cursor).map(|process| process.arrival())
    }
}

fn record(log: &mut Vec<LogEntry>, tick: Tick, event: Event) {
    let entry = LogEntry { tick, event };
    debug!("{entry}");
    log.push(entry);
}

/// Runs `scheduler` over `processes` until every process has completed.
///
/// The input is only read; all run state is created here and handed back in the result.
/// When nothing is ready the clock jumps to the next arrival, filling the gap with idle ticks.
pub fn simulate<S: Scheduler>(
    mut scheduler: S,
    processes: &[Process],
) -> Result<SimulationResult, SchedulerError> {
    let mut run_states = initialize_run_states(processes)?;
    let name = scheduler.name();
    let mut arrivals = Arrivals::new(processes);
    let mut timeline = Timeline::new();
    let mut log = Vec::new();
    let mut now: Tick = 0;
    let mut completed = 0;
    // Ran on the previous tick and still has work left
    let mut previous: Option<&Process> = None;

    while completed < processes.len() {
        arrivals.admit(&mut scheduler, now);

        let ready: Vec<ReadyProcess> = arrivals
            .arrived()
            .iter()
            .filter_map(|&process| {
                let remaining = run_states.get(process.pid())?.remaining;
                (remaining > 0).then_some(ReadyProcess { process, remaining })
            })
            .collect();

        let Some(process) = scheduler.pick(&ready, now) else {
            debug_assert!(ready.is_empty(), "{name} left the CPU idle at t={now}");
            let until = arrivals
                .next_arrival()
                .ok_or(SchedulerError::Stalled { tick: now })?;
            record(&mut log, now, Event::Idle { until });
            timeline.push_idle(until - now);
            now = until;
            previous = None;
            continue;
        };

        let pid = process.pid();
        let continuing = previous.is_some_and(|prev| prev.pid() == pid);
        if let Some(prev) = previous.filter(|_| !continuing) {
            record(
                &mut log,
                now,
                Event::Preempt {
                    pid: prev.pid().to_owned(),
                    by: pid.to_owned(),
                },
            );
        }

        let Some(state) = run_states.get_mut(pid) else {
            debug_assert!(false, "{name} picked untracked process {pid}");
            return Err(SchedulerError::Untracked { pid: pid.to_owned() });
        };
        debug_assert!(state.remaining > 0, "{name} picked finished process {pid}");

        match state.start_time {
            None => {
                state.start_time = Some(now);
                record(&mut log, now, Event::Start { pid: pid.to_owned() });
            }
            Some(_) if !continuing => {
                record(&mut log, now, Event::Resume { pid: pid.to_owned() });
            }
            Some(_) => {}
        }

        let slice = match scheduler.dispatch() {
            Dispatch::RunToCompletion => state.remaining,
            Dispatch::Tick => 1,
            Dispatch::Quantum(quantum) => quantum.get().min(state.remaining),
        };

        // Arrivals during the slice are admitted tick by tick
        for _ in 0..slice {
            trace!("t={now}: {pid} runs");
            timeline.push(pid);
            now += 1;
            state.remaining -= 1;
            arrivals.admit(&mut scheduler, now);
        }

        if state.remaining == 0 {
            state.completion_time = Some(now);
            completed += 1;
            record(&mut log, now, Event::Complete { pid: pid.to_owned() });
            previous = None;
        } else {
            scheduler.requeue(process);
            previous = Some(process);
        }
    }

    debug_assert!(
        run_states.values().all(RunState::is_complete),
        "{name} terminated with unfinished processes"
    );

    let context_switches = timeline.context_switches();
    info!(
        "{name}: {} processes finished at t={now}, {context_switches} context switches",
        processes.len()
    );

    Ok(SimulationResult {
        name,
        timeline,
        run_states,
        log,
        context_switches,
    })
}
