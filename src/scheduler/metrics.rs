use super::{RunState, SchedulerError, SimulationResult, Tick};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub pid: String,
    pub arrival: Tick,
    pub burst: Tick,
    pub start: Tick,
    pub completion: Tick,
    pub turnaround: Tick,
    pub waiting: Tick,
    pub response: Tick,
}

impl ProcessMetrics {
    pub fn from_run_state(pid: &str, state: &RunState) -> Result<Self, SchedulerError> {
        let (Some(start), Some(completion)) = (state.start_time, state.completion_time) else {
            return Err(SchedulerError::Incomplete {
                pid: pid.to_owned(),
            });
        };
        let negative = |metric| SchedulerError::NegativeMetric {
            pid: pid.to_owned(),
            metric,
        };

        let turnaround = completion
            .checked_sub(state.arrival)
            .ok_or_else(|| negative("turnaround"))?;
        let waiting = turnaround
            .checked_sub(state.burst)
            .ok_or_else(|| negative("waiting"))?;
        let response = start
            .checked_sub(state.arrival)
            .ok_or_else(|| negative("response"))?;

        Ok(Self {
            pid: pid.to_owned(),
            arrival: state.arrival,
            burst: state.burst,
            start,
            completion,
            turnaround,
            waiting,
            response,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Averages {
    pub turnaround: f64,
    pub waiting: f64,
    pub response: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// One row per process, ordered by pid.
    pub rows: Vec<ProcessMetrics>,
    pub averages: Averages,
}

impl Metrics {
    pub fn from_run_states(run_states: &BTreeMap<String, RunState>) -> Result<Self, SchedulerError> {
        let rows = run_states
            .iter()
            .map(|(pid, state)| ProcessMetrics::from_run_state(pid, state))
            .collect::<Result<Vec<_>, _>>()?;

        let mean = |field: fn(&ProcessMetrics) -> Tick| {
            if rows.is_empty() {
                0.0
            } else {
                rows.iter().map(field).sum::<Tick>() as f64 / rows.len() as f64
            }
        };
        let averages = Averages {
            turnaround: mean(|row| row.turnaround),
            waiting: mean(|row| row.waiting),
            response: mean(|row| row.response),
        };

        Ok(Self { rows, averages })
    }
}

impl SimulationResult {
    pub fn metrics(&self) -> Result<Metrics, SchedulerError> {
        Metrics::from_run_states(&self.run_states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(arrival: Tick, burst: Tick, start: Option<Tick>, completion: Option<Tick>) -> RunState {
        RunState {
            arrival,
            burst,
            start_time: start,
            completion_time: completion,
            remaining: 0,
        }
    }

    #[test]
    fn derives_times_from_run_state() {
        let row = ProcessMetrics::from_run_state("P2", &state(1, 3, Some(5), Some(8))).unwrap();
        assert_eq!(row.turnaround, 7);
        assert_eq!(row.waiting, 4);
        assert_eq!(row.response, 4);
    }

    #[test]
    fn averages_are_means_over_processes() {
        let run_states = BTreeMap::from([
            ("P1".to_owned(), state(0, 5, Some(0), Some(5))),
            ("P2".to_owned(), state(1, 3, Some(5), Some(8))),
        ]);
        let metrics = Metrics::from_run_states(&run_states).unwrap();

        assert_eq!(metrics.rows[0].pid, "P1");
        assert_eq!(metrics.averages.waiting, 2.0);
        assert_eq!(metrics.averages.turnaround, 6.0);
        assert_eq!(metrics.averages.response, 2.0);
    }

    #[test]
    fn empty_set_averages_to_zero() {
        let metrics = Metrics::from_run_states(&BTreeMap::new()).unwrap();
        assert!(metrics.rows.is_empty());
        assert_eq!(metrics.averages, Averages::default());
    }

    #[test]
    fn unfinished_run_state_is_an_error() {
        let run_states = BTreeMap::from([("P1".to_owned(), state(0, 5, Some(0), None))]);
        assert_eq!(
            Metrics::from_run_states(&run_states),
            Err(SchedulerError::Incomplete {
                pid: "P1".to_owned()
            })
        );
    }

    #[test]
    fn impossible_times_are_reported_not_wrapped() {
        // Completed before its burst could have run
        let err = ProcessMetrics::from_run_state("P1", &state(2, 5, Some(2), Some(4))).unwrap_err();
        assert_eq!(
            err,
            SchedulerError::NegativeMetric {
                pid: "P1".to_owned(),
                metric: "waiting"
            }
        );
    }
}
