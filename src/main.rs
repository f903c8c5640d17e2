use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use cpu_sched_sim::{
    input,
    report::{self, ReplayRunner, Report},
    scheduler::{simulate_all, Policy, SimulationResult},
};
use crossterm::{
    execute,
    terminal::{Clear, ClearType},
};
use env_logger::Env;
use log::info;
use std::{io, path::PathBuf, time::Duration};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum Algorithm {
    Fcfs,
    Sjf,
    Srtf,
    Rr,
    #[value(name = "prio-np", alias = "prio_np", alias = "prionp")]
    PrioNp,
    #[value(name = "prio-p", alias = "prio_p", alias = "priop")]
    PrioP,
    /// Every algorithm, followed by a comparison
    All,
}

impl Algorithm {
    fn policy(self) -> Option<Policy> {
        match self {
            Algorithm::Fcfs => Some(Policy::Fcfs),
            Algorithm::Sjf => Some(Policy::Sjf),
            Algorithm::Srtf => Some(Policy::Srtf),
            Algorithm::Rr => Some(Policy::RoundRobin),
            Algorithm::PrioNp => Some(Policy::PriorityNonPreemptive),
            Algorithm::PrioP => Some(Policy::PriorityPreemptive),
            Algorithm::All => None,
        }
    }
}

/// CPU process scheduling simulator
#[derive(Parser, Debug)]
#[command(name = "cpu-sched-sim", long_about = None)]
struct Args {
    /// Process description file, one `pid arrival burst priority` per line
    #[arg(short, long)]
    input: PathBuf,

    /// Scheduling algorithm to simulate
    #[arg(short, long, value_enum, ignore_case = true)]
    algo: Algorithm,

    /// Time quantum for round-robin (required for rr and all)
    #[arg(short, long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// Directory for the per-algorithm execution logs
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Do not write execution logs
    #[arg(long, default_value_t = false)]
    no_save: bool,

    /// Replay the schedule in an interactive terminal view
    #[arg(long, default_value_t = false)]
    tui: bool,

    /// Milliseconds per replayed tick in the terminal view
    #[arg(long, default_value_t = 200)]
    tick_rate: u64,
}

enum Run {
    One(Policy),
    All(i64),
}

impl Args {
    fn run(&self) -> Result<Run> {
        match (self.algo.policy(), self.quantum) {
            (Some(Policy::RoundRobin), None) | (None, None) => {
                bail!("--quantum is required when --algo is rr or all")
            }
            (Some(policy), _) => Ok(Run::One(policy)),
            (None, Some(quantum)) => Ok(Run::All(quantum)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let results = simulate(&args)?;
    let reports = results
        .iter()
        .map(Report::new)
        .collect::<Result<Vec<_>, _>>()?;

    if args.tui {
        replay(&reports, Duration::from_millis(args.tick_rate))?;
    } else {
        for report in &reports {
            println!("{}", report.render());
        }
        if reports.len() > 1 {
            print!("{}", report::summary(&reports));
        }
    }

    if !args.no_save {
        for report in &reports {
            let path = report
                .save(&args.log_dir)
                .with_context(|| format!("failed to save the {} log", report.name()))?;
            if !args.tui {
                println!("[SAVED] Execution log saved to {}", path.display());
            }
        }
    }

    Ok(())
}

fn simulate(args: &Args) -> Result<Vec<SimulationResult>> {
    // The quantum is checked before the input file is touched
    let run = args.run()?;

    let processes = input::parse_processes(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!("loaded {} processes from {}", processes.len(), args.input.display());

    Ok(match run {
        Run::One(policy) => vec![policy.simulate(&processes, args.quantum)?],
        Run::All(quantum) => simulate_all(&processes, quantum)?,
    })
}

fn replay(reports: &[Report], tick_rate: Duration) -> io::Result<()> {
    execute!(io::stdout(), Clear(ClearType::All))?;

    let mut runner = ReplayRunner::new(reports, tick_rate)?;
    while runner.run()? {}
    drop(runner);

    execute!(io::stdout(), Clear(ClearType::All))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::{env, fs};

    fn args(algo: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from([
            "cpu-sched-sim",
            "--input",
            "/nonexistent/processes.txt",
            "--algo",
            algo,
        ])
    }

    fn write_input(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("cpu-sched-sim-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn round_robin_and_all_need_a_quantum() {
        for algo in ["rr", "RR", "all"] {
            let err = simulate(&args(algo).unwrap()).unwrap_err();
            assert_eq!(
                err.to_string(),
                "--quantum is required when --algo is rr or all"
            );
        }
    }

    #[test]
    fn other_algorithms_do_not_need_a_quantum() {
        let err = simulate(&args("fcfs").unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("failed to load"));
    }

    #[test]
    fn algorithm_names_ignore_case_and_accept_aliases() {
        for (name, algo) in [
            ("PRIO_NP", Algorithm::PrioNp),
            ("prionp", Algorithm::PrioNp),
            ("Prio-Np", Algorithm::PrioNp),
            ("PRIOP", Algorithm::PrioP),
            ("prio_p", Algorithm::PrioP),
            ("SRTF", Algorithm::Srtf),
        ] {
            assert_eq!(args(name).unwrap().algo, algo, "{name}");
        }
    }

    #[test]
    fn unknown_algorithm_is_a_usage_error() {
        let err = args("bogus").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn negative_quantum_reaches_the_core() {
        let path = write_input("negative", "P1 0 5 1\n");
        let args = Args::try_parse_from([
            "cpu-sched-sim",
            "--input",
            path.to_str().unwrap(),
            "--algo",
            "rr",
            "--quantum",
            "-2",
        ])
        .unwrap();

        let err = simulate(&args).unwrap_err();
        assert_eq!(err.to_string(), "round-robin quantum must be positive, got -2");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn duplicate_pid_fails_before_any_report() {
        let path = write_input("duplicate", "P1 0 5 1\nP1 2 3 1\n");
        let args = Args::try_parse_from([
            "cpu-sched-sim",
            "--input",
            path.to_str().unwrap(),
            "--algo",
            "all",
            "-q",
            "2",
        ])
        .unwrap();

        let err = simulate(&args).unwrap_err();
        assert_eq!(err.to_string(), "duplicate pid `P1`");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn all_runs_every_policy_in_order() {
        let path = write_input("all", "P1 0 5 2\nP2 1 3 1\n");
        let args = Args::try_parse_from([
            "cpu-sched-sim",
            "--input",
            path.to_str().unwrap(),
            "--algo",
            "all",
            "--quantum",
            "2",
        ])
        .unwrap();

        let results = simulate(&args).unwrap();
        let names: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();
        assert_eq!(names, ["FCFS", "SJF", "SRTF", "RR(q=2)", "PRIO_NP", "PRIO_P"]);
        fs::remove_file(path).unwrap();
    }
}
