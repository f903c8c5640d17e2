use crate::scheduler::{Averages, Metrics, ProcessMetrics, SchedulerError, SimulationResult, Timeline};
use log::info;
use std::{
    fmt::Write as _,
    fs, io,
    path::{Path, PathBuf},
};

const RULE_WIDTH: usize = 60;

/// A finished simulation paired with its metrics, ready to print or save.
pub struct Report<'a> {
    pub result: &'a SimulationResult,
    pub metrics: Metrics,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a SimulationResult) -> Result<Self, SchedulerError> {
        Ok(Self {
            result,
            metrics: result.metrics()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.result.name
    }

    /// Console report: gantt chart, event log, per-process table and overall metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);
        let _ = writeln!(out, "{rule}\nAlgorithm: {}\n{rule}", self.name());
        let _ = writeln!(out, "\nGantt chart:\n{}", gantt_chart(&self.result.timeline));
        let _ = writeln!(out, "\nExecution log:");
        for entry in &self.result.log {
            let _ = writeln!(out, "{entry}");
        }
        let _ = writeln!(out, "\nPer-process statistics:");
        out.push_str(&process_table(&self.metrics.rows));
        let _ = writeln!(out, "\nOverall metrics:");
        out.push_str(&overall_stats(&self.metrics.averages, self.result.context_switches));
        out
    }

    pub fn log_file_contents(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Algorithm: {}", self.name());
        let _ = writeln!(out, "{}", "=".repeat(50));
        let _ = writeln!(out, "\nEXECUTION LOG:");
        for entry in &self.result.log {
            let _ = writeln!(out, "{entry}");
        }
        let _ = writeln!(out, "\nPER-PROCESS STATISTICS:");
        out.push_str(&process_table(&self.metrics.rows));
        let averages = &self.metrics.averages;
        let _ = writeln!(out, "\nOVERALL STATISTICS:");
        let _ = writeln!(out, "avg_turnaround: {:.2}", averages.turnaround);
        let _ = writeln!(out, "avg_waiting: {:.2}", averages.waiting);
        let _ = writeln!(out, "avg_response: {:.2}", averages.response);
        let _ = writeln!(out, "Context Switches: {}", self.result.context_switches);
        out
    }

    /// Writes `<dir>/<name>_log.txt`, creating `dir` if needed.
    pub fn save(&self, dir: &Path) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_log.txt", self.name()));
        fs::write(&path, self.log_file_contents())?;
        info!("saved execution log to {}", path.display());
        Ok(path)
    }
}

pub fn gantt_chart(timeline: &Timeline) -> String {
    let segments = timeline.segments();
    if segments.is_empty() {
        return "No execution (empty timeline).".to_owned();
    }

    let ruler: Vec<String> = (0..=timeline.len()).map(|tick| tick.to_string()).collect();
    let mut bar = String::new();
    for segment in &segments {
        let pad = "-".repeat(segment.len() as usize);
        let _ = write!(bar, "|{pad}{}{pad}", segment.occupant.label());
    }
    bar.push('|');

    format!("Time: {}\n{bar}", ruler.join(" "))
}

pub fn process_table(rows: &[ProcessMetrics]) -> String {
    let mut out = format!(
        "{:<5}{:>5}{:>7}{:>8}{:>8}{:>7}{:>7}\n",
        "PID", "Arr", "Burst", "Compl", "Turn", "Wait", "Resp"
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<5}{:>5}{:>7}{:>8}{:>8}{:>7}{:>7}",
            row.pid, row.arrival, row.burst, row.completion, row.turnaround, row.waiting, row.response
        );
    }
    out
}

pub fn overall_stats(averages: &Averages, context_switches: usize) -> String {
    format!(
        "Average Turnaround Time: {:.2}\n\
         Average Waiting Time   : {:.2}\n\
         Average Response Time  : {:.2}\n\
         Total Context Switches : {context_switches}\n",
        averages.turnaround, averages.waiting, averages.response
    )
}

/// Side-by-side averages for several policies.
pub fn summary(reports: &[Report]) -> String {
    let rule = "#".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\nSummary comparison:\n{rule}\n");
    let _ = writeln!(
        out,
        "{:<12}{:>10}{:>10}{:>10}{:>8}",
        "Algorithm", "AvgTurn", "AvgWait", "AvgResp", "Ctx"
    );
    for report in reports {
        let averages = &report.metrics.averages;
        let _ = writeln!(
            out,
            "{:<12}{:>10.2}{:>10.2}{:>10.2}{:>8}",
            report.name(),
            averages.turnaround,
            averages.waiting,
            averages.response,
            report.result.context_switches
        );
    }
    out
}
