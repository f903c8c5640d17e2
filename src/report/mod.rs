mod display;
mod replay;
mod runner;
mod text;

pub use replay::{Frame, ProcessRow, ProcessStatus};
pub use runner::{ReplayRunner, RunnerEvent};
pub use text::{gantt_chart, overall_stats, process_table, summary, Report};
