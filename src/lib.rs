pub mod input;
pub mod report;
pub mod scheduler;

pub use scheduler::{simulate, simulate_all, Policy, Process, Scheduler, SimulationResult};
