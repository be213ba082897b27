pub mod chart;
mod config;
mod display;
mod error;
mod metrics;
mod policy;
mod preemptive;
mod process;
mod round_robin;
mod run_to_completion;
mod runner;
mod simulation;
mod timeline;

pub use config::Workload;
pub use error::{ConfigError, SimulationError};
pub use metrics::{AverageMetrics, MetricsTable, ProcessMetrics};
pub use policy::Policy;
pub use process::{ProcessRecord, ProcessSpec};
pub use runner::ReplayRunner;
pub use simulation::{simulate, validate, Simulation};
pub use timeline::{Interval, Timeline};

/// Simulated time, in whole seconds.
pub type Time = u64;

/// Earliest arrival among the `pending` records.
fn next_arrival(records: &[ProcessRecord], pending: &[usize]) -> Option<Time> {
    pending.iter().map(|&i| records[i].arrival_time()).min()
}
