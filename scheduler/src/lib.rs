//! Single-processor CPU scheduling simulator.
//!
//! Runs a process set through one of seven policies and reports the
//! resulting execution timeline together with turnaround, waiting and
//! response time statistics.

pub mod scheduler;

pub use scheduler::{
    simulate, validate, ConfigError, Interval, MetricsTable, Policy, ProcessSpec, Simulation,
    SimulationError, Time, Timeline, Workload,
};
