use std::{io, path::PathBuf};
use thiserror::Error;

/// Reasons a process set cannot be simulated. Raised before the clock starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("process `{name}` has a burst time of zero")]
    ZeroBurst { name: String },

    #[error("process `{name}` has no deadline, which {policy} requires")]
    MissingDeadline { name: String, policy: &'static str },

    #[error("process set would run past the end of simulated time")]
    TimeOverflow,

    #[error("round robin quantum must be at least 1")]
    ZeroQuantum,

    #[error("unknown scheduling policy `{0}`")]
    UnknownPolicy(String),
}

/// Errors raised while loading a workload or parsing the command line.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed workload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),

    #[error("{0}")]
    Usage(String),
}
