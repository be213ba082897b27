use super::{ConfigError, Policy, ProcessSpec};
use serde::Deserialize;
use std::{fs, path::Path};

/// A process set plus an optional policy selector, as stored in a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub policy: Option<String>,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the policy, preferring `selector` over the workload's own.
    pub fn policy(&self, selector: Option<&str>) -> Result<Policy, ConfigError> {
        match selector.or(self.policy.as_deref()) {
            Some(selector) => Ok(selector.parse()?),
            None => Ok(Policy::Fcfs),
        }
    }
}
