use super::Time;
use serde::Deserialize;

/// The immutable description of a process, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessSpec {
    pub name: String,
    pub arrival_time: Time,
    pub burst_time: Time,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub deadline: Option<Time>,
}

impl ProcessSpec {
    const DEFAULT_PRIORITY: i32 = 0;

    pub fn new(name: &str, arrival_time: Time, burst_time: Time) -> Self {
        ProcessSpec::with_priority(name, arrival_time, burst_time, ProcessSpec::DEFAULT_PRIORITY)
    }

    pub fn with_priority(name: &str, arrival_time: Time, burst_time: Time, priority: i32) -> Self {
        Self {
            name: name.to_owned(),
            arrival_time,
            burst_time,
            priority,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Time) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Per-run simulation state of one process.
///
/// Records are created fresh from a [`ProcessSpec`] at the start of every
/// simulation and never outlive it, so no state can leak between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    spec: ProcessSpec,
    remaining_time: Time,
    start_time: Option<Time>,
    first_response_time: Option<Time>,
    completion_time: Option<Time>,
}

impl ProcessRecord {
    pub fn new(spec: ProcessSpec) -> Self {
        Self {
            remaining_time: spec.burst_time,
            spec,
            start_time: None,
            first_response_time: None,
            completion_time: None,
        }
    }

    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn arrival_time(&self) -> Time {
        self.spec.arrival_time
    }

    pub fn burst_time(&self) -> Time {
        self.spec.burst_time
    }

    pub fn priority(&self) -> i32 {
        self.spec.priority
    }

    pub fn deadline(&self) -> Option<Time> {
        self.spec.deadline
    }

    pub fn remaining_time(&self) -> Time {
        self.remaining_time
    }

    pub fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    pub fn first_response_time(&self) -> Option<Time> {
        self.first_response_time
    }

    pub fn completion_time(&self) -> Option<Time> {
        self.completion_time
    }

    pub fn is_complete(&self) -> bool {
        self.completion_time.is_some()
    }

    pub fn has_arrived(&self, now: Time) -> bool {
        self.spec.arrival_time <= now
    }

    /// Marks the process as dispatched at `now`. Only the first dispatch is recorded.
    pub(super) fn dispatch(&mut self, now: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
            self.first_response_time = Some(now);
        }
    }

    /// Runs the process for up to `time` units and returns how long it actually ran.
    pub(super) fn run_for(&mut self, time: Time) -> Time {
        let ran = time.min(self.remaining_time);
        self.remaining_time -= ran;
        ran
    }

    pub(super) fn complete(&mut self, now: Time) {
        debug_assert_eq!(self.remaining_time, 0);
        if self.completion_time.is_none() {
            self.completion_time = Some(now);
        }
    }
}
