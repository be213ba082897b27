use super::{
    preemptive, round_robin::RoundRobin, run_to_completion, MetricsTable, Policy, ProcessRecord,
    ProcessSpec, SimulationError, Timeline,
};
use log::{info, warn};
use std::collections::HashSet;

/// The outcome of running one policy over one process set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulation {
    policy: Policy,
    timeline: Timeline,
    records: Vec<ProcessRecord>,
}

impl Simulation {
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Final process state, in input order.
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    pub fn metrics(&self) -> MetricsTable {
        MetricsTable::calculate(&self.records)
    }
}

/// Checks that `processes` can be simulated under `policy` without stalling.
pub fn validate(processes: &[ProcessSpec], policy: Policy) -> Result<(), SimulationError> {
    if let Policy::RoundRobin { quantum: 0 } = policy {
        return Err(SimulationError::ZeroQuantum);
    }

    // The clock never passes the last arrival plus all the work queued behind it
    let last_arrival = processes.iter().map(|process| process.arrival_time).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |end, process| end.checked_add(process.burst_time))
        .ok_or(SimulationError::TimeOverflow)?;

    let mut names = HashSet::new();
    for process in processes {
        if process.burst_time == 0 {
            return Err(SimulationError::ZeroBurst {
                name: process.name.clone(),
            });
        }
        if policy.requires_deadline() && process.deadline.is_none() {
            return Err(SimulationError::MissingDeadline {
                name: process.name.clone(),
                policy: policy.name(),
            });
        }
        if !names.insert(process.name.as_str()) {
            warn!("duplicate process name `{}`, its intervals will be grouped together", process.name);
        }
    }

    Ok(())
}

/// Runs `policy` over a fresh copy of `processes`.
pub fn simulate(processes: &[ProcessSpec], policy: Policy) -> Result<Simulation, SimulationError> {
    validate(processes, policy)?;
    info!("simulating {} processes under {policy}", processes.len());

    let mut records: Vec<ProcessRecord> = processes.iter().cloned().map(ProcessRecord::new).collect();
    let timeline = match policy {
        Policy::RoundRobin { quantum } => RoundRobin::new(&mut records, quantum).run(),
        Policy::Srtf => preemptive::run(&mut records, policy),
        _ => run_to_completion::run(&mut records, policy),
    };

    info!(
        "{policy} finished at t={} over {} intervals",
        timeline.end_time(),
        timeline.len()
    );

    Ok(Simulation {
        policy,
        timeline,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Time;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_zero_burst() {
        let processes = vec![ProcessSpec::new("P1", 0, 0)];

        assert_eq!(
            simulate(&processes, Policy::Fcfs),
            Err(SimulationError::ZeroBurst {
                name: "P1".to_owned()
            })
        );
    }

    #[test]
    fn deadline_policies_reject_missing_deadline() {
        let processes = vec![ProcessSpec::new("P1", 0, 2).with_deadline(4), ProcessSpec::new("P2", 0, 2)];

        for policy in [Policy::Edf, Policy::RateMonotonic] {
            assert_eq!(
                simulate(&processes, policy),
                Err(SimulationError::MissingDeadline {
                    name: "P2".to_owned(),
                    policy: policy.name(),
                })
            );
        }
        assert!(simulate(&processes, Policy::Sjf).is_ok());
    }

    #[test]
    fn rejects_zero_quantum() {
        let processes = vec![ProcessSpec::new("P1", 0, 2)];

        assert_eq!(
            simulate(&processes, Policy::RoundRobin { quantum: 0 }),
            Err(SimulationError::ZeroQuantum)
        );
    }

    #[test]
    fn rejects_process_sets_that_overflow_the_clock() {
        let processes = vec![ProcessSpec::new("P1", Time::MAX - 1, 5)];

        for policy in [Policy::Fcfs, Policy::Srtf, Policy::RoundRobin { quantum: 2 }] {
            assert_eq!(simulate(&processes, policy), Err(SimulationError::TimeOverflow));
        }
    }

    #[test]
    fn accepts_process_sets_ending_at_the_limit() {
        let processes = vec![ProcessSpec::new("P1", Time::MAX - 5, 5)];
        let simulation = simulate(&processes, Policy::RoundRobin { quantum: 2 }).unwrap();

        assert_eq!(simulation.records()[0].completion_time(), Some(Time::MAX));
    }

    #[test]
    fn empty_input_yields_empty_results() {
        let simulation = simulate(&[], Policy::Srtf).unwrap();

        assert!(simulation.timeline().is_empty());
        assert!(simulation.metrics().rows.is_empty());
        assert_eq!(simulation.metrics().average, None);
    }

    #[test]
    fn caller_specs_are_untouched() {
        let processes = vec![ProcessSpec::new("P1", 0, 3)];
        let before = processes.clone();
        simulate(&processes, Policy::Srtf).unwrap();

        assert_eq!(processes, before);
    }
}
