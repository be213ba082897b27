use super::{ProcessRecord, SimulationError, Time};
use std::{cmp::Reverse, fmt, str::FromStr};

/// The scheduling policies the simulator knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    Sjf,
    Srtf,
    Priority,
    RoundRobin { quantum: Time },
    Edf,
    RateMonotonic,
}

impl Policy {
    pub const DEFAULT_QUANTUM: Time = 2;

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Serve",
            Policy::Sjf => "Shortest Job First",
            Policy::Srtf => "Shortest Remaining Time First",
            Policy::Priority => "Priority Scheduling",
            Policy::RoundRobin { .. } => "Round Robin",
            Policy::Edf => "Earliest Deadline First",
            Policy::RateMonotonic => "Rate Monotonic",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::Srtf | Policy::RoundRobin { .. })
    }

    pub fn requires_deadline(&self) -> bool {
        matches!(self, Policy::Edf | Policy::RateMonotonic)
    }

    /// Picks the next process to run out of `candidates` (indices into `records`).
    ///
    /// Ties go to the candidate that comes first, so callers control
    /// tie-breaking through the order they pass candidates in. Round Robin
    /// takes the head of its ready queue.
    pub fn select(&self, records: &[ProcessRecord], candidates: &[usize]) -> Option<usize> {
        let mut candidates = candidates.iter().copied();
        match self {
            Policy::Fcfs => candidates.min_by_key(|&i| records[i].arrival_time()),
            Policy::Sjf => candidates.min_by_key(|&i| records[i].burst_time()),
            Policy::Srtf => candidates.min_by_key(|&i| records[i].remaining_time()),
            Policy::Priority => candidates.min_by_key(|&i| Reverse(records[i].priority())),
            // Deadline is used as the period for RM, so both order the same way
            Policy::Edf | Policy::RateMonotonic => {
                candidates.min_by_key(|&i| records[i].deadline().unwrap_or(Time::MAX))
            }
            Policy::RoundRobin { .. } => candidates.next(),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::RoundRobin { quantum } => write!(f, "{} (quantum {})", self.name(), quantum),
            _ => f.write_str(self.name()),
        }
    }
}

impl FromStr for Policy {
    type Err = SimulationError;

    /// Parses selectors such as `sjf`, `edf` or `rr:4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let selector = s.trim().to_ascii_lowercase();
        let (kind, argument) = match selector.split_once(':') {
            Some((kind, argument)) => (kind, Some(argument)),
            None => (selector.as_str(), None),
        };
        let unknown = || SimulationError::UnknownPolicy(s.to_owned());

        let policy = match kind {
            "fcfs" => Policy::Fcfs,
            "sjf" => Policy::Sjf,
            "srtf" => Policy::Srtf,
            "priority" => Policy::Priority,
            "edf" => Policy::Edf,
            "rm" | "rms" => Policy::RateMonotonic,
            "rr" | "round-robin" => {
                let quantum = match argument {
                    Some(quantum) => quantum.parse().map_err(|_| unknown())?,
                    None => Policy::DEFAULT_QUANTUM,
                };
                if quantum == 0 {
                    return Err(SimulationError::ZeroQuantum);
                }
                return Ok(Policy::RoundRobin { quantum });
            }
            _ => return Err(unknown()),
        };

        match argument {
            Some(_) => Err(unknown()),
            None => Ok(policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new(ProcessSpec::with_priority("A", 0, 4, 1).with_deadline(9)),
            ProcessRecord::new(ProcessSpec::with_priority("B", 1, 2, 3).with_deadline(5)),
            ProcessRecord::new(ProcessSpec::with_priority("C", 1, 2, 3).with_deadline(5)),
            ProcessRecord::new(ProcessSpec::with_priority("D", 0, 6, 0).with_deadline(7)),
        ]
    }

    #[test]
    fn selection_rules_pick_first_extremum() {
        let records = records();
        let all = [0, 1, 2, 3];

        assert_eq!(Policy::Fcfs.select(&records, &all), Some(0));
        assert_eq!(Policy::Sjf.select(&records, &all), Some(1));
        assert_eq!(Policy::Priority.select(&records, &all), Some(1));
        assert_eq!(Policy::Edf.select(&records, &all), Some(1));
        assert_eq!(Policy::RateMonotonic.select(&records, &all), Some(1));
    }

    #[test]
    fn candidate_order_breaks_ties() {
        let records = records();

        assert_eq!(Policy::Sjf.select(&records, &[2, 1]), Some(2));
        assert_eq!(Policy::Priority.select(&records, &[3, 2, 1]), Some(2));
    }

    #[test]
    fn round_robin_takes_queue_head() {
        let records = records();
        let policy = Policy::RoundRobin { quantum: 2 };

        assert_eq!(policy.select(&records, &[3, 0]), Some(3));
        assert_eq!(policy.select(&records, &[]), None);
    }

    #[test]
    fn parses_selectors() {
        assert_eq!("FCFS".parse::<Policy>(), Ok(Policy::Fcfs));
        assert_eq!("rms".parse::<Policy>(), Ok(Policy::RateMonotonic));
        assert_eq!("rr".parse::<Policy>(), Ok(Policy::RoundRobin { quantum: 2 }));
        assert_eq!("rr:5".parse::<Policy>(), Ok(Policy::RoundRobin { quantum: 5 }));
        assert_eq!("rr:0".parse::<Policy>(), Err(SimulationError::ZeroQuantum));
        assert_eq!(
            "lottery".parse::<Policy>(),
            Err(SimulationError::UnknownPolicy("lottery".to_owned()))
        );
        assert_eq!(
            "sjf:3".parse::<Policy>(),
            Err(SimulationError::UnknownPolicy("sjf:3".to_owned()))
        );
    }

    #[test]
    fn preemption_flags() {
        assert!(Policy::Srtf.is_preemptive());
        assert!(Policy::RoundRobin { quantum: 1 }.is_preemptive());
        assert!(!Policy::Edf.is_preemptive());
        assert!(Policy::RateMonotonic.requires_deadline());
        assert!(!Policy::Sjf.requires_deadline());
    }
}
