use super::{next_arrival, Policy, ProcessRecord, Time, Timeline};
use log::{debug, trace};

/// Non-preemptive loop shared by FCFS, SJF, Priority, EDF and RM: the selected
/// process always runs its whole burst.
pub(super) fn run(records: &mut [ProcessRecord], policy: Policy) -> Timeline {
    let mut timeline = Timeline::new();
    let mut pending: Vec<usize> = (0..records.len()).collect();
    let mut now: Time = 0;

    while !pending.is_empty() {
        let available: Vec<usize> = pending
            .iter()
            .copied()
            .filter(|&i| records[i].has_arrived(now))
            .collect();

        let Some(chosen) = policy.select(records, &available) else {
            match next_arrival(records, &pending) {
                Some(arrival) => {
                    trace!("cpu idle at t={now}, skipping to t={arrival}");
                    now = arrival;
                    continue;
                }
                None => break,
            }
        };

        let process = &mut records[chosen];
        let burst = process.burst_time();
        process.dispatch(now);
        let end = now + process.run_for(burst);
        process.complete(end);
        debug!("t={now}: {} runs to completion at t={end}", process.name());

        timeline.push(now, end, process.name());
        now = end;
        pending.retain(|&i| i != chosen);
    }

    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;
    use pretty_assertions::assert_eq;

    fn records(specs: &[(&str, Time, Time)]) -> Vec<ProcessRecord> {
        specs
            .iter()
            .map(|&(name, arrival, burst)| ProcessRecord::new(ProcessSpec::new(name, arrival, burst)))
            .collect()
    }

    fn order(timeline: &Timeline) -> Vec<&str> {
        timeline.intervals().iter().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn idle_gap_skips_to_next_arrival() {
        let mut records = records(&[("P1", 3, 2), ("P2", 10, 1)]);
        let timeline = run(&mut records, Policy::Fcfs);

        assert_eq!(timeline.intervals()[0].start, 3);
        assert_eq!(timeline.intervals()[1].start, 10);
        assert_eq!(timeline.idle_time(), 8);
    }

    #[test]
    fn fcfs_breaks_arrival_ties_by_input_order() {
        let mut records = records(&[("B", 2, 1), ("A", 0, 3), ("C", 2, 1)]);
        let timeline = run(&mut records, Policy::Fcfs);

        assert_eq!(order(&timeline), vec!["A", "B", "C"]);
    }

    #[test]
    fn sjf_only_chooses_among_arrived() {
        let mut records = records(&[("long", 0, 6), ("short", 1, 1)]);
        let timeline = run(&mut records, Policy::Sjf);

        assert_eq!(order(&timeline), vec!["long", "short"]);
        assert_eq!(records[1].first_response_time(), Some(6));
    }

    #[test]
    fn completed_records_have_no_remaining_time() {
        let mut records = records(&[("P1", 0, 4)]);
        run(&mut records, Policy::Sjf);

        assert_eq!(records[0].remaining_time(), 0);
        assert_eq!(records[0].completion_time(), Some(4));
    }
}
