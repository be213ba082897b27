use super::{ProcessRecord, Time, Timeline};
use log::{debug, trace};
use std::collections::VecDeque;

/// Quantum-based round robin over an explicit FIFO ready queue.
pub(super) struct RoundRobin<'a> {
    records: &'a mut [ProcessRecord],
    quantum: Time,
    // Not yet admitted, sorted by arrival; ties keep input order
    arrivals: VecDeque<usize>,
    ready: VecDeque<usize>,
    now: Time,
}

impl<'a> RoundRobin<'a> {
    pub(super) fn new(records: &'a mut [ProcessRecord], quantum: Time) -> Self {
        let mut arrivals: Vec<usize> = (0..records.len()).collect();
        arrivals.sort_by_key(|&i| records[i].arrival_time());

        Self {
            records,
            quantum,
            arrivals: arrivals.into(),
            ready: VecDeque::new(),
            now: 0,
        }
    }

    fn admit_arrivals(&mut self) {
        while let Some(&next) = self.arrivals.front() {
            if !self.records[next].has_arrived(self.now) {
                break;
            }
            self.arrivals.pop_front();
            self.ready.push_back(next);
        }
    }

    pub(super) fn run(mut self) -> Timeline {
        let mut timeline = Timeline::new();

        loop {
            self.admit_arrivals();

            let Some(current) = self.ready.pop_front() else {
                match self.arrivals.front() {
                    Some(&next) => {
                        let arrival = self.records[next].arrival_time();
                        trace!("cpu idle at t={}, skipping to t={arrival}", self.now);
                        self.now = arrival;
                        continue;
                    }
                    None => break,
                }
            };

            let start = self.now;
            let process = &mut self.records[current];
            process.dispatch(start);
            self.now += process.run_for(self.quantum);
            timeline.push(start, self.now, process.name());

            // Arrivals during the slice queue up ahead of the process that just ran
            self.admit_arrivals();

            let process = &mut self.records[current];
            if process.remaining_time() > 0 {
                trace!("t={}: {} requeued with {} left", self.now, process.name(), process.remaining_time());
                self.ready.push_back(current);
            } else {
                process.complete(self.now);
                debug!("t={}: {} completes", self.now, process.name());
            }
        }

        timeline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ProcessSpec;
    use pretty_assertions::assert_eq;

    fn spans(timeline: &Timeline) -> Vec<(Time, Time, &str)> {
        timeline
            .intervals()
            .iter()
            .map(|i| (i.start, i.end, i.label.as_str()))
            .collect()
    }

    #[test]
    fn new_arrivals_queue_before_requeued_process() {
        let mut records = vec![
            ProcessRecord::new(ProcessSpec::new("P1", 0, 4)),
            ProcessRecord::new(ProcessSpec::new("P2", 2, 2)),
        ];
        let timeline = RoundRobin::new(&mut records, 2).run();

        assert_eq!(spans(&timeline), vec![(0, 2, "P1"), (2, 4, "P2"), (4, 6, "P1")]);
    }

    #[test]
    fn admits_in_arrival_order() {
        let mut records = vec![
            ProcessRecord::new(ProcessSpec::new("late", 1, 1)),
            ProcessRecord::new(ProcessSpec::new("early", 0, 1)),
        ];
        let timeline = RoundRobin::new(&mut records, 3).run();

        assert_eq!(spans(&timeline), vec![(0, 1, "early"), (1, 2, "late")]);
    }

    #[test]
    fn arrivals_within_one_slice_are_admitted_by_arrival_time() {
        let mut records = vec![
            ProcessRecord::new(ProcessSpec::new("P0", 0, 3)),
            ProcessRecord::new(ProcessSpec::new("A", 2, 1)),
            ProcessRecord::new(ProcessSpec::new("B", 1, 1)),
        ];
        let timeline = RoundRobin::new(&mut records, 3).run();

        assert_eq!(spans(&timeline), vec![(0, 3, "P0"), (3, 4, "B"), (4, 5, "A")]);
    }

    #[test]
    fn lone_process_gets_consecutive_slices() {
        let mut records = vec![ProcessRecord::new(ProcessSpec::new("P1", 1, 5))];
        let timeline = RoundRobin::new(&mut records, 2).run();

        assert_eq!(spans(&timeline), vec![(1, 3, "P1"), (3, 5, "P1"), (5, 6, "P1")]);
        assert_eq!(records[0].first_response_time(), Some(1));
        assert_eq!(records[0].completion_time(), Some(6));
    }
}
