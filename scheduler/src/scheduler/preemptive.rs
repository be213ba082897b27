use super::{next_arrival, Policy, ProcessRecord, Time, Timeline};
use log::{debug, trace};

/// Unit-tick preemptive loop used by SRTF. The policy is consulted on every
/// time unit; intervals are only closed on a context switch or a completion.
pub(super) fn run(records: &mut [ProcessRecord], policy: Policy) -> Timeline {
    let mut timeline = Timeline::new();
    let mut pending: Vec<usize> = (0..records.len()).collect();
    // (record index, start of its current interval)
    let mut running: Option<(usize, Time)> = None;
    let mut now: Time = 0;

    while !pending.is_empty() {
        // The running process is still pending and has arrived, so it is always a candidate
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

        let slice_start = match running {
            Some((current, start)) if current == chosen => start,
            previous => {
                if let Some((current, start)) = previous {
                    debug!("t={now}: {} preempts {}", records[chosen].name(), records[current].name());
                    timeline.push(start, now, records[current].name());
                }
                records[chosen].dispatch(now);
                running = Some((chosen, now));
                now
            }
        };

        let process = &mut records[chosen];
        process.run_for(1);
        now += 1;

        if process.remaining_time() == 0 {
            process.complete(now);
            debug!("t={now}: {} completes", process.name());
            timeline.push(slice_start, now, process.name());
            pending.retain(|&i| i != chosen);
            running = None;
        }
    }

    timeline
}
