use super::Time;

/// One contiguous stretch of execution by a single process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    pub start: Time,
    pub end: Time,
    pub label: String,
}

impl Interval {
    pub fn duration(&self) -> Time {
        self.end - self.start
    }

    pub fn contains(&self, time: Time) -> bool {
        self.start <= time && time < self.end
    }
}

/// Execution intervals in the order they were produced (non-decreasing start).
/// Gaps between intervals are idle processor time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval. Empty intervals are dropped.
    pub fn push(&mut self, start: Time, end: Time, label: &str) {
        debug_assert!(
            self.intervals.last().map_or(true, |last| last.end <= start),
            "intervals must not overlap"
        );
        if start < end {
            self.intervals.push(Interval {
                start,
                end,
                label: label.to_owned(),
            });
        }
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Distinct labels in order of first appearance.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for interval in &self.intervals {
            if !labels.contains(&interval.label.as_str()) {
                labels.push(&interval.label);
            }
        }
        labels
    }

    pub fn group_by_label(&self) -> Vec<(&str, Vec<&Interval>)> {
        self.labels()
            .into_iter()
            .map(|label| {
                let intervals = self
                    .intervals
                    .iter()
                    .filter(|interval| interval.label == label)
                    .collect();
                (label, intervals)
            })
            .collect()
    }

    pub fn busy_time(&self, label: &str) -> Time {
        self.intervals
            .iter()
            .filter(|interval| interval.label == label)
            .map(Interval::duration)
            .sum()
    }

    /// The interval running at `time`, if any.
    pub fn running_at(&self, time: Time) -> Option<&Interval> {
        self.intervals.iter().find(|interval| interval.contains(time))
    }

    pub fn start_time(&self) -> Time {
        self.intervals.first().map_or(0, |interval| interval.start)
    }

    pub fn end_time(&self) -> Time {
        self.intervals.last().map_or(0, |interval| interval.end)
    }

    /// `max(end) - min(start)` over all intervals.
    pub fn span(&self) -> Time {
        self.end_time() - self.start_time()
    }

    /// Idle time between t=0 and the end of the last interval, leading idle included.
    pub fn idle_time(&self) -> Time {
        let busy: Time = self.intervals.iter().map(Interval::duration).sum();
        self.end_time() - busy
    }

    pub fn utilization(&self) -> f64 {
        match self.end_time() {
            0 => 0.0,
            end => (end - self.idle_time()) as f64 / end as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn timeline() -> Timeline {
        let mut timeline = Timeline::new();
        timeline.push(2, 4, "P1");
        timeline.push(4, 6, "P2");
        timeline.push(8, 9, "P1");
        timeline
    }

    #[test]
    fn empty_intervals_are_dropped() {
        let mut timeline = Timeline::new();
        timeline.push(3, 3, "P1");

        assert!(timeline.is_empty());
    }

    #[test]
    fn groups_by_first_appearance() {
        let timeline = timeline();
        let groups = timeline.group_by_label();

        assert_eq!(timeline.labels(), vec!["P1", "P2"]);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].1.len(), 1);
    }

    #[test]
    fn busy_and_idle_time() {
        let timeline = timeline();

        assert_eq!(timeline.busy_time("P1"), 3);
        assert_eq!(timeline.busy_time("P2"), 2);
        assert_eq!(timeline.busy_time("P3"), 0);
        assert_eq!(timeline.span(), 7);
        assert_eq!(timeline.end_time(), 9);
        assert_eq!(timeline.idle_time(), 4);
        assert!((timeline.utilization() - 5.0 / 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn running_at_respects_half_open_intervals() {
        let timeline = timeline();

        assert_eq!(timeline.running_at(4).map(|i| i.label.as_str()), Some("P2"));
        assert_eq!(timeline.running_at(6), None);
        assert_eq!(timeline.running_at(1), None);
    }

    #[test]
    fn empty_timeline_has_no_span() {
        let timeline = Timeline::new();

        assert_eq!(timeline.span(), 0);
        assert_eq!(timeline.idle_time(), 0);
        assert_eq!(timeline.utilization(), 0.0);
    }
}
