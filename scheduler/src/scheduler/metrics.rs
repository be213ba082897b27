use super::{ProcessRecord, Time};

/// Per-process performance figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMetrics {
    pub name: String,
    pub turnaround_time: Time,
    pub waiting_time: Time,
    pub response_time: Time,
    /// `None` when the process has no deadline.
    pub deadline_met: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageMetrics {
    pub turnaround_time: f64,
    pub waiting_time: f64,
    pub response_time: f64,
}

/// One row per completed process plus an average, ready for tabular display.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsTable {
    pub rows: Vec<ProcessMetrics>,
    /// Absent when no process completed.
    pub average: Option<AverageMetrics>,
}

impl MetricsTable {
    pub const AVERAGE_LABEL: &'static str = "Average";

    pub fn calculate(records: &[ProcessRecord]) -> Self {
        let rows: Vec<ProcessMetrics> = records
            .iter()
            .filter_map(|record| {
                let completion_time = record.completion_time()?;
                let turnaround_time = completion_time - record.arrival_time();
                let response_time = record
                    .first_response_time()
                    .map_or(0, |response| response - record.arrival_time());

                Some(ProcessMetrics {
                    name: record.name().to_owned(),
                    turnaround_time,
                    waiting_time: turnaround_time - record.burst_time(),
                    response_time,
                    deadline_met: record.deadline().map(|deadline| completion_time <= deadline),
                })
            })
            .collect();

        // Averaged over completed processes only
        let average = (!rows.is_empty()).then(|| {
            let count = rows.len() as f64;
            let mean = |field: fn(&ProcessMetrics) -> Time| {
                rows.iter().map(field).sum::<Time>() as f64 / count
            };
            AverageMetrics {
                turnaround_time: mean(|row| row.turnaround_time),
                waiting_time: mean(|row| row.waiting_time),
                response_time: mean(|row| row.response_time),
            }
        });

        Self { rows, average }
    }

    pub fn deadline_misses(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.deadline_met == Some(false))
            .count()
    }

    /// All rows as display strings, the average row last.
    pub fn display_rows(&self) -> Vec<[String; 4]> {
        let mut rows: Vec<[String; 4]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.name.clone(),
                    row.turnaround_time.to_string(),
                    row.waiting_time.to_string(),
                    row.response_time.to_string(),
                ]
            })
            .collect();

        if let Some(average) = self.average {
            rows.push([
                MetricsTable::AVERAGE_LABEL.to_owned(),
                format!("{:.2}", average.turnaround_time),
                format!("{:.2}", average.waiting_time),
                format!("{:.2}", average.response_time),
            ]);
        }
        rows
    }
}
