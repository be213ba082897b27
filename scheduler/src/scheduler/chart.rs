use super::{MetricsTable, Simulation, Time, Timeline};
use std::fmt::Write;

pub const BUSY: char = '█';
pub const IDLE: char = '·';

const METRICS_HEADER: [&str; 4] = ["Process", "Turnaround", "Waiting", "Response"];

/// Text Gantt chart: one row per process, each column covering `scale` time units.
pub struct GanttChart<'a> {
    timeline: &'a Timeline,
    scale: Time,
}

impl<'a> GanttChart<'a> {
    /// Fits the whole timeline into at most `width` columns.
    pub fn new(timeline: &'a Timeline, width: usize) -> Self {
        let width = width.max(1) as Time;
        let scale = timeline.end_time().div_ceil(width);
        Self {
            timeline,
            scale: scale.max(1),
        }
    }

    pub fn scale(&self) -> Time {
        self.scale
    }

    pub fn columns(&self) -> usize {
        self.timeline.end_time().div_ceil(self.scale) as usize
    }

    /// `label`'s row, showing only what has happened before `until`.
    pub fn row(&self, label: &str, until: Time) -> String {
        (0..self.columns() as Time)
            .map(|column| column * self.scale)
            .map(|time| match self.timeline.running_at(time) {
                _ if time >= until => ' ',
                Some(interval) if interval.label == label => BUSY,
                _ => IDLE,
            })
            .collect()
    }

    /// Tick marks every ten columns.
    pub fn axis(&self) -> String {
        let mut axis = String::new();
        for column in (0..self.columns()).step_by(10) {
            let mark = (column as Time * self.scale).to_string();
            let _ = write!(axis, "{mark:<10}");
        }
        axis.truncate(self.columns().max(1));
        axis
    }
}

/// Renders a simulation as plain text: chart, metrics table and summary.
pub fn render(simulation: &Simulation, width: usize) -> String {
    let timeline = simulation.timeline();
    let labels = timeline.labels();
    let label_width = labels.iter().map(|label| label.len()).max().unwrap_or(0).max(7);
    let chart = GanttChart::new(timeline, width.saturating_sub(label_width + 3));

    let mut out = String::new();
    let _ = writeln!(out, "{}", simulation.policy());
    let _ = writeln!(out);
    for label in &labels {
        let _ = writeln!(out, "{label:>label_width$} | {}", chart.row(label, Time::MAX));
    }
    let _ = writeln!(out, "{:>label_width$} | {}", "t", chart.axis());
    if chart.scale() > 1 {
        let _ = writeln!(out, "(one column = {} time units)", chart.scale());
    }
    let _ = writeln!(out);

    let metrics = simulation.metrics();
    out.push_str(&metrics_table(&metrics));
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Finished at t={}, idle {} ({:.0}% utilization), {} deadline misses",
        timeline.end_time(),
        timeline.idle_time(),
        timeline.utilization() * 100.0,
        metrics.deadline_misses()
    );
    out
}

pub fn metrics_table(metrics: &MetricsTable) -> String {
    let rows = metrics.display_rows();
    let mut widths = METRICS_HEADER.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    let header = METRICS_HEADER.map(str::to_owned);
    for row in std::iter::once(&header).chain(&rows) {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:>width$}"))
            .collect();
        let _ = writeln!(out, "{}", cells.join(" | "));
    }
    out
}
