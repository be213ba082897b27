use super::{chart::GanttChart, runner::RunnerEvent, MetricsTable, Simulation, Time};
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

const TICK_RATE: Duration = Duration::from_millis(200);

const PALETTE: [Color; 6] = [
    Color::LightBlue,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightRed,
];

pub struct DisplayTerminal {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    input_rx: Receiver<DisplayEvent>,
}

impl DisplayTerminal {
    pub fn new() -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Input is polled on its own thread so ticks keep coming while no key is pressed
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = TICK_RATE
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if let Ok(true) = event::poll(timeout) {
                    if let Ok(Event::Key(key)) = event::read() {
                        if input_tx.send(DisplayEvent::Input(key)).is_err() {
                            return;
                        }
                    }
                }

                if last_tick.elapsed() >= TICK_RATE {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw(&mut self, simulation: &Simulation, clock: Time, paused: bool) -> Result<(), io::Error> {
        let timeline = simulation.timeline();
        let labels = timeline.labels();
        let label_width = labels.iter().map(|label| label.len()).max().unwrap_or(0);
        let metrics = simulation.metrics();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(labels.len() as u16 + 2),
                    Constraint::Min(5),
                ])
                .split(f.size());

            let status = match timeline.running_at(clock.saturating_sub(1)) {
                _ if clock == 0 => "Waiting to start.".to_owned(),
                _ if clock >= timeline.end_time() => format!("Finished at t={}.", timeline.end_time()),
                Some(interval) => format!(
                    "t={} | {} | running [{}, {})",
                    clock, interval.label, interval.start, interval.end
                ),
                None => format!("t={clock} | idle"),
            };
            let status = Paragraph::new(if paused { format!("{status} (paused)") } else { status })
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .fg(Color::LightBlue),
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Current Interval")
                        .border_type(BorderType::Rounded),
                );

            f.render_widget(status, chunks[0]);

            let chart_width = (chunks[1].width as usize).saturating_sub(label_width + 3);
            let chart = GanttChart::new(timeline, chart_width);
            let lines: Vec<Spans> = labels
                .iter()
                .enumerate()
                .map(|(index, label)| {
                    Spans::from(vec![
                        Span::styled(
                            format!("{label:>label_width$} "),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            chart.row(label, clock),
                            Style::default().fg(PALETTE[index % PALETTE.len()]),
                        ),
                    ])
                })
                .collect();

            let gantt = Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(simulation.policy().to_string()),
            );

            f.render_widget(gantt, chunks[1]);

            let items = visible_rows(simulation, &metrics, clock).into_iter().map(|row| {
                let [name, turnaround, waiting, response] = row;
                Row::new(vec![
                    Cell::from(name).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("|"),
                    Cell::from(turnaround),
                    Cell::from("|"),
                    Cell::from(waiting),
                    Cell::from("|"),
                    Cell::from(response),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec!["Process", "|", "Turnaround", "|", "Waiting", "|", "Response"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(20),
                    Constraint::Length(1),
                    Constraint::Length(10),
                    Constraint::Length(1),
                    Constraint::Length(10),
                    Constraint::Length(1),
                    Constraint::Length(10),
                ])
                .block(Block::default().title("Metrics").borders(Borders::ALL))
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);

            f.render_widget(table, chunks[2]);
        })?;

        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        match self.input_rx.recv() {
            Ok(DisplayEvent::Input(key)) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') => RunnerEvent::Quit,
                KeyCode::Char('p') => RunnerEvent::Pause,
                KeyCode::Char('r') => RunnerEvent::Resume,
                KeyCode::Char('s') => RunnerEvent::Step,
                _ => RunnerEvent::None,
            },
            Ok(DisplayEvent::Tick) => RunnerEvent::Tick,
            Ok(_) => RunnerEvent::None,
            // The input thread is gone, nothing more can be read
            Err(_) => RunnerEvent::Quit,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = self.terminal.clear();
        let _ = self.terminal.show_cursor();
    }
}

/// Metrics rows for processes that have completed by `clock`; the average once all have.
fn visible_rows(simulation: &Simulation, metrics: &MetricsTable, clock: Time) -> Vec<[String; 4]> {
    let completions: Vec<Time> = simulation
        .records()
        .iter()
        .filter_map(|record| record.completion_time())
        .collect();
    let finished = clock >= simulation.timeline().end_time();

    metrics
        .display_rows()
        .into_iter()
        .enumerate()
        .filter(|(index, _)| match completions.get(*index) {
            Some(&completion) => completion <= clock,
            None => finished,
        })
        .map(|(_, row)| row)
        .collect()
}
