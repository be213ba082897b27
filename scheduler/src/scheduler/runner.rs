use super::{display::DisplayTerminal, Simulation, Time};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEvent {
    Tick,
    Quit,
    Pause,
    Resume,
    Step,
    None,
}

/// Replay position, independent of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Replay {
    clock: Time,
    end: Time,
    paused: bool,
}

impl Replay {
    fn new(end: Time) -> Self {
        Self {
            clock: 0,
            end,
            paused: false,
        }
    }

    fn advance(&mut self) {
        if self.clock < self.end {
            self.clock += 1;
        }
    }

    // Returns false if the program should quit
    fn handle(&mut self, event: RunnerEvent) -> bool {
        match event {
            RunnerEvent::Quit => return false,
            RunnerEvent::Tick if !self.paused => self.advance(),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => self.advance(),
            _ => {}
        }
        true
    }
}

/// Replays a finished simulation in the terminal, one time unit per tick.
pub struct ReplayRunner {
    terminal: DisplayTerminal,
    simulation: Simulation,
    replay: Replay,
}

impl ReplayRunner {
    pub fn new(simulation: Simulation) -> Result<Self, io::Error> {
        let terminal = DisplayTerminal::new()?;
        let replay = Replay::new(simulation.timeline().end_time());

        Ok(Self {
            terminal,
            simulation,
            replay,
        })
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> Result<bool, io::Error> {
        self.terminal
            .draw(&self.simulation, self.replay.clock, self.replay.paused)?;

        Ok(self.replay.handle(self.terminal.get_input()))
    }
}
