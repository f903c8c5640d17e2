use super::{display::DisplayTerminal, replay::Frame, text::Report};
use crate::scheduler::Tick;
use std::{io, time::Duration};

pub enum RunnerEvent {
    Quit,
    Pause,
    Resume,
    Step,
    Next,
    None,
}

/// Replays simulation results tick by tick in the terminal.
///
/// Each result is played to its last tick before moving on. A single result stays on its last
/// frame; several results end on a comparison chart. Either way the runner waits for `q`.
pub struct ReplayRunner<'r, 'a> {
    terminal: DisplayTerminal,
    reports: &'r [Report<'a>],
    current: usize,
    tick: Tick,
    paused: bool,
}

impl<'r, 'a> ReplayRunner<'r, 'a> {
    pub fn new(reports: &'r [Report<'a>], tick_rate: Duration) -> io::Result<Self> {
        let terminal = DisplayTerminal::new(tick_rate)?;

        Ok(Self {
            terminal,
            reports,
            current: 0,
            tick: 0,
            paused: false,
        })
    }

    fn finished(&self) -> bool {
        self.current >= self.reports.len()
    }

    fn step(&mut self) {
        let Some(report) = self.reports.get(self.current) else {
            return;
        };
        if self.tick < report.result.timeline.len() {
            self.tick += 1;
        } else if self.reports.len() > 1 {
            self.next();
        }
    }

    fn next(&mut self) {
        self.current += 1;
        self.tick = 0;
    }

    fn draw(&mut self) -> io::Result<()> {
        match self.reports.get(self.current) {
            Some(report) => {
                let frame = Frame::at(report.result, self.tick);
                self.terminal.draw_frame(report, &frame, self.paused)
            }
            None if self.reports.len() > 1 => self.terminal.draw_comparison(self.reports),
            None => Ok(()),
        }
    }

    // Returns false if the program should quit
    pub fn run(&mut self) -> io::Result<bool> {
        if !self.paused {
            self.step();
        }
        self.draw()?;

        match self.terminal.get_input() {
            RunnerEvent::Quit => return Ok(false),
            RunnerEvent::Pause if !self.paused => self.paused = true,
            RunnerEvent::Resume if self.paused => self.paused = false,
            RunnerEvent::Step if self.paused => {
                self.step();
                self.draw()?;
            }
            RunnerEvent::Next if !self.finished() && self.reports.len() > 1 => self.next(),
            _ => {}
        }
        Ok(true)
    }
}
