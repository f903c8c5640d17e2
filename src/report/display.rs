use super::{replay::Frame, runner::RunnerEvent, text::Report};
use crate::scheduler::Occupant;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use log::warn;
use std::{
    io::{self, Stdout},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};
use tui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{BarChart, Block, BorderType, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame as TuiFrame, Terminal,
};

pub enum DisplayEvent {
    Input(KeyEvent),
    Tick,
}

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
    pub fn new(tick_rate: Duration) -> Result<Self, io::Error> {
        crossterm::terminal::enable_raw_mode()?;

        // Set up the input handling thread
        let (input_tx, input_rx) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        if let Ok(Event::Key(key)) = event::read() {
                            if input_tx.send(DisplayEvent::Input(key)).is_err() {
                                return;
                            }
                        }
                    }
                    Ok(false) => {}
                    Err(err) => {
                        warn!("stopped polling terminal events: {err}");
                        return;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if input_tx.send(DisplayEvent::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        // Set up the terminal-user-interface
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, input_rx })
    }

    pub fn draw_frame(&mut self, report: &Report, frame: &Frame, paused: bool) -> io::Result<()> {
        let pids: Vec<&str> = report.result.run_states.keys().map(String::as_str).collect();
        let color_of = |occupant: &Occupant| match occupant.pid() {
            Some(pid) => pids
                .iter()
                .position(|&known| known == pid)
                .map_or(Color::White, |index| PALETTE[index % PALETTE.len()]),
            None => Color::DarkGray,
        };

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Length(5),
                    Constraint::Min(5),
                ])
                .split(f.size());

            let state = if paused { " (paused)" } else { "" };
            let current = Paragraph::new(match &frame.running {
                Some(Occupant::Process(pid)) => format!("t={} | {pid} running{state}", frame.tick),
                Some(Occupant::Idle) => format!("t={} | CPU idle{state}", frame.tick),
                None => format!("t={} | nothing has run yet{state}", frame.tick),
            })
            .style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::LightBlue),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(report.name())
                    .border_type(BorderType::Rounded),
            );
            f.render_widget(current, chunks[0]);

            let strip: Vec<Span> = frame
                .segments
                .iter()
                .map(|segment| {
                    let width = segment.len() as usize * 2;
                    let label = format!("{:^width$}", segment.occupant.label());
                    Span::styled(
                        label,
                        Style::default()
                            .fg(Color::Black)
                            .bg(color_of(&segment.occupant)),
                    )
                })
                .collect();
            let gantt = Paragraph::new(Spans::from(strip))
                .wrap(Wrap { trim: false })
                .block(Block::default().borders(Borders::ALL).title("Gantt"));
            f.render_widget(gantt, chunks[1]);

            let items = frame.rows.iter().map(|row| {
                Row::new(vec![
                    Cell::from(row.pid.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
                    Cell::from("|"),
                    Cell::from(row.status.to_string()),
                    Cell::from("|"),
                    Cell::from(format!("{}/{}", row.remaining, row.burst)),
                    Cell::from("|"),
                    Cell::from(row.start.map_or_else(String::new, |tick| tick.to_string())),
                    Cell::from("|"),
                    Cell::from(row.completion.map_or_else(String::new, |tick| tick.to_string())),
                    Cell::from("|"),
                    Cell::from(row.cpu_share(frame.tick)),
                ])
            });

            let table = Table::new(items)
                .header(
                    Row::new(vec![
                        "PID", "|", "State", "|", "Left", "|", "Start", "|", "Done", "|", "CPU",
                    ])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                )
                .widths(&[
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Length(8),
                    Constraint::Length(1),
                    Constraint::Length(9),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(6),
                    Constraint::Length(1),
                    Constraint::Length(5),
                ])
                .block(
                    Block::default()
                        .title("Processes (q quit, p pause, r resume, s step, n next)")
                        .borders(Borders::ALL),
                )
                .style(Style::default().fg(Color::LightGreen))
                .column_spacing(1);
            f.render_widget(table, chunks[2]);
        })?;
        Ok(())
    }

    pub fn draw_comparison(&mut self, reports: &[Report]) -> io::Result<()> {
        // Bar values are whole numbers, so averages are shown in hundredths of a tick
        let hundredths = |value: f64| (value * 100.0).round() as u64;
        let waiting: Vec<(&str, u64)> = reports
            .iter()
            .map(|report| (report.name(), hundredths(report.metrics.averages.waiting)))
            .collect();
        let turnaround: Vec<(&str, u64)> = reports
            .iter()
            .map(|report| (report.name(), hundredths(report.metrics.averages.turnaround)))
            .collect();
        let switches: Vec<(&str, u64)> = reports
            .iter()
            .map(|report| (report.name(), report.result.context_switches as u64))
            .collect();

        self.terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .margin(1)
                .constraints([
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                    Constraint::Ratio(1, 3),
                ])
                .split(f.size());

            render_bars(f, chunks[0], "Average waiting time (x0.01 ticks)", &waiting, Color::LightBlue);
            render_bars(
                f,
                chunks[1],
                "Average turnaround time (x0.01 ticks)",
                &turnaround,
                Color::LightGreen,
            );
            render_bars(f, chunks[2], "Context switches (q to quit)", &switches, Color::LightYellow);
        })?;
        Ok(())
    }

    pub fn get_input(&self) -> RunnerEvent {
        // Get the user's input and return a matching event
        let Ok(event) = self.input_rx.recv() else {
            return RunnerEvent::Quit;
        };
        match event {
            DisplayEvent::Input(key) if key.modifiers.is_empty() => match key.code {
                KeyCode::Char('q') => RunnerEvent::Quit,
                KeyCode::Char('p') => RunnerEvent::Pause,
                KeyCode::Char('r') => RunnerEvent::Resume,
                KeyCode::Char('s') => RunnerEvent::Step,
                KeyCode::Char('n') => RunnerEvent::Next,
                _ => RunnerEvent::None,
            },
            _ => RunnerEvent::None,
        }
    }
}

impl Drop for DisplayTerminal {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            warn!("failed to restore terminal mode: {err}");
        }
    }
}

fn render_bars(
    f: &mut TuiFrame<CrosstermBackend<Stdout>>,
    area: Rect,
    title: &str,
    data: &[(&str, u64)],
    color: Color,
) {
    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(data)
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    f.render_widget(chart, area);
}
