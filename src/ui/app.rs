//! Main TUI application state and logic

use crate::algorithms::Algorithm;
use crate::config::FRAME_POLL;
use crate::controller::{RunController, RunReport};
use crate::playback::{BarRow, SpeedLevel, TimerQueue};
use crate::ui::panes::{self, ControlsRenderData, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Instant;
use tracing::warn;

/// The main application state
pub struct App {
    /// Owns the logical array and starts runs
    pub controller: RunController,

    /// Bars the player draws into; also carries the control lock
    pub row: BarRow,

    /// Playback clock, advanced by real elapsed time every frame
    pub queue: TimerQueue<BarRow>,

    /// Algorithm used by the next run
    pub algorithm: Algorithm,

    /// Speed used by the next run
    pub speed: SpeedLevel,

    /// Result of the most recent run
    pub last_report: Option<RunReport>,

    /// Array shown as the run's input
    pub input: Vec<u32>,

    /// Steps applied so far in the current run
    pub applied: usize,

    /// Whether a playback is in flight
    pub is_playing: bool,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a refused run
    pub status_is_error: bool,

    last_tick: Instant,
}

impl App {
    /// Create a new app around `controller`, whose array is rendered as is
    pub fn new(controller: RunController, algorithm: Algorithm, speed: SpeedLevel) -> Self {
        let row = BarRow::from_values(controller.array());
        let input = controller.array().to_vec();
        App {
            controller,
            row,
            queue: TimerQueue::new(),
            algorithm,
            speed,
            last_report: None,
            input,
            applied: 0,
            is_playing: false,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            last_tick: Instant::now(),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.tick();

            if event::poll(FRAME_POLL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Advance the playback clock by the time since the last tick
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.applied += self.queue.advance(elapsed, &mut self.row);

        // The completion signal is the only thing that unlocks the controls
        if self.is_playing && self.row.controls_enabled() {
            self.is_playing = false;
            self.queue.clear();
            self.set_status(format!("Sorted with {}", self.algorithm.name()));
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(7),
                Constraint::Length(1),
            ])
            .split(size);

        let title = match &self.last_report {
            Some(report) if self.is_playing => format!("{} ({} steps)", report.algorithm, report.steps),
            _ => self.algorithm.name().to_string(),
        };

        panes::render_bars_pane(frame, main_chunks[0], &self.row, &title, self.is_playing);

        panes::render_controls_pane(
            frame,
            main_chunks[1],
            ControlsRenderData {
                algorithm: self.algorithm,
                speed: self.speed,
                input: &self.input,
                sorted: self.last_report.as_ref().map(|r| r.sorted.as_slice()),
                enabled: self.row.controls_enabled(),
            },
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            StatusRenderData {
                message: &self.status_message,
                applied: self.applied,
                total: self.last_report.as_ref().map(|r| r.steps),
                is_playing: self.is_playing,
                is_error: self.status_is_error,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Esc => {
                if self.is_playing {
                    self.skip();
                }
            }
            // Generate, sort and settings are locked while a run plays
            _ if !self.row.controls_enabled() => {
                self.set_status("Sorting... press Esc to skip".to_string());
            }
            KeyCode::Char('g') | KeyCode::Char('G') => self.generate(),
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => self.sort(),
            KeyCode::Tab | KeyCode::Right => {
                self.algorithm = self.algorithm.next();
                self.set_status(format!("Selected {}", self.algorithm.name()));
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.algorithm = self.algorithm.prev();
                self.set_status(format!("Selected {}", self.algorithm.name()));
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.algorithm = Algorithm::ALL[index];
                self.set_status(format!("Selected {}", self.algorithm.name()));
            }
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.speed = self.speed.faster();
                self.set_status(format!("Speed {}", self.speed));
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
                self.speed = self.speed.slower();
                self.set_status(format!("Speed {}", self.speed));
            }
            _ => {}
        }
    }

    fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.status_is_error = false;
    }

    fn generate(&mut self) {
        self.queue.clear();
        self.input = self.controller.generate(&mut self.row).to_vec();
        self.last_report = None;
        self.applied = 0;
        self.set_status(format!("Generated {} values", self.input.len()));
    }

    fn sort(&mut self) {
        self.queue.clear();
        self.applied = 0;
        self.input = self.controller.array().to_vec();

        match self
            .controller
            .run(self.algorithm, self.speed, &mut self.row, &mut self.queue)
        {
            Ok(report) => {
                self.set_status(format!(
                    "{}: {} comparisons, {} relocations",
                    report.algorithm, report.comparisons, report.relocations
                ));
                self.is_playing = !self.row.controls_enabled();
                self.last_tick = Instant::now();
                self.last_report = Some(report);
            }
            Err(e) => {
                warn!(error = %e, "run refused");
                self.status_message = format!("Error: {}", e);
                self.status_is_error = true;
            }
        }
    }

    fn skip(&mut self) {
        self.queue.clear();
        self.controller.skip_to_end(&mut self.row);
        self.is_playing = false;
        if let Some(report) = &self.last_report {
            self.applied = report.steps;
        }
        self.set_status("Skipped to end".to_string());
    }
}
