//! Main TUI application state and logic

use crate::config::SPEED_PRESETS;
use crate::playback::Session;
use crate::snapshot::DomainState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    State,
    Narration,
    Highlights,
}

impl FocusedPane {
    /// Move focus to the next pane (state -> narration -> highlights)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::State => FocusedPane::Narration,
            FocusedPane::Narration => FocusedPane::Highlights,
            FocusedPane::Highlights => FocusedPane::State,
        }
    }
}

/// The main application state
pub struct App<S: DomainState> {
    /// The session whose timeline is being shown
    pub session: Session<S>,

    /// Title of the state pane
    pub title: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub state_scroll: usize,
    pub narration_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// When the session was last ticked
    pub last_tick: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl<S: DomainState> App<S> {
    pub fn new(session: Session<S>, title: impl Into<String>) -> Self {
        App {
            session,
            title: title.into(),
            focused_pane: FocusedPane::State,
            state_scroll: 0,
            narration_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_tick: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive paced publication and autoplay
            let elapsed = self.last_tick.elapsed();
            self.last_tick = Instant::now();
            let was_generating = self.session.is_generating();
            if self.session.tick(elapsed) {
                self.narration_scroll = usize::MAX;
            }
            if was_generating && !self.session.is_generating() {
                self.status_message = "Generation complete".to_string();
            }

            // Use poll with timeout so ticking keeps going without input
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        // Nothing may keep publishing once the consumer is gone
        self.session.cancel();
        info!("terminal front end closed");
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Right column: Narration (top) | Highlights (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        let step = self.session.current_step();
        let state_data = super::panes::StateRenderData {
            title: self.title.clone(),
            lines: match step {
                Some(step) => step.snapshot().describe(),
                None => self.session.committed().describe(),
            },
            result: step.and_then(|s| s.result()).map(|r| r.to_string()),
        };
        super::panes::render_state_pane(
            frame,
            columns[0],
            &state_data,
            self.focused_pane == FocusedPane::State,
            &mut self.state_scroll,
        );

        super::panes::render_narration_pane(
            frame,
            right_rows[0],
            &self.session.narration(),
            self.focused_pane == FocusedPane::Narration,
            &mut self.narration_scroll,
        );

        super::panes::render_highlights_pane(
            frame,
            right_rows[1],
            step.map(|s| s.highlighted()),
            self.focused_pane == FocusedPane::Highlights,
        );

        let status = super::panes::StatusRenderData {
            message: &self.status_message,
            cursor: self.session.cursor_index(),
            total: self.session.total_steps(),
            speed: self.session.config().speed,
            status: self.session.status(),
            generating: self.session.is_generating(),
        };
        super::panes::render_status_bar(frame, main_chunks[1], &status);
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('c') | KeyCode::Esc => {
                if self.session.is_generating() {
                    self.session.cancel();
                    self.status_message = "Generation cancelled".to_string();
                    self.narration_scroll = usize::MAX;
                }
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).unwrap_or(1) as usize;
                self.session.pause();
                let stepped = (0..n).take_while(|_| self.session.step_forward()).count();
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(true),
            KeyCode::Char('-') => self.change_speed(false),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.status_message = if self.session.step_backward() {
                    "Stepped backward".to_string()
                } else {
                    "Cannot step backward: at the first step".to_string()
                };
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Right => {
                self.status_message = if self.session.step_forward() {
                    "Stepped forward".to_string()
                } else {
                    "Cannot step forward: at the last step".to_string()
                };
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::State => {
                    self.state_scroll = self.state_scroll.saturating_sub(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_sub(1);
                }
                FocusedPane::Highlights => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::State => {
                    self.state_scroll = self.state_scroll.saturating_add(1);
                }
                FocusedPane::Narration => {
                    self.narration_scroll = self.narration_scroll.saturating_add(1);
                }
                FocusedPane::Highlights => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.status_message = if self.session.toggle() {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                self.session.seek(usize::MAX);
                self.status_message = "Jumped to end".to_string();
                self.narration_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.session.seek(0);
                self.status_message = "Jumped to start".to_string();
                self.narration_scroll = usize::MAX;
            }
            _ => {}
        }
    }

    /// Move to the next faster or slower speed preset
    fn change_speed(&mut self, faster: bool) {
        let current = self.session.config().speed;
        let next = if faster {
            SPEED_PRESETS.iter().copied().find(|&s| s > current)
        } else {
            SPEED_PRESETS.iter().rev().copied().find(|&s| s < current)
        };
        match next {
            Some(speed) => {
                if self.session.set_speed(speed).is_ok() {
                    debug!(speed, "speed changed");
                    self.status_message = format!("Speed {}x", speed);
                }
            }
            None => self.status_message = format!("Speed stays at {}x", current),
        }
    }
}
