//! Vim-style command bar: a single-line overlay at the bottom of the screen.
//!
//! Activated by pressing `:` from any pane except the search bar. Pressing
//! `Enter` parses the command; `Escape` cancels. A parse error stays on
//! screen until the next key.
//!
//! # Supported commands
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `login [<name> <email>]` | Sign in, or open the login form |
//! | `logout` | Sign out |
//! | `clear` | Reset keyword and filters |
//! | `filters` | Show or hide the advanced filters |
//! | `live` | Toggle filtering as you type |
//! | `page <name>` | Go to a page |

use crate::commands::{Command, CommandError};
use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Widget},
};

/// What the bar asks of the app after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarOutcome {
    /// Stay open.
    Pending,
    /// Close without acting.
    Cancelled,
    /// Close and run the command.
    Submitted(Command),
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct CommandBarState {
    /// The text typed after the `:` prefix.
    pub input: LineInput,
    /// Error message from the last failed command, cleared on the next key.
    pub error: Option<String>,
}

impl CommandBarState {
    /// Reset to a blank, error-free state. Call when opening the bar.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error = None;
    }

    pub fn handle(&mut self, event: &AppEvent) -> BarOutcome {
        self.error = None;

        match event {
            AppEvent::Escape => {
                tracing::debug!("command bar cancelled");
                self.clear();
                BarOutcome::Cancelled
            }
            AppEvent::Enter => self.submit(),
            AppEvent::Char(c) => {
                self.input.insert(*c);
                BarOutcome::Pending
            }
            AppEvent::Backspace => {
                self.input.backspace();
                BarOutcome::Pending
            }
            AppEvent::Nav(Direction::Left) => {
                self.input.move_left();
                BarOutcome::Pending
            }
            AppEvent::Nav(Direction::Right) => {
                self.input.move_right();
                BarOutcome::Pending
            }
            _ => BarOutcome::Pending,
        }
    }

    fn submit(&mut self) -> BarOutcome {
        match Command::parse(self.input.as_str()) {
            Ok(cmd) => {
                tracing::debug!(command = ?cmd, "command parsed");
                self.clear();
                BarOutcome::Submitted(cmd)
            }
            Err(CommandError::Empty) => {
                self.clear();
                BarOutcome::Cancelled
            }
            Err(err) => {
                tracing::debug!(%err, "command rejected");
                self.error = Some(err.to_string());
                BarOutcome::Pending
            }
        }
    }

    /// Absolute terminal column of the text cursor within `area`.
    ///
    /// The `:` glyph occupies column 0, so the cursor starts at column 1.
    pub fn cursor_col(&self, area: Rect) -> u16 {
        let col = 1 + self.input.cursor_column();
        (area.x + col).min(area.right().saturating_sub(1))
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Single-row command-bar overlay. The caller passes a 1-row `Rect`.
pub struct CommandBar<'a> {
    state: &'a CommandBarState,
    theme: &'a Theme,
}

impl<'a> CommandBar<'a> {
    pub fn new(state: &'a CommandBarState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for CommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let line = if let Some(ref err) = self.state.error {
            Line::from(Span::styled(format!("E  {err}"), self.theme.error))
        } else {
            Line::from(vec![
                Span::styled(
                    ":",
                    self.theme
                        .border_command_bar
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(self.state.input.as_str(), Style::default()),
            ])
        };

        buf.set_line(area.x, area.y, &line, area.width);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
