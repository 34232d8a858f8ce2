//! Search bar widget: keyword input with a search button hint.
//!
//! # Editing
//!
//! - `Char(c)` inserts at the cursor.
//! - `Backspace` deletes the character before the cursor.
//! - `Nav(Left)` / `Nav(Right)` move the cursor.
//! - `Enter` submits the keyword (the search button).
//!
//! With live filtering on, the app also submits after every edit.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::line_input::LineInput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

/// What a handled event asks of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAction {
    /// The text changed.
    Edited,
    /// The search button was pressed.
    Submit,
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SearchBarState {
    /// The keyword as typed.
    pub query: LineInput,
}

impl SearchBarState {
    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn handle(&mut self, event: &AppEvent) -> Option<SearchAction> {
        let action = match event {
            AppEvent::Char(c) => {
                self.query.insert(*c);
                Some(SearchAction::Edited)
            }
            AppEvent::Backspace => self.query.backspace().then_some(SearchAction::Edited),
            AppEvent::Nav(Direction::Left) => {
                self.query.move_left();
                None
            }
            AppEvent::Nav(Direction::Right) => {
                self.query.move_right();
                None
            }
            AppEvent::Enter => Some(SearchAction::Submit),
            _ => None,
        };
        if let Some(action) = action {
            tracing::debug!(query = %self.query.as_str(), ?action, "search bar");
        }
        action
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

const BUTTON: &str = "[ Search ⏎ ]";

pub struct SearchBar<'a> {
    state: &'a SearchBarState,
    focused: bool,
    live: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a SearchBarState, focused: bool, live: bool, theme: &'a Theme) -> Self {
        Self {
            state,
            focused,
            live,
            theme,
        }
    }

    /// Absolute terminal position of the text cursor within this widget's
    /// rendered area. Pass to `frame.set_cursor_position()` after rendering.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let col = self.state.query.cursor_column();
        let x = (area.x + 1 + col).min(area.right().saturating_sub(1));
        (x, area.y + 1)
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let title = if self.live { "Search (live)" } else { "Search" };

        let block = Block::bordered().title(title).border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(LayoutDir::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(BUTTON.chars().count() as u16),
            ])
            .split(inner);

        let query_line = if self.state.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "press / to search organizations",
                Style::default().add_modifier(Modifier::DIM),
            ))
        } else {
            Line::from(self.state.query.as_str())
        };
        Paragraph::new(query_line).render(chunks[0], buf);

        let button_style = if self.focused {
            self.theme.border_focused
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        Paragraph::new(Line::from(Span::styled(BUTTON, button_style))).render(chunks[1], buf);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> SearchBarState {
        let mut state = SearchBarState::default();
        for c in text.chars() {
            state.handle(&AppEvent::Char(c));
        }
        state
    }

    #[test]
    fn typing_reports_edits() {
        let mut state = SearchBarState::default();
        assert_eq!(state.handle(&AppEvent::Char('c')), Some(SearchAction::Edited));
        assert_eq!(state.query.as_str(), "c");
    }

    #[test]
    fn enter_submits() {
        let mut state = typed("chess");
        assert_eq!(state.handle(&AppEvent::Enter), Some(SearchAction::Submit));
        assert_eq!(state.query.as_str(), "chess");
    }

    #[test]
    fn backspace_on_empty_is_not_an_edit() {
        let mut state = SearchBarState::default();
        assert_eq!(state.handle(&AppEvent::Backspace), None);
    }

    #[test]
    fn cursor_moves_are_not_edits() {
        let mut state = typed("surf");
        assert_eq!(state.handle(&AppEvent::Nav(Direction::Left)), None);
        assert_eq!(state.handle(&AppEvent::Nav(Direction::Right)), None);
        assert_eq!(state.query.as_str(), "surf");
    }
}
