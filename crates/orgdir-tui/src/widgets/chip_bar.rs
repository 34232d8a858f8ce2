//! Chip bar widget: one removable token per active filter selection.
//!
//! `←`/`h` and `→`/`l` move between chips; `Enter`, `Backspace` or `x`
//! removes the focused one. The bar renders nothing when there are no chips.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use orgdir_core::FilterChip;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

#[derive(Debug, Default)]
pub struct ChipBarState {
    pub cursor: usize,
}

impl ChipBarState {
    /// Handle an event against a bar of `len` chips. Returns the index of the
    /// chip to remove, if any.
    pub fn handle(&mut self, event: &AppEvent, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.clamp(len);
        match event {
            AppEvent::Nav(Direction::Left) => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            AppEvent::Nav(Direction::Right) => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                None
            }
            AppEvent::Enter | AppEvent::Backspace | AppEvent::Char('x') => {
                tracing::debug!(chip = self.cursor, "chips: remove");
                Some(self.cursor)
            }
            _ => None,
        }
    }

    /// Keep the cursor on an existing chip after the bar shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }
}

pub struct ChipBar<'a> {
    chips: &'a [FilterChip],
    cursor: usize,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ChipBar<'a> {
    pub fn new(chips: &'a [FilterChip], state: &ChipBarState, focused: bool, theme: &'a Theme) -> Self {
        Self {
            chips,
            cursor: state.cursor,
            focused,
            theme,
        }
    }
}

impl Widget for ChipBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.chips.is_empty() {
            return;
        }
        let mut spans = vec![Span::styled(
            "Active: ",
            Style::default().add_modifier(Modifier::DIM),
        )];
        for (i, chip) in self.chips.iter().enumerate() {
            let style = if self.focused && i == self.cursor {
                self.theme.chip_selected
            } else {
                self.theme.chip
            };
            spans.push(Span::styled(format!(" {} ", chip.display()), style));
            spans.push(Span::raw(" "));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
