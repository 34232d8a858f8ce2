//! Results widget: the scrollable list of organization cards.
//!
//! # Navigation (when pane is focused)
//!
//! | Key | Action |
//! |-----|--------|
//! | `↑` / `k` | Previous card |
//! | `↓` / `j` | Next card |
//! | `PageUp` / `Ctrl+u` | Up one page of cards |
//! | `PageDown` / `Ctrl+d` | Down one page of cards |
//! | `Enter` | Open the detail panel for the card |
//!
//! The same widget shows the page's own cards (filtered in place) and the
//! separate results panel; the caller decides which cards and which title.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use orgdir_core::ResultCard;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Widget, Wrap,
    },
};

const PAGE_STEP: usize = 5;
const EMPTY_MESSAGE: &str = "No organizations match your search.";

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ResultListState {
    /// Index of the highlighted card.
    pub cursor: usize,
}

impl ResultListState {
    /// Back to the first card. Call whenever the card set changes.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Handle a navigation event for a list of `len` cards. Returns the index
    /// of the card whose details should open.
    pub fn handle(&mut self, event: &AppEvent, len: usize) -> Option<usize> {
        if len == 0 {
            self.cursor = 0;
            return None;
        }
        let last = len - 1;
        self.cursor = self.cursor.min(last);
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "results: cursor up");
                None
            }
            AppEvent::Nav(Direction::Down) => {
                self.cursor = (self.cursor + 1).min(last);
                tracing::debug!(cursor = self.cursor, "results: cursor down");
                None
            }
            AppEvent::ScrollUp => {
                self.cursor = self.cursor.saturating_sub(PAGE_STEP);
                None
            }
            AppEvent::ScrollDown => {
                self.cursor = (self.cursor + PAGE_STEP).min(last);
                None
            }
            AppEvent::Enter => {
                tracing::debug!(card = self.cursor, "results: open details");
                Some(self.cursor)
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct ResultList<'a> {
    cards: &'a [ResultCard],
    state: &'a ResultListState,
    title: String,
    show_empty: bool,
    show_tags: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> ResultList<'a> {
    pub fn new(
        cards: &'a [ResultCard],
        state: &'a ResultListState,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            cards,
            state,
            title: "Organizations".to_string(),
            show_empty: false,
            show_tags: true,
            focused,
            theme,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Render the empty-state message when there are no cards.
    pub fn empty_state(mut self, show: bool) -> Self {
        self.show_empty = show;
        self
    }

    pub fn show_tags(mut self, show: bool) -> Self {
        self.show_tags = show;
        self
    }
}

impl Widget for ResultList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };
        let block = Block::bordered()
            .title(Span::styled(format!(" {} ", self.title), self.theme.result_count))
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.cards.is_empty() {
            if self.show_empty {
                Paragraph::new(Line::from(Span::styled(EMPTY_MESSAGE, self.theme.empty_state)))
                    .wrap(Wrap { trim: true })
                    .render(inner, buf);
            }
            return;
        }

        let items: Vec<ListItem> = self
            .cards
            .iter()
            .map(|card| ListItem::new(card_text(card, self.show_tags, self.theme)))
            .collect();

        let text_area = Rect {
            width: inner.width.saturating_sub(1),
            ..inner
        };
        let sb_area = Rect {
            x: inner.right().saturating_sub(1),
            width: 1,
            ..inner
        };

        let list = List::new(items).highlight_style(self.theme.card_selected);
        let selected = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, text_area, buf, &mut list_state);

        let mut sb_state = ScrollbarState::new(self.cards.len()).position(self.state.cursor);
        StatefulWidget::render(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None),
            sb_area,
            buf,
            &mut sb_state,
        );
    }
}

fn card_text(card: &ResultCard, show_tags: bool, theme: &Theme) -> Text<'static> {
    let mut lines = vec![Line::from(Span::styled(card.title.clone(), theme.card_title))];
    if !card.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", card.description),
            theme.card_body,
        )));
    }
    if show_tags && !card.tags.is_empty() {
        let mut spans = vec![Span::raw("  ")];
        for tag in &card.tags {
            spans.push(Span::styled(format!("#{tag} "), theme.tag_style(tag)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        "",
        Style::default().add_modifier(Modifier::DIM),
    )));
    Text::from(lines)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
