//! Help popup: centred floating overlay listing all keybindings.
//!
//! Toggle with `?`; close with `?` or `Escape`.

use crate::theme::Theme;
use crate::widgets::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

const BINDINGS: &[(&str, &str)] = &[
    ("q  /  Ctrl+c", "Quit"),
    ("Tab", "Cycle focus: search → filters → chips → results"),
    ("/", "Focus the search bar"),
    ("Enter", "Search / toggle filter / remove chip / details"),
    ("Escape", "Leave the search bar or close a popup"),
    ("f", "Show or hide advanced filters"),
    ("[  /  ]", "Previous / next page"),
    ("↑ k  /  ↓ j", "Move through filters or results"),
    ("← h  /  → l", "Collapse / expand group, move between chips"),
    ("Space", "Toggle the filter under the cursor"),
    ("PageUp / PageDown", "Scroll results a page"),
    (":login <name> <email>", "Sign in (:login alone opens the form)"),
    (":logout", "Sign out"),
    (":clear", "Reset keyword and filters"),
    (":live", "Toggle filtering as you type"),
    (":theme <name>", "Switch theme (default, gruvbox)"),
    ("?", "Toggle this help popup"),
];

pub struct HelpPopup<'a> {
    theme: &'a Theme,
}

impl<'a> HelpPopup<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(80, BINDINGS.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" orgdir keybindings (? to close) ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:<24}", key),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}
