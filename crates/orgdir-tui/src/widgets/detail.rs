//! Detail popup: the selected organization's name, description and tags.
//!
//! Opened with `Enter` on a result card; closed with `Escape` or `Enter`.

use crate::theme::Theme;
use crate::widgets::centered_rect;
use orgdir_core::DetailPanel;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget, Wrap},
};

pub struct DetailPopup<'a> {
    panel: &'a DetailPanel,
    theme: &'a Theme,
}

impl<'a> DetailPopup<'a> {
    pub fn new(panel: &'a DetailPanel, theme: &'a Theme) -> Self {
        Self { panel, theme }
    }
}

impl Widget for DetailPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = centered_rect(64, 12, area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(Span::styled(
                format!(" {} ", self.panel.title),
                self.theme.card_title,
            ))
            .title_bottom(" Esc to close ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = vec![
            Line::from(Span::styled(self.panel.body.clone(), self.theme.card_body)),
            Line::default(),
        ];
        if !self.panel.tags.is_empty() {
            let spans: Vec<Span> = self
                .panel
                .tags
                .iter()
                .map(|tag| Span::styled(format!("#{tag}  "), self.theme.tag_style(tag)))
                .collect();
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
