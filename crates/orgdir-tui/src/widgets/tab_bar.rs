//! Tab bar widget: the listed pages, the auth link and keybinding hints.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

/// Renders the 1-line strip of pages at the top of the screen.
///
/// The active page is highlighted. The right edge shows `Log In`, or the
/// signed-in user's name with `Log Out`, followed by `q:quit  ?:help`.
pub struct TabBar<'a> {
    titles: Vec<&'a str>,
    active: Option<usize>,
    user: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    /// `active` is the position of the current page within `titles`, if it
    /// is listed at all.
    pub fn new(
        titles: Vec<&'a str>,
        active: Option<usize>,
        user: Option<&'a str>,
        theme: &'a Theme,
    ) -> Self {
        Self {
            titles,
            active,
            user,
            theme,
        }
    }
}

/// Text of the auth link for the current session.
pub fn auth_label(user: Option<&str>) -> String {
    match user {
        Some(name) => format!("{name} · Log Out"),
        None => "Log In".to_string(),
    }
}

impl Widget for TabBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let labels: Vec<Line> = self
            .titles
            .iter()
            .map(|title| Line::from(format!(" {title} ")))
            .collect();

        Tabs::new(labels)
            .select(self.active)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("")
            .render(area, buf);

        let hint = " q:quit  ?:help ";
        let auth = format!(" {} ", auth_label(self.user));
        let auth_style = if self.user.is_some() {
            self.theme.auth
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let width = (auth.chars().count() + hint.chars().count()) as u16;
        let line = Line::from(vec![
            Span::styled(auth, auth_style),
            Span::styled(hint, Style::default().add_modifier(Modifier::DIM)),
        ]);
        let x = area.right().saturating_sub(width);
        buf.set_line(x.max(area.x), area.y, &line, width.min(area.width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_label_reflects_session() {
        assert_eq!(auth_label(None), "Log In");
        assert_eq!(auth_label(Some("Ada")), "Ada · Log Out");
    }
}
