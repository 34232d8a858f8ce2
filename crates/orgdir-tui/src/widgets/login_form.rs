//! Login form popup: name and email fields.
//!
//! `Tab`, `↑` and `↓` switch fields; `Enter` on the name field moves to the
//! email field and `Enter` on the email field submits. Validation happens in
//! the session store; its message is shown under the fields.

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use crate::widgets::centered_rect;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Widget},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Email,
}

#[derive(Debug, Default)]
pub struct LoginFormState {
    pub name: String,
    pub email: String,
    pub field: LoginField,
    /// Message from the last rejected submission.
    pub error: Option<String>,
}

impl LoginFormState {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn input(&mut self) -> &mut String {
        match self.field {
            LoginField::Name => &mut self.name,
            LoginField::Email => &mut self.email,
        }
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            LoginField::Name => LoginField::Email,
            LoginField::Email => LoginField::Name,
        };
    }

    /// Handle an event. Returns `(name, email)` when the form is submitted.
    pub fn handle(&mut self, event: &AppEvent) -> Option<(String, String)> {
        match event {
            AppEvent::Char(c) => {
                self.error = None;
                self.input().push(*c);
                None
            }
            AppEvent::Backspace => {
                self.input().pop();
                None
            }
            AppEvent::FocusNext | AppEvent::Nav(Direction::Up) | AppEvent::Nav(Direction::Down) => {
                self.switch_field();
                None
            }
            AppEvent::Enter => match self.field {
                LoginField::Name => {
                    self.field = LoginField::Email;
                    None
                }
                LoginField::Email => Some((self.name.clone(), self.email.clone())),
            },
            _ => None,
        }
    }

    /// Terminal cursor position inside the popup drawn in `area`.
    pub fn cursor_position(&self, area: Rect) -> (u16, u16) {
        let popup = popup_rect(area);
        let (row, text) = match self.field {
            LoginField::Name => (1, &self.name),
            LoginField::Email => (2, &self.email),
        };
        let x = popup.x + 1 + LABEL_WIDTH + text.chars().count() as u16;
        (x.min(popup.right().saturating_sub(2)), popup.y + row)
    }
}

const LABEL_WIDTH: u16 = 9;

fn popup_rect(area: Rect) -> Rect {
    centered_rect(56, 7, area)
}

pub struct LoginForm<'a> {
    state: &'a LoginFormState,
    theme: &'a Theme,
}

impl<'a> LoginForm<'a> {
    pub fn new(state: &'a LoginFormState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }
}

impl Widget for LoginForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = popup_rect(area);
        Clear.render(popup, buf);

        let block = Block::bordered()
            .title(" Log In ")
            .title_bottom(" Enter to submit · Esc to cancel ")
            .border_style(self.theme.border_focused);
        let inner = block.inner(popup);
        block.render(popup, buf);

        let field_line = |label: &'static str, value: &str, active: bool| {
            let label_style = if active {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::DIM)
            };
            Line::from(vec![
                Span::styled(format!("{label:<width$}", width = LABEL_WIDTH as usize), label_style),
                Span::raw(value.to_string()),
            ])
        };

        let mut lines = vec![
            field_line("Name:", &self.state.name, self.state.field == LoginField::Name),
            field_line("Email:", &self.state.email, self.state.field == LoginField::Email),
            Line::default(),
        ];
        if let Some(ref err) = self.state.error {
            lines.push(Line::from(Span::styled(err.clone(), self.theme.error)));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}
