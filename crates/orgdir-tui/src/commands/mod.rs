// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use thiserror::Error;

use crate::{
    app::AppState,
    theme::{Theme, THEME_NAMES},
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    // Switch theme by name
    Theme(String),
    // Sign in directly, or open the login form when no credentials are given
    Login(Option<(String, String)>),
    Logout,
    // Reset keyword and filters on the current page
    Clear,
    // Show or hide the advanced filter panel
    Filters,
    // Toggle filtering on every keystroke
    Live,
    // Navigate to a page by route name
    Page(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank input; the bar closes without acting.
    #[error("")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(CommandError::Empty);
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "logout" => Ok(Command::Logout),
            "clear" => Ok(Command::Clear),
            "filters" => Ok(Command::Filters),
            "live" => Ok(Command::Live),
            "theme" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("theme <default|gruvbox>"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "page" | "goto" => {
                if rest.is_empty() {
                    Err(CommandError::Usage("page <name>"))
                } else {
                    Ok(Command::Page(rest.to_string()))
                }
            }
            "login" => {
                if rest.is_empty() {
                    return Ok(Command::Login(None));
                }
                // The email is the last word; everything before it is the name.
                match rest.rsplit_once(char::is_whitespace) {
                    Some((name, email)) => Ok(Command::Login(Some((
                        name.trim().to_string(),
                        email.to_string(),
                    )))),
                    None => Err(CommandError::Usage("login [<name> <email>]")),
                }
            }
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => s.toggle_help(),
        Command::Theme(name) => match Theme::by_name(&name) {
            Some(theme) => s.theme = theme,
            None => {
                s.notice = Some(format!(
                    "unknown theme: {name} (available: {})",
                    THEME_NAMES.join(", ")
                ))
            }
        },
        Command::Login(None) => s.open_login(None),
        Command::Login(Some((name, email))) => s.login(&name, &email),
        Command::Logout => s.logout(),
        Command::Clear => s.clear_search(),
        Command::Filters => s.toggle_filters(),
        Command::Live => {
            s.live_filter = !s.live_filter;
            tracing::debug!(live = s.live_filter, "live filter toggled");
        }
        Command::Page(name) => match s.page_index(&name) {
            Some(idx) => s.goto_page(idx),
            None => s.notice = Some(format!("no such page: {name}")),
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
