//! Semantic application events: crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `SearchFocus`              |
//! | `f`                     | `ToggleFilters`            |
//! | `]`                     | `NextPage`                 |
//! | `[`                     | `PrevPage`                 |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`, `Delete`   | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! ## Insert mode
//!
//! When a text-input widget (search bar, login form, command bar) is focused,
//! the event loop calls [`to_app_event_insert`] instead. Every printable
//! character is forwarded as `Char`; only `Ctrl+c`, `Escape`, `Enter`, `Tab`,
//! `Backspace` and the arrow keys keep their special bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane.
    FocusNext,
    /// Transfer focus to the search bar.
    SearchFocus,
    /// Show or hide the advanced filter panel.
    ToggleFilters,
    /// Switch to the next listed page.
    NextPage,
    /// Switch to the previous listed page.
    PrevPage,
    /// Scroll the results list up one page.
    ScrollUp,
    /// Scroll the results list down one page.
    ScrollDown,
    /// Move within the focused list, or move the text cursor.
    Nav(Direction),
    /// A printable character forwarded to the focused widget.
    Char(char),
    /// Delete before the cursor, or remove the focused chip.
    Backspace,
    /// Submit the search, toggle a filter, or open details.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Dismiss the top overlay or leave a text input.
    Escape,
}

/// Whether a text input currently owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyMode {
    Normal,
    Insert,
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for mouse events and unbound keys.
pub fn to_app_event(event: Event) -> Option<AppEvent> {
    translate(event, KeyMode::Normal)
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    translate(event, KeyMode::Insert)
}

fn translate(event: Event, mode: KeyMode) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) if mode == KeyMode::Normal => {
            shortcut(&key).or_else(|| editing_key(&key, mode))
        }
        Event::Key(key) => editing_key(&key, mode),
        _ => None,
    }
}

/// Single-key shortcuts that only exist outside text inputs.
fn shortcut(key: &KeyEvent) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    let ctrl = key.modifiers == KeyModifiers::CONTROL;

    let event = match key.code {
        KeyCode::Char('q') if plain => AppEvent::Quit,
        KeyCode::Char('/') if plain => AppEvent::SearchFocus,
        KeyCode::Char('f') if plain => AppEvent::ToggleFilters,
        KeyCode::Char(']') if plain => AppEvent::NextPage,
        KeyCode::Char('[') if plain => AppEvent::PrevPage,
        KeyCode::Char('k') if plain => AppEvent::Nav(Direction::Up),
        KeyCode::Char('j') if plain => AppEvent::Nav(Direction::Down),
        KeyCode::Char('h') if plain => AppEvent::Nav(Direction::Left),
        KeyCode::Char('l') if plain => AppEvent::Nav(Direction::Right),
        KeyCode::Char('u') if ctrl => AppEvent::ScrollUp,
        KeyCode::Char('d') if ctrl => AppEvent::ScrollDown,
        KeyCode::PageUp => AppEvent::ScrollUp,
        KeyCode::PageDown => AppEvent::ScrollDown,
        KeyCode::Delete if plain => AppEvent::Backspace,
        _ => return None,
    };
    Some(event)
}

/// Keys shared by both modes: text entry, arrows, submit and dismiss.
fn editing_key(key: &KeyEvent, mode: KeyMode) -> Option<AppEvent> {
    let plain = key.modifiers == KeyModifiers::NONE;
    // Arrow keys carry modifiers in some terminals; only insert mode forgives them.
    let arrows_ok = plain || mode == KeyMode::Insert;

    match key.code {
        KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => Some(AppEvent::Quit),
        KeyCode::Char(c) if plain || key.modifiers == KeyModifiers::SHIFT => Some(AppEvent::Char(c)),
        KeyCode::Up if arrows_ok => Some(AppEvent::Nav(Direction::Up)),
        KeyCode::Down if arrows_ok => Some(AppEvent::Nav(Direction::Down)),
        KeyCode::Left if arrows_ok => Some(AppEvent::Nav(Direction::Left)),
        KeyCode::Right if arrows_ok => Some(AppEvent::Nav(Direction::Right)),
        KeyCode::Tab if plain => Some(AppEvent::FocusNext),
        KeyCode::Backspace if plain => Some(AppEvent::Backspace),
        KeyCode::Enter if plain => Some(AppEvent::Enter),
        KeyCode::Esc => Some(AppEvent::Escape),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
