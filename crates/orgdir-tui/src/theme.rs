//! Colour theme for the orgdir TUI.
//!
//! Themes are defined as TOML files. The built-in themes are embedded in the
//! binary via [`include_str!`] so the application works without any files on
//! disk. Resolve one by name with [`Theme::by_name`] at startup and pass it
//! through the application as a shared reference.
//!
//! # Colour assignment for tags
//!
//! Tag names are hashed to a stable index into the palette so the same tag
//! always gets the same colour, regardless of which card it appears on.

use config::{Config, File, FileFormat};
use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

const DEFAULT_THEME_SRC: &str = include_str!("themes/default.toml");
const GRUVBOX_DARK_THEME_SRC: &str = include_str!("themes/gruvbox_dark.toml");

/// Names accepted by [`Theme::by_name`].
pub const THEME_NAMES: &[&str] = &["default", "gruvbox"];

// ---------------------------------------------------------------------------
// Raw (serde) types: mirror the TOML structure
// ---------------------------------------------------------------------------

/// One style entry, e.g. `{ fg = "cyan", bold = true }`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStyle {
    fg: Option<String>,
    bg: Option<String>,
    bold: bool,
    dim: bool,
    italic: bool,
    underlined: bool,
}

impl From<RawStyle> for Style {
    fn from(raw: RawStyle) -> Self {
        let modifiers = [
            (raw.bold, Modifier::BOLD),
            (raw.dim, Modifier::DIM),
            (raw.italic, Modifier::ITALIC),
            (raw.underlined, Modifier::UNDERLINED),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(Modifier::empty(), |acc, (_, m)| acc | m);

        let mut style = Style::default().add_modifier(modifiers);
        style.fg = raw.fg.as_deref().and_then(parse_color);
        style.bg = raw.bg.as_deref().and_then(parse_color);
        style
    }
}

#[derive(Debug, Deserialize)]
struct RawBorders {
    focused: RawStyle,
    unfocused: RawStyle,
    command_bar: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawCards {
    title: RawStyle,
    body: RawStyle,
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawChips {
    normal: RawStyle,
    selected: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawStatus {
    count: RawStyle,
    empty: RawStyle,
    error: RawStyle,
    auth: RawStyle,
}

#[derive(Debug, Deserialize)]
struct RawTags {
    palette: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    borders: RawBorders,
    cards: RawCards,
    chips: RawChips,
    status: RawStatus,
    tags: RawTags,
}

// ---------------------------------------------------------------------------
// Public Theme type
// ---------------------------------------------------------------------------

/// Application colour theme.
///
/// All styles are pre-resolved ratatui [`Style`] values, so rendering never
/// parses colours.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Border style for the currently focused pane.
    pub border_focused: Style,
    /// Border style for unfocused panes.
    pub border_unfocused: Style,
    /// Border style for the command bar pane.
    pub border_command_bar: Style,

    pub card_title: Style,
    pub card_body: Style,
    /// Background of the highlighted result card.
    pub card_selected: Style,

    pub chip: Style,
    pub chip_selected: Style,

    /// The "{n} results" line.
    pub result_count: Style,
    /// The empty-state message.
    pub empty_state: Style,
    /// Inline validation errors (login form, commands).
    pub error: Style,
    /// Signed-in user name in the tab bar.
    pub auth: Style,

    tag_palette: Vec<Color>,
}

impl Theme {
    /// Load and parse the embedded default theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule out.
    pub fn load_default() -> Self {
        Self::from_toml_str(DEFAULT_THEME_SRC).expect("embedded default theme must be valid TOML")
    }

    /// Load and parse the embedded Gruvbox Dark theme.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed.
    pub fn load_gruvbox_dark() -> Self {
        Self::from_toml_str(GRUVBOX_DARK_THEME_SRC)
            .expect("embedded gruvbox dark theme must be valid TOML")
    }

    /// Resolve a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::load_default()),
            "gruvbox" | "gruvbox_dark" | "gruvbox-dark" => Some(Self::load_gruvbox_dark()),
            _ => None,
        }
    }

    /// Parse a theme from a TOML string.
    ///
    /// Unknown keys are ignored so user themes stay forward-compatible.
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let raw: RawTheme = Config::builder()
            .add_source(File::from_str(src, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(Self {
            border_focused: raw.borders.focused.into(),
            border_unfocused: raw.borders.unfocused.into(),
            border_command_bar: raw.borders.command_bar.into(),
            card_title: raw.cards.title.into(),
            card_body: raw.cards.body.into(),
            card_selected: raw.cards.selected.into(),
            chip: raw.chips.normal.into(),
            chip_selected: raw.chips.selected.into(),
            result_count: raw.status.count.into(),
            empty_state: raw.status.empty.into(),
            error: raw.status.error.into(),
            auth: raw.status.auth.into(),
            tag_palette: raw
                .tags
                .palette
                .iter()
                .filter_map(|s| parse_color(s))
                .collect(),
        })
    }

    /// Return a stable [`Style`] for a tag.
    pub fn tag_style(&self, tag: &str) -> Style {
        if self.tag_palette.is_empty() {
            return Style::default();
        }
        let idx = stable_hash(&tag.to_lowercase()) % self.tag_palette.len();
        Style::default().fg(self.tag_palette[idx])
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// FNV-1a over the bytes; stable across Rust versions and process restarts,
/// unlike `std`'s randomly seeded hasher.
fn stable_hash(s: &str) -> usize {
    s.bytes()
        .fold(0xcbf2_9ce4_8422_2325u64, |acc, b| {
            (acc ^ u64::from(b)).wrapping_mul(0x0100_0000_01b3)
        }) as usize
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::Black),
    ("red", Color::Red),
    ("green", Color::Green),
    ("yellow", Color::Yellow),
    ("blue", Color::Blue),
    ("magenta", Color::Magenta),
    ("cyan", Color::Cyan),
    ("gray", Color::Gray),
    ("dark_gray", Color::DarkGray),
    ("light_red", Color::LightRed),
    ("light_green", Color::LightGreen),
    ("light_yellow", Color::LightYellow),
    ("light_blue", Color::LightBlue),
    ("light_magenta", Color::LightMagenta),
    ("light_cyan", Color::LightCyan),
    ("white", Color::White),
];

/// Parse a theme colour: a terminal colour name (`dark_gray`, `Light-Blue`),
/// `#rrggbb`, or `indexed:N` for the 256-colour palette.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim().to_ascii_lowercase();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let rgb = u32::from_str_radix(hex, 16).ok()?;
        return Some(Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8));
    }
    if let Some(n) = s.strip_prefix("indexed:") {
        return n.parse().ok().map(Color::Indexed);
    }
    let name = s.replace(['-', ' '], "_").replace("grey", "gray");
    NAMED_COLORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, c)| *c)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_themes_load() {
        for name in THEME_NAMES {
            let theme = Theme::by_name(name).unwrap();
            assert_ne!(theme.border_focused, Style::default(), "{name}");
            assert_ne!(theme.chip, Style::default(), "{name}");
            assert_ne!(theme.error, Style::default(), "{name}");
            assert!(!theme.tag_palette.is_empty(), "{name}");
        }
    }

    #[test]
    fn unknown_theme_name() {
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn tag_style_is_stable_and_case_insensitive() {
        let theme = Theme::load_default();
        assert_eq!(theme.tag_style("Strategy"), theme.tag_style("strategy"));
    }

    #[test]
    fn different_tags_can_differ() {
        let theme = Theme::load_default();
        let styles: std::collections::HashSet<_> =
            ["ocean", "games", "music", "film", "speaking", "fitness"]
                .iter()
                .map(|t| theme.tag_style(t))
                .collect();
        assert!(styles.len() > 1, "all tags mapped to the same colour");
    }

    #[test]
    fn parse_hex_color() {
        assert_eq!(parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
    }

    #[test]
    fn parse_indexed_color() {
        assert_eq!(parse_color("indexed:42"), Some(Color::Indexed(42)));
    }

    #[test]
    fn parse_named_color_spellings() {
        assert_eq!(parse_color("dark_grey"), Some(Color::DarkGray));
        assert_eq!(parse_color("Light-Blue"), Some(Color::LightBlue));
    }

    #[test]
    fn parse_unknown_color_returns_none() {
        assert_eq!(parse_color("chartreuse"), None);
        assert_eq!(parse_color("#fff"), None);
    }

    #[test]
    fn style_modifiers_combine() {
        let style: Style = RawStyle {
            fg: Some("red".to_string()),
            bold: true,
            italic: true,
            ..Default::default()
        }
        .into();
        assert_eq!(style.fg, Some(Color::Red));
        assert!(style.add_modifier.contains(Modifier::BOLD | Modifier::ITALIC));
        assert!(!style.add_modifier.contains(Modifier::DIM));
    }
}
