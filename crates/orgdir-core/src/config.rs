//! Configuration types for orgdir.
//!
//! [`Config::load`] reads `~/.config/orgdir/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[ui]
filter_pane_width_pct = 28
show_tags             = true
theme                 = "default"

[search]
live_filter = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/orgdir/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_filter_pane_width_pct")]
    pub filter_pane_width_pct: u16,
    #[serde(default = "default_show_tags")]
    pub show_tags: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_filter_pane_width_pct() -> u16 { 28 }
fn default_show_tags() -> bool { true }
fn default_theme() -> String { "default".to_string() }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            filter_pane_width_pct: default_filter_pane_width_pct(),
            show_tags: default_show_tags(),
            theme: default_theme(),
        }
    }
}

/// `[search]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchConfig {
    /// Re-run the search on every keystroke instead of only on Enter.
    #[serde(default)]
    pub live_filter: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/orgdir/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_dir().join("config.toml");
        if !path.exists() {
            write_defaults(&path)?;
            tracing::info!(path = %path.display(), "wrote default config");
        }
        Self::load_from(&path)
    }

    /// Layer the file at `path` over the built-in defaults. A missing file
    /// yields the defaults; keys absent from the file keep their default.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg = layered()
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        layered()
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("built-in default config must be valid")
    }
}

fn layered() -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
}

fn write_defaults(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG.trim_start())
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$XDG_CONFIG_HOME/orgdir`, falling back to `~/.config/orgdir`.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("orgdir")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
