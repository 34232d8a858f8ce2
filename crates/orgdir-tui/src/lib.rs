//! orgdir TUI: ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use orgdir_core::{config::Config, Catalog, SessionStore};

/// Start the TUI over `catalog`.
///
/// `live` forces filtering on every keystroke regardless of the configured
/// `search.live_filter`. `start_page` is a route name; private pages open the
/// login form first.
pub fn run(catalog: Catalog, live: bool, start_page: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(%err, "config unreadable, using defaults");
        Config::defaults()
    });
    let theme = theme::Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        theme::Theme::load_default()
    });
    let live = live || config.search.live_filter;
    App::new(
        catalog,
        config,
        theme,
        SessionStore::default_location(),
        start_page,
    )
    .with_live_filter(live)
    .run()
}
