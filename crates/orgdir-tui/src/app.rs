//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic.
//!
//! Each catalog page gets a [`PageState`]. Pages that render a search box or
//! search button own a [`SearchFilterEngine`] over a [`MemoryView`]; the
//! widgets read checkboxes, chips, hidden cards and the results panel back
//! out of that view, so everything on screen comes from the engine's last
//! re-derivation.

use crate::{
    commands::execute_command,
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        chip_bar::{ChipBar, ChipBarState},
        command_bar::{BarOutcome, CommandBar, CommandBarState},
        detail::DetailPopup,
        filter_panel::{FilterPanel, FilterPanelState},
        help::HelpPopup,
        login_form::{LoginForm, LoginFormState},
        results::{ResultList, ResultListState},
        search_bar::{SearchAction, SearchBar, SearchBarState},
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use orgdir_core::{
    config::Config, render_card, Access, Catalog, DetailPanel, Entry, FilterChip, FilterKey,
    Layer, MemoryView, OverlayStack, Page, ResultCard, SearchFilterEngine, Session, SessionError,
    SessionStore,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::{io, time::Duration};

// ---------------------------------------------------------------------------
// Focus + page types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Filters,
    Chips,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

pub struct PageState {
    pub page: Page,
    /// `None` on pages without search anchors, or whose anchors are incomplete.
    pub engine: Option<SearchFilterEngine<MemoryView>>,
    /// Cards for pages without an engine.
    static_cards: Vec<ResultCard>,
    pub search: SearchBarState,
    pub filters: FilterPanelState,
    pub chip_bar: ChipBarState,
    pub results: ResultListState,
}

impl PageState {
    pub fn new(page: Page) -> Self {
        let anchors = &page.markup.anchors;
        let engine = if anchors.search_box || anchors.search_button {
            SearchFilterEngine::init(&page.markup, MemoryView::new(page.markup.entries.len()))
        } else {
            None
        };
        let static_cards = page
            .markup
            .entries
            .iter()
            .map(|m| render_card(&Entry::from_markup(m)))
            .collect();
        Self {
            page,
            engine,
            static_cards,
            search: SearchBarState::default(),
            filters: FilterPanelState::default(),
            chip_bar: ChipBarState::default(),
            results: ResultListState::default(),
        }
    }

    fn results_panel_shown(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| !e.view().results().hidden)
    }

    /// Cards currently on screen: the results panel when it is shown,
    /// otherwise the page's own cards that are not hidden.
    pub fn displayed_cards(&self) -> Vec<ResultCard> {
        match &self.engine {
            Some(engine) => {
                let panel = engine.view().results();
                if !panel.hidden {
                    return panel.cards.clone();
                }
                engine
                    .view()
                    .visible_indices()
                    .into_iter()
                    .filter_map(|i| engine.entries().get(i))
                    .map(render_card)
                    .collect()
            }
            None => self.static_cards.clone(),
        }
    }

    /// Title of the results pane: the count line while the results panel is
    /// shown, otherwise the page title.
    pub fn results_title(&self) -> String {
        match &self.engine {
            Some(engine) if self.results_panel_shown() => engine.view().results().count.clone(),
            _ => self.page.title.clone(),
        }
    }

    pub fn shows_empty_state(&self) -> bool {
        self.engine
            .as_ref()
            .is_some_and(|e| !e.view().results().hidden && e.view().results().empty)
    }

    pub fn chips(&self) -> &[FilterChip] {
        match &self.engine {
            Some(engine) if !engine.view().chip_bar_hidden() => engine.view().chips(),
            _ => &[],
        }
    }

    pub fn has_filters(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| !e.groups().is_empty())
    }

    /// Run the current keyword through the engine.
    fn submit_search(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.set_keyword(self.search.query.as_str());
            self.results.reset();
            let chips = self.chips().len();
            self.chip_bar.clamp(chips);
        }
    }

    /// Check or uncheck one filter value. Returns `false` when the engine
    /// rejects the key; the page is left as it was.
    fn set_filter(&mut self, key: &FilterKey, selected: bool) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Err(err) = engine.toggle_filter_value(&key.group, &key.value, selected) {
            tracing::warn!(error = %err, page = %self.page.name, "filter toggle rejected");
            return false;
        }
        self.results.reset();
        true
    }

    /// Remove the chip for `key`, unchecking its control.
    fn remove_chip(&mut self, key: &FilterKey) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        if let Err(err) = engine.remove_chip(&key.group, &key.value) {
            tracing::warn!(error = %err, page = %self.page.name, "chip removal rejected");
            return false;
        }
        let remaining = engine.view().chips().len();
        self.chip_bar.clamp(remaining);
        self.results.reset();
        true
    }

    fn clear(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.clear();
        }
        self.search.clear();
        self.chip_bar.cursor = 0;
        self.results.reset();
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub pages: Vec<PageState>,
    pub active_page: usize,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub live_filter: bool,
    pub filters_open: bool,
    pub overlays: OverlayStack,
    pub detail: Option<DetailPanel>,
    pub login_form: LoginFormState,
    /// Private page to open once the login form succeeds.
    pub pending_page: Option<usize>,
    pub sessions: SessionStore,
    pub user: Option<Session>,
    pub command_bar: CommandBarState,
    /// One-line message in the status row, cleared on the next key.
    pub notice: Option<String>,
    pub quit: bool,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config, theme: Theme, sessions: SessionStore) -> Self {
        let user = sessions.load();
        let live_filter = config.search.live_filter;
        let mut state = Self {
            pages: catalog.pages.into_iter().map(PageState::new).collect(),
            active_page: 0,
            focus: Focus::Results,
            prev_focus: Focus::Results,
            theme,
            config,
            live_filter,
            filters_open: false,
            overlays: OverlayStack::default(),
            detail: None,
            login_form: LoginFormState::default(),
            pending_page: None,
            sessions,
            user,
            command_bar: CommandBarState::default(),
            notice: None,
            quit: false,
        };
        state.focus = state.default_focus();
        state
    }

    pub fn page(&self) -> &PageState {
        &self.pages[self.active_page]
    }

    pub fn page_index(&self, name: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.page.name == name)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Indices of pages shown in the tab strip for the current session.
    pub fn listed_pages(&self) -> Vec<usize> {
        let authed = self.is_authenticated();
        self.pages
            .iter()
            .enumerate()
            .filter(|(_, p)| p.page.is_listed(authed))
            .map(|(i, _)| i)
            .collect()
    }

    fn default_focus(&self) -> Focus {
        if self.page().engine.is_some() {
            Focus::Search
        } else {
            Focus::Results
        }
    }

    /// Panes that can take focus on the current page, in Tab order.
    fn focus_order(&self) -> Vec<Focus> {
        let page = self.page();
        let mut order = Vec::with_capacity(4);
        if page.engine.is_some() {
            order.push(Focus::Search);
        }
        if self.filters_open && page.has_filters() {
            order.push(Focus::Filters);
        }
        if !page.chips().is_empty() {
            order.push(Focus::Chips);
        }
        order.push(Focus::Results);
        order
    }

    fn next_focus(&self) -> Focus {
        let order = self.focus_order();
        match order.iter().position(|f| *f == self.focus) {
            Some(i) => order[(i + 1) % order.len()],
            None => order[0],
        }
    }

    /// Navigate to page `idx`, redirecting to the login form when the page
    /// is private and nobody is signed in.
    pub fn goto_page(&mut self, idx: usize) {
        let Some(target) = self.pages.get(idx) else {
            return;
        };
        match target.page.access(self.is_authenticated()) {
            Access::Granted => {
                tracing::debug!(page = %target.page.name, "page opened");
                self.active_page = idx;
                self.focus = self.default_focus();
            }
            Access::RedirectToLogin => {
                tracing::debug!(page = %target.page.name, "private page, redirecting to login");
                self.open_login(Some(idx));
            }
        }
    }

    /// Step through the listed pages, wrapping at either end.
    pub fn cycle_page(&mut self, forward: bool) {
        let listed = self.listed_pages();
        if listed.is_empty() {
            return;
        }
        let next = match listed.iter().position(|&i| i == self.active_page) {
            Some(pos) if forward => listed[(pos + 1) % listed.len()],
            Some(pos) => listed[(pos + listed.len() - 1) % listed.len()],
            None => listed[0],
        };
        self.goto_page(next);
    }

    fn private_landing_index(&self) -> Option<usize> {
        self.pages.iter().position(|p| p.page.private)
    }

    /// Show the login form, or go straight to the private page when already
    /// signed in.
    pub fn open_login(&mut self, pending: Option<usize>) {
        if self.is_authenticated() {
            if let Some(idx) = pending.or_else(|| self.private_landing_index()) {
                self.goto_page(idx);
            }
            return;
        }
        self.login_form.clear();
        self.pending_page = pending;
        self.overlays.open(Layer::Login);
    }

    fn close_login(&mut self) {
        self.overlays.close(Layer::Login);
        self.login_form.clear();
        self.pending_page = None;
    }

    pub fn login(&mut self, name: &str, email: &str) {
        match self.sessions.login(name, email) {
            Ok(session) => {
                self.user = Some(session);
                let target = self.pending_page.take().or_else(|| self.private_landing_index());
                self.close_login();
                if let Some(idx) = target {
                    self.goto_page(idx);
                }
            }
            Err(err) => {
                if !matches!(err, SessionError::MissingCredentials) {
                    tracing::warn!(error = %err, "login failed");
                }
                if self.overlays.is_open(Layer::Login) {
                    self.login_form.error = Some(err.to_string());
                } else {
                    self.notice = Some(err.to_string());
                }
            }
        }
    }

    pub fn logout(&mut self) {
        if let Err(err) = self.sessions.logout() {
            tracing::warn!(error = %err, "logout failed");
            self.notice = Some(err.to_string());
        }
        self.user = None;
        self.goto_page(0);
    }

    pub fn toggle_help(&mut self) {
        if self.overlays.is_open(Layer::Help) {
            self.overlays.close(Layer::Help);
        } else {
            self.overlays.open(Layer::Help);
        }
    }

    pub fn toggle_filters(&mut self) {
        self.filters_open = !self.filters_open;
        tracing::debug!(open = self.filters_open, "advanced filters toggled");
        if !self.filters_open && self.focus == Focus::Filters {
            self.focus = self.default_focus();
        }
    }

    pub fn clear_search(&mut self) {
        self.pages[self.active_page].clear();
        if self.focus == Focus::Chips {
            self.focus = self.default_focus();
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the app and open `start_page` (or the first page).
    pub fn new(
        catalog: Catalog,
        config: Config,
        theme: Theme,
        sessions: SessionStore,
        start_page: Option<&str>,
    ) -> Self {
        let mut state = AppState::new(catalog, config, theme, sessions);
        match start_page.map(|name| (name, state.page_index(name))) {
            Some((_, Some(idx))) => state.goto_page(idx),
            Some((name, None)) => state.notice = Some(format!("no such page: {name}")),
            None => {}
        }
        App { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Override the configured live-filter setting.
    pub fn with_live_filter(mut self, live: bool) -> Self {
        self.state.live_filter = live;
        self
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(&self.state) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;
        s.notice = None;

        // The top overlay intercepts all events.
        match s.overlays.top() {
            Some(Layer::Help) => {
                if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                    s.overlays.close_top();
                }
                return;
            }
            Some(Layer::Detail) => {
                if matches!(event, AppEvent::Escape | AppEvent::Enter | AppEvent::Quit) {
                    s.overlays.close_top();
                    s.detail = None;
                }
                return;
            }
            Some(Layer::Login) => {
                match event {
                    AppEvent::Escape | AppEvent::Quit => s.close_login(),
                    other => {
                        if let Some((name, email)) = s.login_form.handle(&other) {
                            s.login(&name, &email);
                        }
                    }
                }
                return;
            }
            None => {}
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match s.command_bar.handle(&event) {
                BarOutcome::Pending => {}
                BarOutcome::Cancelled => s.focus = s.prev_focus,
                BarOutcome::Submitted(cmd) => {
                    tracing::debug!(command = ?cmd, "executing command");
                    s.focus = s.prev_focus;
                    execute_command(s, cmd);
                }
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::Search => {
                tracing::debug!("help popup opened");
                s.overlays.open(Layer::Help);
            }

            AppEvent::Char(':') if s.focus != Focus::Search => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::Search {
                    tracing::debug!("focus: Search -> Results");
                    s.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => {
                let next = s.next_focus();
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                s.focus = next;
            }

            AppEvent::SearchFocus => {
                if s.page().engine.is_some() {
                    s.focus = Focus::Search;
                }
            }

            AppEvent::ToggleFilters => s.toggle_filters(),
            AppEvent::NextPage => s.cycle_page(true),
            AppEvent::PrevPage => s.cycle_page(false),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when a text-input widget has the keyboard, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(s: &AppState) -> bool {
    matches!(s.focus, Focus::Search | Focus::Command) || s.overlays.top() == Some(Layer::Login)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    let live = s.live_filter;
    let page = &mut s.pages[s.active_page];
    match s.focus {
        Focus::Search => match page.search.handle(&event) {
            Some(SearchAction::Submit) => page.submit_search(),
            Some(SearchAction::Edited) if live => page.submit_search(),
            _ => {}
        },
        Focus::Filters => {
            let Some(engine) = page.engine.as_ref() else {
                return;
            };
            if let Some(key) = page.filters.handle(&event, engine.groups()) {
                let checked = engine.view().is_checked(&key);
                page.set_filter(&key, !checked);
            }
        }
        Focus::Chips => {
            let Some(engine) = page.engine.as_ref() else {
                return;
            };
            let chips = engine.view().chips();
            if let Some(idx) = page.chip_bar.handle(&event, chips.len()) {
                let key = chips[idx].key.clone();
                if page.remove_chip(&key) && page.chips().is_empty() {
                    s.focus = Focus::Search;
                }
            }
        }
        Focus::Results => {
            let cards = page.displayed_cards();
            if let Some(idx) = page.results.handle(&event, cards.len()) {
                s.detail = Some(DetailPanel::from_attrs(&cards[idx].detail));
                s.overlays.open(Layer::Detail);
            }
        }
        Focus::Command => {} // handled before dispatch, should not reach here
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, s: &AppState) {
    let area = frame.area();
    let page = s.page();
    let chips = page.chips();

    // Vertical: tab bar | search bar | chip bar | body | status row
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if page.engine.is_some() { 3 } else { 0 }),
            Constraint::Length(if chips.is_empty() { 0 } else { 1 }),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let show_filters = s.filters_open && page.has_filters();
    let pct = s.config.ui.filter_pane_width_pct.min(80);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([
            if show_filters {
                Constraint::Percentage(pct)
            } else {
                Constraint::Length(0)
            },
            Constraint::Fill(1),
        ])
        .split(vert[3]);

    let listed = s.listed_pages();
    let titles: Vec<&str> = listed.iter().map(|&i| s.pages[i].page.title.as_str()).collect();
    let active = listed.iter().position(|&i| i == s.active_page);
    let user = s.user.as_ref().map(|u| u.name.as_str());
    frame.render_widget(TabBar::new(titles, active, user, &s.theme), vert[0]);

    if let Some(engine) = &page.engine {
        frame.render_widget(
            SearchBar::new(&page.search, s.focus == Focus::Search, s.live_filter, &s.theme),
            vert[1],
        );
        frame.render_widget(
            ChipBar::new(chips, &page.chip_bar, s.focus == Focus::Chips, &s.theme),
            vert[2],
        );
        if show_filters {
            frame.render_widget(
                FilterPanel::new(
                    &page.filters,
                    engine.groups(),
                    engine.view(),
                    s.focus == Focus::Filters,
                    &s.theme,
                ),
                horiz[0],
            );
        }
    }

    let cards = page.displayed_cards();
    frame.render_widget(
        ResultList::new(&cards, &page.results, s.focus == Focus::Results, &s.theme)
            .title(page.results_title())
            .empty_state(page.shows_empty_state())
            .show_tags(s.config.ui.show_tags),
        horiz[1],
    );

    let status = match &s.notice {
        Some(msg) => Line::from(Span::styled(msg.clone(), s.theme.error)),
        None => Line::from(Span::styled(
            " Tab:focus  /:search  f:filters  [ ]:pages  ::command",
            Style::default().add_modifier(Modifier::DIM),
        )),
    };
    frame.render_widget(Paragraph::new(status), vert[4]);

    for layer in s.overlays.iter() {
        match layer {
            Layer::Detail => {
                if let Some(panel) = &s.detail {
                    frame.render_widget(DetailPopup::new(panel, &s.theme), area);
                }
            }
            Layer::Login => frame.render_widget(LoginForm::new(&s.login_form, &s.theme), area),
            Layer::Help => frame.render_widget(HelpPopup::new(&s.theme), area),
        }
    }

    // Command bar overlays the bottom row of the screen
    if s.focus == Focus::Command {
        let cmd_area = Rect {
            y: area.bottom().saturating_sub(1),
            height: 1,
            ..area
        };
        frame.render_widget(CommandBar::new(&s.command_bar, &s.theme), cmd_area);
        let col = s.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if s.overlays.top() == Some(Layer::Login) {
        frame.set_cursor_position(s.login_form.cursor_position(area));
    } else if s.overlays.top().is_none() && s.focus == Focus::Search && page.engine.is_some() {
        let bar = SearchBar::new(&page.search, true, s.live_filter, &s.theme);
        frame.set_cursor_position(bar.cursor_position(vert[1]));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn app(start: Option<&str>) -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(dir.path().join("session.json"));
        let app = App::new(
            Catalog::demo(),
            Config::defaults(),
            Theme::load_default(),
            sessions,
            start,
        );
        (dir, app)
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle(AppEvent::Char(c));
        }
    }

    fn titles(app: &App) -> Vec<String> {
        app.state()
            .page()
            .displayed_cards()
            .into_iter()
            .map(|c| c.title)
            .collect()
    }

    #[test]
    fn starts_on_first_page_with_static_cards() {
        let (_dir, app) = app(None);
        assert_eq!(app.state().page().page.name, "home");
        assert_eq!(app.state().focus, Focus::Results);
        assert_eq!(titles(&app), ["Chess Club", "Surf Team"]);
    }

    #[test]
    fn search_submits_on_enter_only() {
        let (_dir, mut app) = app(Some("explore"));
        assert_eq!(app.state().focus, Focus::Search);
        type_str(&mut app, "chess");
        assert_eq!(app.state().page().results_title(), "Explore");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().page().results_title(), "1 result");
        assert_eq!(titles(&app), ["Chess Club"]);
    }

    #[test]
    fn live_filter_searches_while_typing() {
        let (_dir, app) = app(Some("explore"));
        let mut app = app.with_live_filter(true);
        type_str(&mut app, "surf");
        assert_eq!(titles(&app), ["Surf Team"]);
        for _ in 0..4 {
            app.handle(AppEvent::Backspace);
        }
        // Nothing active again: panel hidden, every card back.
        assert_eq!(app.state().page().results_title(), "Explore");
        assert_eq!(titles(&app).len(), 8);
    }

    #[test]
    fn toggling_a_filter_adds_a_chip_and_chip_removal_unchecks() {
        let (_dir, mut app) = app(Some("explore"));
        type_str(&mut app, "club");
        app.handle(AppEvent::Enter);
        app.handle(AppEvent::ToggleFilters);
        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state().focus, Focus::Filters);
        // category header -> academic
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter);

        let page = app.state().page();
        assert_eq!(page.chips().len(), 1);
        assert_eq!(page.chips()[0].display(), "Academic ×");
        assert_eq!(titles(&app), ["Chess Club", "Robotics Society", "Debate Union"]);

        app.handle(AppEvent::FocusNext);
        assert_eq!(app.state().focus, Focus::Chips);
        app.handle(AppEvent::Backspace);
        let page = app.state().page();
        assert!(page.chips().is_empty());
        let engine = page.engine.as_ref().unwrap();
        assert!(!engine
            .view()
            .is_checked(&orgdir_core::FilterKey::new("category", "academic")));
        assert_eq!(app.state().focus, Focus::Search);
    }

    #[test]
    fn rejected_filter_keys_leave_the_page_unchanged() {
        let (_dir, mut app) = app(Some("explore"));
        let idx = app.state.active_page;
        let page = &mut app.state.pages[idx];

        assert!(page.set_filter(&FilterKey::new("category", "social"), true));
        assert_eq!(page.chips().len(), 1);

        let knitting = FilterKey::new("category", "knitting");
        assert!(!page.set_filter(&knitting, true));
        assert!(!page.remove_chip(&knitting));
        assert_eq!(page.chips().len(), 1);
        assert_eq!(page.chips()[0].key, FilterKey::new("category", "social"));

        assert!(page.remove_chip(&FilterKey::new("category", "social")));
        assert!(page.chips().is_empty());
    }

    #[test]
    fn enter_on_result_opens_detail_and_escape_closes() {
        let (_dir, mut app) = app(None);
        app.handle(AppEvent::Nav(Direction::Down));
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().overlays.top(), Some(Layer::Detail));
        let detail = app.state().detail.as_ref().unwrap();
        assert_eq!(detail.title, "Surf Team");
        assert_eq!(detail.tags, ["Ocean", "Competitive"]);
        app.handle(AppEvent::Escape);
        assert_eq!(app.state().overlays.top(), None);
        assert!(app.state().detail.is_none());
    }

    #[test]
    fn private_page_redirects_to_login_then_lands_after_success() {
        let (_dir, mut app) = app(Some("my-orgs"));
        assert_eq!(app.state().page().page.name, "home");
        assert_eq!(app.state().overlays.top(), Some(Layer::Login));

        // Email only: rejected with the form message.
        app.handle(AppEvent::FocusNext);
        type_str(&mut app, "ada@example.edu");
        app.handle(AppEvent::Enter);
        assert_eq!(
            app.state().login_form.error.as_deref(),
            Some("Please provide both your name and email.")
        );

        app.handle(AppEvent::FocusNext);
        type_str(&mut app, "Ada");
        app.handle(AppEvent::FocusNext);
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().overlays.top(), None);
        assert_eq!(app.state().page().page.name, "my-orgs");
        assert_eq!(app.state().user.as_ref().map(|u| u.name.as_str()), Some("Ada"));
        assert!(app.state().listed_pages().contains(&2));
    }

    #[test]
    fn auth_link_pages_are_unlisted_when_signed_out() {
        let (_dir, mut app) = app(None);
        assert_eq!(app.state().listed_pages(), [0, 1]);
        app.handle(AppEvent::NextPage);
        app.handle(AppEvent::NextPage);
        assert_eq!(app.state().page().page.name, "home");
    }

    #[test]
    fn logout_command_returns_to_first_page() {
        let (_dir, mut app) = app(None);
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "login Ada ada@example.edu");
        app.handle(AppEvent::Enter);
        assert_eq!(app.state().page().page.name, "my-orgs");

        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "logout");
        app.handle(AppEvent::Enter);
        assert!(app.state().user.is_none());
        assert_eq!(app.state().page().page.name, "home");
    }

    #[test]
    fn clear_command_resets_search() {
        let (_dir, mut app) = app(Some("explore"));
        type_str(&mut app, "zzz");
        app.handle(AppEvent::Enter);
        assert!(app.state().page().shows_empty_state());
        app.handle(AppEvent::Escape);
        app.handle(AppEvent::Char(':'));
        type_str(&mut app, "clear");
        app.handle(AppEvent::Enter);
        let page = app.state().page();
        assert!(page.search.query.is_empty());
        assert!(!page.shows_empty_state());
        assert_eq!(titles(&app).len(), 8);
    }

    #[test]
    fn help_overlay_swallows_keys() {
        let (_dir, mut app) = app(None);
        app.handle(AppEvent::Char('?'));
        app.handle(AppEvent::NextPage);
        assert_eq!(app.state().page().page.name, "home");
        app.handle(AppEvent::Char('?'));
        assert_eq!(app.state().overlays.top(), None);
    }

    #[test]
    fn draws_explore_page() {
        let (_dir, mut app) = app(Some("explore"));
        type_str(&mut app, "club");
        app.handle(AppEvent::Enter);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app.state())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("4 results"));
        assert!(text.contains("Log In"));
    }
}
