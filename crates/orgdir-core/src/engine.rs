//! Keyword + faceted search over a page's entry cards.
//!
//! [`SearchFilterEngine`] owns the [`EngineState`] for one page. Callers
//! request changes through [`set_keyword`](SearchFilterEngine::set_keyword),
//! [`toggle_filter_value`](SearchFilterEngine::toggle_filter_value),
//! [`remove_chip`](SearchFilterEngine::remove_chip) and
//! [`clear`](SearchFilterEngine::clear). Each of them replaces the state and
//! then re-derives the chip bar and entry visibility in full, so the view can
//! never drift from the state.
//!
//! # Search gating
//!
//! Until the first explicit search (keyword submit or clear) every entry is
//! shown and the results panel stays hidden, whatever filters are ticked.
//! Afterwards the results panel is shown only while the keyword or a filter
//! is active. With nothing active, every entry is visible on every path.

use std::collections::HashMap;

use crate::error::{Anchor, EngineError};
use crate::markup::PageMarkup;
use crate::matcher::is_visible;
use crate::render::{active_chips, render_card, ResultsPanel};
use crate::state::EngineState;
use crate::types::{Entry, FilterChip, FilterGroupDefinition, FilterKey};
use crate::view::PageView;

pub struct SearchFilterEngine<V: PageView> {
    entries: Vec<Entry>,
    groups: Vec<FilterGroupDefinition>,
    labels: HashMap<FilterKey, String>,
    state: EngineState,
    has_searched: bool,
    renders_chips: bool,
    renders_results: bool,
    view: V,
}

impl<V: PageView> SearchFilterEngine<V> {
    /// Build an engine for `page`, rendering into `view`.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingAnchor`] when the page has no search box, no
    /// search trigger, or no entry cards.
    pub fn try_init(page: &PageMarkup, view: V) -> Result<Self, EngineError> {
        if !page.anchors.search_box {
            return Err(EngineError::MissingAnchor(Anchor::SearchBox));
        }
        if !page.anchors.search_button {
            return Err(EngineError::MissingAnchor(Anchor::SearchButton));
        }
        if page.entries.is_empty() {
            return Err(EngineError::MissingAnchor(Anchor::Entries));
        }

        let entries: Vec<Entry> = page.entries.iter().map(Entry::from_markup).collect();
        let groups = FilterGroupDefinition::from_controls(&page.filters);
        let labels = groups
            .iter()
            .flat_map(|g| {
                g.options
                    .iter()
                    .map(move |o| (FilterKey::new(g.name.clone(), o.value.clone()), o.label.clone()))
            })
            .collect();
        let state = EngineState::new(groups.iter().map(|g| g.name.clone()));

        let mut engine = Self {
            entries,
            groups,
            labels,
            state,
            has_searched: false,
            renders_chips: page.anchors.chip_bar,
            renders_results: page.anchors.results_panel,
            view,
        };

        tracing::info!(
            entries = engine.entries.len(),
            groups = engine.groups.len(),
            "explore search ready"
        );
        engine.sync();
        Ok(engine)
    }

    /// Like [`try_init`](Self::try_init), but a missing anchor only logs a
    /// warning and the page goes without search.
    pub fn init(page: &PageMarkup, view: V) -> Option<Self> {
        match Self::try_init(page, view) {
            Ok(engine) => Some(engine),
            Err(err) => {
                tracing::warn!(%err, "explore search disabled");
                None
            }
        }
    }

    // ── Mutators ──────────────────────────────────────────────────────────

    /// Store `raw` (lowercased, trimmed) as the keyword and re-run the search.
    ///
    /// Counts as an explicit search trigger.
    pub fn set_keyword(&mut self, raw: &str) {
        self.state = self.state.with_keyword(raw);
        self.has_searched = true;
        tracing::debug!(keyword = %self.state.keyword(), "search keyword updated");
        self.sync();
    }

    /// Select or deselect `value` in `group`.
    ///
    /// # Errors
    ///
    /// [`EngineError::UnknownFilterReference`] when the pair is not declared by
    /// any filter control. The state and view are left untouched.
    pub fn toggle_filter_value(
        &mut self,
        group: &str,
        value: &str,
        selected: bool,
    ) -> Result<(), EngineError> {
        let key = self.resolve(group, value)?;
        self.state = self.state.with_filter(&key.group, &key.value, selected);
        self.view.set_control_checked(&key, selected);
        tracing::debug!(filter = %key, selected, "filter toggled");
        self.sync();
        Ok(())
    }

    /// Remove the chip for (`group`, `value`) and uncheck its control.
    pub fn remove_chip(&mut self, group: &str, value: &str) -> Result<(), EngineError> {
        self.toggle_filter_value(group, value, false)?;
        let key = FilterKey::new(group, value.trim().to_lowercase());
        self.view.set_control_checked(&key, false);
        Ok(())
    }

    /// Clear the keyword and every selection. Counts as an explicit search
    /// trigger, like clearing a native search field.
    pub fn clear(&mut self) {
        for chip in active_chips(&self.state, &self.labels) {
            self.view.set_control_checked(&chip.key, false);
        }
        self.state = self.state.cleared();
        self.has_searched = true;
        tracing::debug!("search cleared");
        self.sync();
    }

    // ── Render passes ─────────────────────────────────────────────────────

    /// Run the match pass, push per-entry visibility and the results panel to
    /// the view, and return the indices of the visible entries.
    pub fn apply_filters(&mut self) -> Vec<usize> {
        if !self.has_searched {
            for i in 0..self.entries.len() {
                self.view.set_entry_hidden(i, false);
            }
            self.update_results(&[]);
            return (0..self.entries.len()).collect();
        }

        let mut matches = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            let visible = is_visible(entry, &self.state);
            self.view.set_entry_hidden(i, !visible);
            if visible {
                matches.push(i);
            }
        }
        tracing::debug!(
            keyword = %self.state.keyword(),
            visible = matches.len(),
            total = self.entries.len(),
            "filter pass"
        );
        self.update_results(&matches);
        matches
    }

    /// Rebuild the chip bar from the current selections and return the chips.
    pub fn render_active_filters(&mut self) -> Vec<FilterChip> {
        let chips = active_chips(&self.state, &self.labels);
        if self.renders_chips {
            self.view.show_chips(&chips);
        }
        chips
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn groups(&self) -> &[FilterGroupDefinition] {
        &self.groups
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Entries the current state shows, in markup order.
    pub fn visible_entries(&self) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| !self.has_searched || is_visible(e, &self.state))
            .collect()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn sync(&mut self) {
        self.render_active_filters();
        self.apply_filters();
    }

    fn resolve(&self, group: &str, value: &str) -> Result<FilterKey, EngineError> {
        let value = value.trim().to_lowercase();
        let known = self
            .groups
            .iter()
            .find(|g| g.name == group)
            .is_some_and(|g| g.has_value(&value));
        if !known {
            let err = EngineError::UnknownFilterReference {
                group: group.to_string(),
                value,
            };
            tracing::warn!(%err, "ignoring filter toggle");
            return Err(err);
        }
        Ok(FilterKey::new(group, value))
    }

    fn update_results(&mut self, matches: &[usize]) {
        if !self.renders_results {
            return;
        }
        let panel = if !self.has_searched || !self.state.has_active_filters() {
            ResultsPanel::hidden()
        } else {
            ResultsPanel::shown(matches.iter().map(|&i| render_card(&self.entries[i])).collect())
        };
        self.view.show_results(panel);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
