//! The seam between the engine and whatever renders a page.
//!
//! The engine never reads back from a view; it pushes a full re-derivation
//! after every mutation. [`MemoryView`] is the in-process implementation used
//! by the TUI, headless mode and tests.

use std::collections::BTreeSet;

use crate::render::ResultsPanel;
use crate::types::{FilterChip, FilterKey};

pub trait PageView {
    /// Show or hide the entry card at `index` (markup order).
    fn set_entry_hidden(&mut self, index: usize, hidden: bool);

    /// Set the checked state of the filter control for `key`.
    fn set_control_checked(&mut self, key: &FilterKey, checked: bool);

    /// Replace the chip bar contents. An empty slice hides and clears the bar.
    fn show_chips(&mut self, chips: &[FilterChip]);

    /// Replace the results panel.
    fn show_results(&mut self, panel: ResultsPanel);
}

/// In-memory page: holds exactly what a rendered page would show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryView {
    hidden: Vec<bool>,
    checked: BTreeSet<FilterKey>,
    chips: Vec<FilterChip>,
    chip_bar_hidden: bool,
    results: ResultsPanel,
}

impl MemoryView {
    /// A view over `entries` cards, all visible, with an empty hidden chip bar.
    pub fn new(entries: usize) -> Self {
        Self {
            hidden: vec![false; entries],
            checked: BTreeSet::new(),
            chips: Vec::new(),
            chip_bar_hidden: true,
            results: ResultsPanel::hidden(),
        }
    }

    pub fn is_hidden(&self, index: usize) -> bool {
        self.hidden.get(index).copied().unwrap_or(false)
    }

    /// Indices of entries currently shown, in markup order.
    pub fn visible_indices(&self) -> Vec<usize> {
        self.hidden
            .iter()
            .enumerate()
            .filter(|(_, hidden)| !**hidden)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_checked(&self, key: &FilterKey) -> bool {
        self.checked.contains(key)
    }

    pub fn chips(&self) -> &[FilterChip] {
        &self.chips
    }

    pub fn chip_bar_hidden(&self) -> bool {
        self.chip_bar_hidden
    }

    pub fn results(&self) -> &ResultsPanel {
        &self.results
    }
}

impl PageView for MemoryView {
    fn set_entry_hidden(&mut self, index: usize, hidden: bool) {
        if index >= self.hidden.len() {
            self.hidden.resize(index + 1, false);
        }
        self.hidden[index] = hidden;
    }

    fn set_control_checked(&mut self, key: &FilterKey, checked: bool) {
        if checked {
            self.checked.insert(key.clone());
        } else {
            self.checked.remove(key);
        }
    }

    fn show_chips(&mut self, chips: &[FilterChip]) {
        self.chips = chips.to_vec();
        self.chip_bar_hidden = chips.is_empty();
    }

    fn show_results(&mut self, panel: ResultsPanel) {
        self.results = panel;
    }
}
