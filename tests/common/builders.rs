//! Test builders: ergonomic constructors for page markup.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use orgdir_core::{Anchors, EntryMarkup, FilterControl, MemoryView, PageMarkup, SearchFilterEngine};

// ---------------------------------------------------------------------------
// EntryBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`EntryMarkup`].
///
/// # Example
///
/// ```rust
/// let entry = EntryBuilder::new("Chess Club")
///     .search("chess club strategy")
///     .group("category", "academic, social")
///     .tags(&["Strategy", "Games"])
///     .build();
/// ```
pub struct EntryBuilder {
    markup: EntryMarkup,
}

impl EntryBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            markup: EntryMarkup {
                title: title.into(),
                ..Default::default()
            },
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.markup.description = description.into();
        self
    }

    pub fn search(mut self, blob: impl Into<String>) -> Self {
        self.markup.search = Some(blob.into());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.markup.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn group(mut self, group: &str, values: &str) -> Self {
        self.markup.groups.insert(group.to_string(), values.to_string());
        self
    }

    pub fn build(self) -> EntryMarkup {
        self.markup
    }
}

// ---------------------------------------------------------------------------
// PageBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`PageMarkup`]. Starts with every anchor present.
pub struct PageBuilder {
    markup: PageMarkup,
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    pub fn new() -> Self {
        Self {
            markup: PageMarkup {
                anchors: Anchors {
                    search_box: true,
                    search_button: true,
                    chip_bar: true,
                    results_panel: true,
                },
                ..Default::default()
            },
        }
    }

    pub fn anchors(mut self, anchors: Anchors) -> Self {
        self.markup.anchors = anchors;
        self
    }

    /// Drop the results panel so matches toggle in place.
    pub fn in_place(mut self) -> Self {
        self.markup.anchors.results_panel = false;
        self
    }

    pub fn entry(mut self, entry: EntryMarkup) -> Self {
        self.markup.entries.push(entry);
        self
    }

    pub fn filter(mut self, group: &str, value: &str, label: &str) -> Self {
        self.markup.filters.push(FilterControl {
            group: group.to_string(),
            value: value.to_string(),
            label: Some(label.to_string()),
        });
        self
    }

    pub fn build(self) -> PageMarkup {
        self.markup
    }

    /// Build the page and an engine over a fresh [`MemoryView`].
    ///
    /// # Panics
    ///
    /// Panics if the page is missing a required anchor.
    pub fn engine(self) -> SearchFilterEngine<MemoryView> {
        let page = self.build();
        let view = MemoryView::new(page.entries.len());
        SearchFilterEngine::try_init(&page, view).expect("page should have every anchor")
    }
}
