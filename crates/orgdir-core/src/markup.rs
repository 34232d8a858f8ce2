//! Page markup contract.
//!
//! A page hands the engine three things: the anchors it renders (search box,
//! search trigger, chip bar, results panel), the entry cards with their data
//! attributes, and the filter controls. These types deserialize straight from
//! the catalog file, one `PageMarkup` per page.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Anchor elements a page may or may not render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Anchors {
    /// Text input the keyword is read from.
    #[serde(default)]
    pub search_box: bool,
    /// Explicit search trigger (button / Enter).
    #[serde(default)]
    pub search_button: bool,
    /// Container for active-filter chips.
    #[serde(default)]
    pub chip_bar: bool,
    /// Separate results panel with count and empty state. Pages without one
    /// toggle visibility of their cards in place.
    #[serde(default)]
    pub results_panel: bool,
}

/// Attributes carried by one entry card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EntryMarkup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Precomputed search blob.
    #[serde(default)]
    pub search: Option<String>,
    /// Identifier handed to the detail panel; defaults to the title.
    #[serde(default)]
    pub org: Option<String>,
    /// Comma-separated tag list for the detail panel; defaults to `tags`.
    #[serde(default)]
    pub tags_list: Option<String>,
    /// Group name -> comma-separated values, e.g. `category = "academic, social"`.
    #[serde(default)]
    pub groups: BTreeMap<String, String>,
}

/// One selectable filter checkbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterControl {
    pub group: String,
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Everything the search engine reads from a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageMarkup {
    #[serde(default)]
    pub anchors: Anchors,
    #[serde(default)]
    pub entries: Vec<EntryMarkup>,
    #[serde(default)]
    pub filters: Vec<FilterControl>,
}

/// Split a comma-separated attribute into trimmed, lowercase, non-empty values.
pub fn parse_value_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("academic", &["academic"])]
    #[case(" Academic , Social ", &["academic", "social"])]
    #[case("a,,b,", &["a", "b"])]
    #[case("", &[])]
    #[case(" , ", &[])]
    fn value_list_parsing(#[case] raw: &str, #[case] expected: &[&str]) {
        assert_eq!(parse_value_list(raw), expected);
    }
}
