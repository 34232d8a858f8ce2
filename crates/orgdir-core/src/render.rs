//! Pure data-to-markup mapping for the results panel and chip bar.
//!
//! Nothing here touches a view. [`render_card`] turns an [`Entry`] into a
//! [`ResultCard`]; [`ResultCard::to_html`] is one way of printing it and the
//! TUI lists are another.

use std::collections::HashMap;

use crate::state::EngineState;
use crate::types::{Entry, FilterChip, FilterKey};

const FALLBACK_TITLE: &str = "Organization";

/// Attributes the detail panel reads from a card's "view details" affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailAttrs {
    pub org: String,
    pub description: String,
    /// Comma-separated tags.
    pub tags: String,
}

/// One rendered result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub detail: DetailAttrs,
}

impl ResultCard {
    /// Card markup with the same data attributes the static page cards carry,
    /// so a detail panel can be wired to it without re-initialising the page.
    pub fn to_html(&self) -> String {
        let tags: String = self
            .tags
            .iter()
            .map(|t| format!(r#"<span class="tag">{}</span>"#, escape(t)))
            .collect();
        format!(
            concat!(
                r#"<article class="org-card result-card">"#,
                r#"<h3>{title}</h3><p>{desc}</p><div class="tag-row">{tags}</div>"#,
                r#"<button class="btn btn-secondary view-details" data-org="{org}" data-description="{ddesc}" data-tags="{dtags}">View Details</button>"#,
                r#"</article>"#
            ),
            title = escape(&self.title),
            desc = escape(&self.description),
            tags = tags,
            org = escape(&self.detail.org),
            ddesc = escape(&self.detail.description),
            dtags = escape(&self.detail.tags),
        )
    }
}

/// Map an entry to its result card.
pub fn render_card(entry: &Entry) -> ResultCard {
    let title = if entry.title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        entry.title.clone()
    };
    ResultCard {
        detail: DetailAttrs {
            org: if entry.id.is_empty() { title.clone() } else { entry.id.clone() },
            description: entry.description.clone(),
            tags: entry.tags_list.clone(),
        },
        title,
        description: entry.description.clone(),
        tags: entry.tags.clone(),
    }
}

/// `"{n} result{s}"`, singular only at one.
pub fn format_result_count(n: usize) -> String {
    format!("{n} result{}", if n == 1 { "" } else { "s" })
}

/// Derived state of the separate results panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsPanel {
    pub hidden: bool,
    pub count: String,
    /// Empty-state indicator; only meaningful when the panel is shown.
    pub empty: bool,
    pub cards: Vec<ResultCard>,
}

impl Default for ResultsPanel {
    fn default() -> Self {
        Self::hidden()
    }
}

impl ResultsPanel {
    pub fn hidden() -> Self {
        Self {
            hidden: true,
            count: String::new(),
            empty: false,
            cards: Vec::new(),
        }
    }

    pub fn shown(cards: Vec<ResultCard>) -> Self {
        Self {
            hidden: false,
            count: format_result_count(cards.len()),
            empty: cards.is_empty(),
            cards,
        }
    }
}

/// Chips for the current selections: group-declaration order, then
/// value-insertion order. Labels fall back to the raw value.
pub fn active_chips(state: &EngineState, labels: &HashMap<FilterKey, String>) -> Vec<FilterChip> {
    state
        .filters()
        .iter()
        .flat_map(|selection| {
            selection.values.iter().map(move |value| {
                let key = FilterKey::new(selection.group.clone(), value.clone());
                let label = labels.get(&key).cloned().unwrap_or_else(|| value.clone());
                FilterChip { key, label }
            })
        })
        .collect()
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
