//! Matching predicates for a single filter pass.
//!
//! An entry is visible iff it matches the keyword AND every group with a
//! non-empty selection. Within a group any selected value is enough.

use crate::state::EngineState;
use crate::types::Entry;

/// Empty keyword matches everything; otherwise a substring test on the blob.
pub fn matches_keyword(entry: &Entry, keyword: &str) -> bool {
    keyword.is_empty() || entry.search_blob.contains(keyword)
}

/// Every constrained group must share at least one value with the entry.
/// An entry with no values for a constrained group fails that group.
pub fn matches_filters(entry: &Entry, state: &EngineState) -> bool {
    state.active_groups().all(|selection| {
        let values = entry.group_values(&selection.group);
        !values.is_empty() && values.iter().any(|v| selection.values.contains(v))
    })
}

pub fn is_visible(entry: &Entry, state: &EngineState) -> bool {
    matches_keyword(entry, state.keyword()) && matches_filters(entry, state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
