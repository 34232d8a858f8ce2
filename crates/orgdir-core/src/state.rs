//! Engine state: the current keyword and per-group selections.
//!
//! State is replaced on every write. [`EngineState::with_keyword`] and
//! [`EngineState::with_filter`] return a new value and leave `self` untouched,
//! so a transition can be checked by comparing the before and after values.

/// Selected values for one filter group, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupSelection {
    pub group: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineState {
    /// Lowercase, trimmed keyword. Empty means no keyword predicate.
    keyword: String,
    /// One slot per declared group, in declaration order.
    filters: Vec<GroupSelection>,
}

impl EngineState {
    /// Initial state: empty keyword and an empty selection for each group.
    pub fn new<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keyword: String::new(),
            filters: groups
                .into_iter()
                .map(|g| GroupSelection {
                    group: g.into(),
                    values: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn filters(&self) -> &[GroupSelection] {
        &self.filters
    }

    /// Selected values for `group`; empty when nothing is selected.
    pub fn selected(&self, group: &str) -> &[String] {
        self.filters
            .iter()
            .find(|s| s.group == group)
            .map(|s| s.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_selected(&self, group: &str, value: &str) -> bool {
        self.selected(group).iter().any(|v| v == value)
    }

    /// True when the keyword is set or any group has a selection.
    pub fn has_active_filters(&self) -> bool {
        !self.keyword.is_empty() || self.filters.iter().any(|s| !s.values.is_empty())
    }

    /// Groups that currently constrain matching.
    pub fn active_groups(&self) -> impl Iterator<Item = &GroupSelection> {
        self.filters.iter().filter(|s| !s.values.is_empty())
    }

    /// New state with `raw` lowercased and trimmed as the keyword.
    pub fn with_keyword(&self, raw: &str) -> Self {
        Self {
            keyword: normalize_keyword(raw),
            filters: self.filters.clone(),
        }
    }

    /// New state with `value` added to (or removed from) `group`.
    ///
    /// Adding an already-selected value or removing an absent one yields an
    /// equal state. A group not present in the state gets a slot appended.
    pub fn with_filter(&self, group: &str, value: &str, selected: bool) -> Self {
        let mut filters = self.filters.clone();
        let idx = match filters.iter().position(|s| s.group == group) {
            Some(idx) => idx,
            None => {
                filters.push(GroupSelection {
                    group: group.to_string(),
                    values: Vec::new(),
                });
                filters.len() - 1
            }
        };
        let values = &mut filters[idx].values;
        if selected {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        } else {
            values.retain(|v| v != value);
        }
        Self {
            keyword: self.keyword.clone(),
            filters,
        }
    }

    /// New state with the keyword and every selection cleared.
    pub fn cleared(&self) -> Self {
        Self::new(self.filters.iter().map(|s| s.group.clone()))
    }
}

/// Lowercase and trim a raw keyword.
pub fn normalize_keyword(raw: &str) -> String {
    raw.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
