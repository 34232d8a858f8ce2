//! Core types for orgdir-core.
//!
//! This module defines the data the search engine works over: the immutable
//! [`Entry`] built from page markup, the [`FilterGroupDefinition`]s declared by
//! the filter controls, and the [`FilterKey`] / [`FilterChip`] pair used to
//! address and display a single selection.

use std::collections::BTreeMap;
use std::fmt;

use crate::markup::{parse_value_list, EntryMarkup, FilterControl};

/// A directory item eligible for search/filter matching.
///
/// Built once from [`EntryMarkup`] when a page is initialised and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Stable identifier: the `org` attribute when present, otherwise the title.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Lowercase text used for keyword substring matching.
    pub search_blob: String,
    /// Display tags, in markup order.
    pub tags: Vec<String>,
    /// Group name -> lowercase values recorded for this entry. A group that is
    /// absent (or present with no values) never satisfies an active filter.
    pub groups: BTreeMap<String, Vec<String>>,
    /// Comma-joined tag list handed to the detail panel.
    pub tags_list: String,
}

impl Entry {
    /// Build an entry from its markup attributes.
    ///
    /// When the markup carries no `search` blob, one is derived from the title,
    /// description and tags so every entry stays reachable by keyword.
    pub fn from_markup(markup: &EntryMarkup) -> Self {
        let title = markup.title.trim().to_string();
        let description = markup.description.trim().to_string();
        let tags: Vec<String> = markup
            .tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let search_blob = match markup.search.as_deref() {
            Some(blob) => blob.to_lowercase(),
            None => {
                let mut parts = vec![title.as_str(), description.as_str()];
                parts.extend(tags.iter().map(String::as_str));
                parts.join(" ").to_lowercase()
            }
        };

        let groups = markup
            .groups
            .iter()
            .map(|(group, raw)| (group.clone(), parse_value_list(raw)))
            .collect();

        let tags_list = markup
            .tags_list
            .clone()
            .unwrap_or_else(|| tags.join(", "));

        Self {
            id: markup.org.clone().unwrap_or_else(|| title.clone()),
            title,
            description,
            search_blob,
            tags,
            groups,
            tags_list,
        }
    }

    /// Values this entry records for `group`; empty when the group is absent.
    pub fn group_values(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// One selectable option of a filter group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    /// Lowercase machine value.
    pub value: String,
    /// Display label used by chips and the filter panel.
    pub label: String,
}

/// A named facet with its enumerated options, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGroupDefinition {
    pub name: String,
    pub options: Vec<FilterOption>,
}

impl FilterGroupDefinition {
    pub fn has_value(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    /// Collect group definitions from a page's filter controls.
    ///
    /// Groups appear in the order their first control is declared. Controls
    /// without a group or value are skipped, as are repeated (group, value)
    /// pairs.
    pub fn from_controls(controls: &[FilterControl]) -> Vec<Self> {
        let mut groups: Vec<Self> = Vec::new();
        for control in controls {
            let name = control.group.trim();
            let value = control.value.trim().to_lowercase();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            let label = control
                .label
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| value.clone());

            let idx = match groups.iter().position(|g| g.name == name) {
                Some(idx) => idx,
                None => {
                    groups.push(Self {
                        name: name.to_string(),
                        options: Vec::new(),
                    });
                    groups.len() - 1
                }
            };
            let group = &mut groups[idx];
            if !group.has_value(&value) {
                group.options.push(FilterOption { value, label });
            }
        }
        groups
    }
}

/// Address of one (group, value) selection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilterKey {
    pub group: String,
    pub value: String,
}

impl FilterKey {
    pub fn new(group: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            value: value.into(),
        }
    }

    /// Parse the `group:value` form used by chip identifiers and `--filter`.
    /// `group=value` is accepted too; the first separator wins, so values may
    /// contain the other one.
    pub fn parse(s: &str) -> Option<Self> {
        let (group, value) = s.split_once([':', '='])?;
        let group = group.trim();
        let value = value.trim().to_lowercase();
        if group.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self::new(group, value))
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.value)
    }
}

/// A removable token representing one active filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: FilterKey,
    pub label: String,
}

impl FilterChip {
    /// Text shown on the chip, including the remove affordance.
    pub fn display(&self) -> String {
        format!("{} ×", self.label)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
