//! Filter panel widget: collapsible checkbox tree of the advanced filters.
//!
//! Each filter group is a header row; its options are the leaves.
//!
//! # Navigation
//! - `↑`/`k` and `↓`/`j` move the cursor up and down the visible rows.
//! - `→`/`l` expands the group under the cursor; `←`/`h` collapses it.
//! - `Enter` or `Space` on an option asks the app to toggle that filter;
//!   on a group header it toggles the collapse state.
//!
//! The panel never owns the checked state. It reads it from the page view so
//! that checkboxes, chips and the engine state cannot drift apart.

use std::collections::BTreeSet;

use crate::event::{AppEvent, Direction};
use crate::theme::Theme;
use orgdir_core::{FilterGroupDefinition, FilterKey, FilterOption, MemoryView};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, StatefulWidget, Widget},
};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// How many options of a group are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMark {
    All,
    None,
    Some,
}

/// One visible row of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow<'a> {
    Group(&'a FilterGroupDefinition),
    Option {
        group: &'a str,
        option: &'a FilterOption,
    },
}

impl FilterRow<'_> {
    fn key(&self) -> Option<FilterKey> {
        match self {
            FilterRow::Group(_) => None,
            FilterRow::Option { group, option } => Some(FilterKey::new(*group, &option.value)),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct FilterPanelState {
    /// Index into the currently-visible rows.
    pub cursor: usize,
    collapsed: BTreeSet<String>,
}

impl FilterPanelState {
    /// Flatten the groups into rows, respecting the collapsed set.
    pub fn rows<'a>(&self, groups: &'a [FilterGroupDefinition]) -> Vec<FilterRow<'a>> {
        let mut out = Vec::new();
        for group in groups {
            out.push(FilterRow::Group(group));
            if !self.collapsed.contains(&group.name) {
                out.extend(group.options.iter().map(|option| FilterRow::Option {
                    group: &group.name,
                    option,
                }));
            }
        }
        out
    }

    pub fn is_collapsed(&self, group: &str) -> bool {
        self.collapsed.contains(group)
    }

    /// Handle an [`AppEvent`]. Returns the filter to toggle, if the event
    /// asked for one.
    pub fn handle(
        &mut self,
        event: &AppEvent,
        groups: &[FilterGroupDefinition],
    ) -> Option<FilterKey> {
        let rows = self.rows(groups);
        let current = rows.get(self.cursor).copied();
        match event {
            AppEvent::Nav(Direction::Up) => {
                self.cursor = self.cursor.saturating_sub(1);
                tracing::debug!(cursor = self.cursor, "filters: cursor up");
                None
            }
            AppEvent::Nav(Direction::Down) => {
                if self.cursor + 1 < rows.len() {
                    self.cursor += 1;
                }
                tracing::debug!(cursor = self.cursor, "filters: cursor down");
                None
            }
            AppEvent::Nav(Direction::Right) => {
                if let Some(FilterRow::Group(group)) = current {
                    tracing::debug!(group = %group.name, "filters: expand");
                    self.collapsed.remove(&group.name);
                }
                None
            }
            AppEvent::Nav(Direction::Left) => {
                let name = match current {
                    Some(FilterRow::Group(group)) => Some(group.name.clone()),
                    Some(FilterRow::Option { group, .. }) => Some(group.to_string()),
                    None => None,
                };
                if let Some(name) = name {
                    tracing::debug!(group = %name, "filters: collapse");
                    self.collapse(&name, groups);
                }
                None
            }
            AppEvent::Enter | AppEvent::Char(' ') => match current {
                Some(FilterRow::Group(group)) => {
                    if !self.collapsed.remove(&group.name) {
                        self.collapse(&group.name.clone(), groups);
                    }
                    None
                }
                Some(row) => row.key(),
                None => None,
            },
            _ => None,
        }
    }

    /// Collapse `group` and park the cursor on its header.
    fn collapse(&mut self, group: &str, groups: &[FilterGroupDefinition]) {
        self.collapsed.insert(group.to_string());
        let header = self
            .rows(groups)
            .iter()
            .position(|row| matches!(row, FilterRow::Group(g) if g.name == group));
        if let Some(idx) = header {
            self.cursor = idx;
        }
    }
}

/// Derive a group's mark from the checked state of its options.
pub fn group_mark(group: &FilterGroupDefinition, view: &MemoryView) -> GroupMark {
    let checked = group
        .options
        .iter()
        .filter(|o| view.is_checked(&FilterKey::new(&group.name, &o.value)))
        .count();
    if checked == 0 {
        GroupMark::None
    } else if checked == group.options.len() {
        GroupMark::All
    } else {
        GroupMark::Some
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

pub struct FilterPanel<'a> {
    state: &'a FilterPanelState,
    groups: &'a [FilterGroupDefinition],
    view: &'a MemoryView,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FilterPanel<'a> {
    pub fn new(
        state: &'a FilterPanelState,
        groups: &'a [FilterGroupDefinition],
        view: &'a MemoryView,
        focused: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            state,
            groups,
            view,
            focused,
            theme,
        }
    }
}

impl Widget for FilterPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.theme.border_focused
        } else {
            self.theme.border_unfocused
        };

        let block = Block::bordered()
            .title("Filters")
            .border_style(border_style);
        let inner = block.inner(area);
        block.render(area, buf);

        let items: Vec<ListItem> = self
            .state
            .rows(self.groups)
            .into_iter()
            .map(|row| match row {
                FilterRow::Group(group) => {
                    let expand = if self.state.is_collapsed(&group.name) {
                        "▶ "
                    } else {
                        "▼ "
                    };
                    let mark = match group_mark(group, self.view) {
                        GroupMark::All => " ✓",
                        GroupMark::None => "",
                        GroupMark::Some => " ◐",
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(expand),
                        Span::styled(
                            group.name.clone(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(mark),
                    ]))
                }
                FilterRow::Option { group, option } => {
                    let checked = self.view.is_checked(&FilterKey::new(group, &option.value));
                    let boxed = if checked { "[x] " } else { "[ ] " };
                    ListItem::new(Line::from(format!("    {boxed}{}", option.label)))
                }
            })
            .collect();

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let selected = self.focused.then_some(self.state.cursor);
        let mut list_state = ListState::default().with_selected(selected);
        StatefulWidget::render(list, inner, buf, &mut list_state);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_core::FilterControl;
    use orgdir_core::PageView;
    use pretty_assertions::assert_eq;

    fn groups() -> Vec<FilterGroupDefinition> {
        let controls: Vec<FilterControl> = [
            ("category", "academic"),
            ("category", "sports"),
            ("size", "small"),
        ]
        .into_iter()
        .map(|(group, value)| FilterControl {
            group: group.to_string(),
            value: value.to_string(),
            label: None,
        })
        .collect();
        FilterGroupDefinition::from_controls(&controls)
    }

    #[test]
    fn rows_flatten_groups_then_options() {
        let groups = groups();
        let state = FilterPanelState::default();
        assert_eq!(state.rows(&groups).len(), 5);
    }

    #[test]
    fn enter_on_option_requests_toggle() {
        let groups = groups();
        let mut state = FilterPanelState::default();
        state.handle(&AppEvent::Nav(Direction::Down), &groups);
        let key = state.handle(&AppEvent::Enter, &groups);
        assert_eq!(key, Some(FilterKey::new("category", "academic")));
    }

    #[test]
    fn space_on_header_collapses_group() {
        let groups = groups();
        let mut state = FilterPanelState::default();
        assert_eq!(state.handle(&AppEvent::Char(' '), &groups), None);
        assert!(state.is_collapsed("category"));
        assert_eq!(state.rows(&groups).len(), 3);
        state.handle(&AppEvent::Nav(Direction::Right), &groups);
        assert!(!state.is_collapsed("category"));
    }

    #[test]
    fn collapse_from_option_moves_cursor_to_header() {
        let groups = groups();
        let mut state = FilterPanelState::default();
        for _ in 0..4 {
            state.handle(&AppEvent::Nav(Direction::Down), &groups);
        }
        state.handle(&AppEvent::Nav(Direction::Left), &groups);
        assert!(state.is_collapsed("size"));
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn cursor_stops_at_last_row() {
        let groups = groups();
        let mut state = FilterPanelState::default();
        for _ in 0..10 {
            state.handle(&AppEvent::Nav(Direction::Down), &groups);
        }
        assert_eq!(state.cursor, 4);
    }

    #[test]
    fn group_mark_follows_checked_controls() {
        let groups = groups();
        let mut view = MemoryView::new(0);
        assert_eq!(group_mark(&groups[0], &view), GroupMark::None);
        view.set_control_checked(&FilterKey::new("category", "academic"), true);
        assert_eq!(group_mark(&groups[0], &view), GroupMark::Some);
        view.set_control_checked(&FilterKey::new("category", "sports"), true);
        assert_eq!(group_mark(&groups[0], &view), GroupMark::All);
    }
}
