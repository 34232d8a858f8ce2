//! Domain-specific assertion macros for orgdir harnesses.
//!
//! These wrap `pretty_assertions` and name the page element that diverged, so
//! a failure says whether the cards, the chips or the results panel are off.

/// Assert which entries are visible, by title, in markup order.
///
/// ```rust
/// assert_visible!(engine, ["Chess Club", "Surf Team"]);
/// ```
#[macro_export]
macro_rules! assert_visible {
    ($engine:expr, [$($title:expr),* $(,)?]) => {{
        let engine = &$engine;
        let actual: Vec<&str> = engine
            .view()
            .visible_indices()
            .into_iter()
            .map(|i| engine.entries()[i].title.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($title),*];
        pretty_assertions::assert_eq!(actual, expected, "visible entries diverged");
    }};
}

/// Assert the chip bar's labels, in display order.
#[macro_export]
macro_rules! assert_chips {
    ($engine:expr, [$($label:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $engine
            .view()
            .chips()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        let expected: Vec<&str> = vec![$($label),*];
        pretty_assertions::assert_eq!(actual, expected, "chip bar diverged");
    }};
}

/// Assert the results panel is hidden.
#[macro_export]
macro_rules! assert_results_hidden {
    ($engine:expr) => {{
        let panel = $engine.view().results();
        assert!(
            panel.hidden,
            "results panel should be hidden, but shows {:?} with {} cards",
            panel.count,
            panel.cards.len()
        );
    }};
}

/// Assert the results panel is shown with the given count line.
#[macro_export]
macro_rules! assert_results_count {
    ($engine:expr, $count:expr) => {{
        let panel = $engine.view().results();
        assert!(!panel.hidden, "results panel should be shown");
        pretty_assertions::assert_eq!(panel.count.as_str(), $count, "results count diverged");
    }};
}
