//! Headless mode: run one search against a catalog page and print the result.
//!
//! The search goes through the same [`SearchFilterEngine`] the TUI uses, so
//! the output is exactly what the results pane would show: the results panel
//! (count line plus cards) when the page has one and a search is active,
//! otherwise only the page's cards that survived filtering in place.

use std::io::Write;

use anyhow::{anyhow, Context};
use orgdir_core::{
    render_card, Catalog, FilterKey, MemoryView, Page, ResultCard, SearchFilterEngine,
};

const EMPTY_MESSAGE: &str = "No organizations match your search.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
}

/// One headless search.
#[derive(Debug, Clone, Default)]
pub struct HeadlessRequest {
    /// Route name; defaults to the first searchable page.
    pub page: Option<String>,
    pub query: Option<String>,
    pub filters: Vec<FilterKey>,
    pub format: OutputFormat,
}

/// Outcome of a headless search, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutput {
    /// Results-panel count line; `None` while the panel is hidden.
    pub count: Option<String>,
    pub cards: Vec<ResultCard>,
}

/// Run `request` against `catalog`.
///
/// # Errors
///
/// Fails when the page does not exist, has no search anchors, or a filter
/// names a group/value the page does not declare.
pub fn search(catalog: &Catalog, request: &HeadlessRequest) -> anyhow::Result<SearchOutput> {
    let page = select_page(catalog, request.page.as_deref())?;
    let view = MemoryView::new(page.markup.entries.len());
    let mut engine = SearchFilterEngine::try_init(&page.markup, view)
        .with_context(|| format!("page `{}` cannot be searched", page.name))?;

    for key in &request.filters {
        engine
            .toggle_filter_value(&key.group, &key.value, true)
            .with_context(|| format!("page `{}`", page.name))?;
    }
    engine.set_keyword(request.query.as_deref().unwrap_or(""));

    let panel = engine.view().results();
    let output = if panel.hidden {
        SearchOutput {
            count: None,
            cards: engine.visible_entries().into_iter().map(render_card).collect(),
        }
    } else {
        SearchOutput {
            count: Some(panel.count.clone()),
            cards: panel.cards.clone(),
        }
    };
    tracing::debug!(
        page = %page.name,
        results = output.cards.len(),
        panel = output.count.is_some(),
        "headless search done"
    );
    Ok(output)
}

/// Run `request` and write the formatted result to `out`.
pub fn run(catalog: &Catalog, request: &HeadlessRequest, out: &mut impl Write) -> anyhow::Result<()> {
    let output = search(catalog, request)?;
    let rendered = match request.format {
        OutputFormat::Text => render_text(&output),
        OutputFormat::Html => render_html(&output),
    };
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

fn select_page<'a>(catalog: &'a Catalog, name: Option<&str>) -> anyhow::Result<&'a Page> {
    match name {
        Some(name) => catalog
            .page(name)
            .ok_or_else(|| anyhow!("no page named `{name}` in catalog")),
        None => catalog
            .pages
            .iter()
            .find(|p| p.markup.anchors.search_box && p.markup.anchors.search_button)
            .ok_or_else(|| anyhow!("catalog has no searchable page")),
    }
}

pub fn render_text(output: &SearchOutput) -> String {
    let mut text = String::new();
    if let Some(count) = &output.count {
        text.push_str(count);
        text.push('\n');
    }
    if output.cards.is_empty() {
        text.push_str(EMPTY_MESSAGE);
        text.push('\n');
        return text;
    }
    for card in &output.cards {
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(&card.title);
        text.push('\n');
        if !card.description.is_empty() {
            text.push_str(&format!("  {}\n", card.description));
        }
        if !card.tags.is_empty() {
            let tags: Vec<String> = card.tags.iter().map(|t| format!("#{t}")).collect();
            text.push_str(&format!("  {}\n", tags.join(" ")));
        }
    }
    text
}

pub fn render_html(output: &SearchOutput) -> String {
    let mut html = String::new();
    if let Some(count) = &output.count {
        html.push_str(&format!(r#"<p class="results-count">{count}</p>"#));
        html.push('\n');
    }
    if output.cards.is_empty() {
        html.push_str(&format!(r#"<p class="empty-state">{EMPTY_MESSAGE}</p>"#));
        html.push('\n');
    }
    for card in &output.cards {
        html.push_str(&card.to_html());
        html.push('\n');
    }
    html
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_core::format_result_count;
    use pretty_assertions::assert_eq;

    fn titles(output: &SearchOutput) -> Vec<&str> {
        output.cards.iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn default_page_is_first_searchable() {
        let output = search(&Catalog::demo(), &HeadlessRequest::default()).unwrap();
        // Nothing active: every explore card, no results panel.
        assert_eq!(output.cards.len(), 8);
        assert_eq!(output.count, None);
    }

    #[test]
    fn keyword_and_filters_combine() {
        let request = HeadlessRequest {
            query: Some("Club".to_string()),
            filters: vec![FilterKey::new("category", "social")],
            ..Default::default()
        };
        let output = search(&Catalog::demo(), &request).unwrap();
        assert_eq!(titles(&output), ["Chess Club", "Climbing Club"]);
        assert_eq!(output.count.as_deref(), Some("2 results"));
    }

    #[test]
    fn unknown_filter_is_an_error() {
        let request = HeadlessRequest {
            filters: vec![FilterKey::new("category", "knitting")],
            ..Default::default()
        };
        let err = search(&Catalog::demo(), &request).unwrap_err();
        assert!(format!("{err:#}").contains("unknown filter category:knitting"));
    }

    #[test]
    fn page_without_search_is_an_error() {
        let request = HeadlessRequest {
            page: Some("home".to_string()),
            ..Default::default()
        };
        assert!(search(&Catalog::demo(), &request).is_err());
    }

    #[test]
    fn text_output_for_no_matches() {
        let output = SearchOutput {
            count: Some(format_result_count(0)),
            cards: Vec::new(),
        };
        insta::assert_snapshot!(render_text(&output), @r"
        0 results
        No organizations match your search.
        ");
    }

    #[test]
    fn text_output_lists_cards() {
        let request = HeadlessRequest {
            query: Some("surf".to_string()),
            ..Default::default()
        };
        let output = search(&Catalog::demo(), &request).unwrap();
        insta::assert_snapshot!(render_text(&output), @r"
        1 result

        Surf Team
          Dawn patrol sessions, competitive heats and beginner lessons.
          #Ocean #Competitive
        ");
    }

    #[test]
    fn text_output_without_active_search_has_no_count_line() {
        let output = search(&Catalog::demo(), &HeadlessRequest::default()).unwrap();
        let text = render_text(&output);
        assert!(text.starts_with("Chess Club\n"), "got: {text}");
        assert!(!text.contains("results"));
        assert!(!render_html(&output).contains("results-count"));
    }

    #[test]
    fn html_output_has_count_and_cards() {
        let request = HeadlessRequest {
            query: Some("chess".to_string()),
            format: OutputFormat::Html,
            ..Default::default()
        };
        let output = search(&Catalog::demo(), &request).unwrap();
        let html = render_html(&output);
        assert!(html.starts_with(r#"<p class="results-count">1 result</p>"#));
        assert!(html.contains(r#"data-org="Chess Club""#));
        assert_eq!(html.lines().count(), 2);
    }
}
