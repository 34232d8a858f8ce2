//! Catalog loading integration harness.
//!
//! # What this covers
//!
//! - **Formats**: the same directory written as TOML, YAML and JSON loads to
//!   the same pages, with the format picked from the file extension.
//! - **Errors**: a missing file, an unparsable file and a catalog with no
//!   pages each produce their own [`CatalogError`] variant.
//! - **Access**: private pages redirect signed-out visitors to the login form;
//!   `auth_link` pages are hidden from signed-out navigation.
//! - **Demo catalog**: the embedded sample directory has a searchable page.
//!
//! # Running
//!
//! ```sh
//! cargo test --test catalog_harness
//! ```

mod common;

use std::path::PathBuf;

use common::*;
use orgdir_core::{Access, Catalog, CatalogError, MemoryView, SearchFilterEngine};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn write_catalog(dir: &tempfile::TempDir, file: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, contents).unwrap();
    path
}

#[rstest]
#[case::toml("catalog.toml", CATALOG_TOML)]
#[case::yaml("catalog.yaml", CATALOG_YAML)]
#[case::json("catalog.json", CATALOG_JSON)]
fn loads_every_supported_format(#[case] file: &str, #[case] contents: &str) {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::load(&write_catalog(&dir, file, contents)).unwrap();

    let names: Vec<&str> = catalog.pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["explore", "mine"]);

    let explore = catalog.page("explore").unwrap();
    assert!(explore.markup.anchors.search_box);
    assert_eq!(explore.markup.entries.len(), 2);
    assert_eq!(explore.markup.entries[0].tags, vec!["Strategy".to_string()]);
    assert_eq!(
        explore.markup.entries[0].groups.get("category").map(String::as_str),
        Some("academic")
    );
}

#[test]
fn loaded_page_drives_an_engine() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::load(&write_catalog(&dir, "catalog.toml", CATALOG_TOML)).unwrap();
    let page = &catalog.page("explore").unwrap().markup;

    let mut engine = SearchFilterEngine::try_init(page, MemoryView::new(page.entries.len())).unwrap();
    engine.toggle_filter_value("category", "academic", true).unwrap();
    engine.set_keyword("");

    assert_visible!(engine, ["Chess Club"]);
    assert_chips!(engine, ["Academic"]);
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    match Catalog::load(&path) {
        Err(CatalogError::NotFound(p)) => assert_eq!(p, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn malformed_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_catalog(&dir, "catalog.toml", "[[pages]\nname = ");
    assert!(matches!(Catalog::load(&path), Err(CatalogError::Config(_))));
}

#[test]
fn empty_catalog_has_no_pages() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_catalog(&dir, "catalog.json", r#"{ "pages": [] }"#);
    assert!(matches!(Catalog::load(&path), Err(CatalogError::NoPages)));
}

#[test]
fn private_pages_gate_on_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::load(&write_catalog(&dir, "catalog.toml", CATALOG_TOML)).unwrap();
    let mine = catalog.page("mine").unwrap();
    let explore = catalog.page("explore").unwrap();

    assert_eq!(mine.access(false), Access::RedirectToLogin);
    assert_eq!(mine.access(true), Access::Granted);
    assert_eq!(explore.access(false), Access::Granted);

    assert!(!mine.is_listed(false));
    assert!(mine.is_listed(true));
    assert_eq!(catalog.private_landing().map(|p| p.name.as_str()), Some("mine"));
}

#[test]
fn demo_catalog_has_a_searchable_page() {
    let catalog = Catalog::demo();
    let searchable = catalog
        .pages
        .iter()
        .find(|p| p.markup.anchors.search_box && p.markup.anchors.search_button)
        .expect("demo should have a searchable page");
    let page = &searchable.markup;
    assert!(SearchFilterEngine::try_init(page, MemoryView::new(page.entries.len())).is_ok());
}
