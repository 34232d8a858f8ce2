//! Static pages and catalogs used across harnesses.

use crate::common::builders::{EntryBuilder, PageBuilder};

/// The campus directory used by most engine tests: six organizations over
/// three filter groups.
pub fn campus_page() -> PageBuilder {
    PageBuilder::new()
        .filter("category", "academic", "Academic")
        .filter("category", "social", "Social")
        .filter("category", "sports", "Sports & Recreation")
        .filter("category", "arts", "Arts")
        .filter("size", "small", "Small")
        .filter("size", "large", "Large")
        .filter("meeting", "weekly", "Weekly")
        .filter("meeting", "monthly", "Monthly")
        .entry(
            EntryBuilder::new("Chess Club")
                .search("chess club strategy games")
                .tags(&["Strategy", "Games"])
                .group("category", "academic, social")
                .group("size", "small")
                .group("meeting", "weekly")
                .build(),
        )
        .entry(
            EntryBuilder::new("Surf Team")
                .search("surf team ocean competitive")
                .tags(&["Ocean"])
                .group("category", "sports")
                .group("size", "large")
                .group("meeting", "weekly")
                .build(),
        )
        .entry(
            EntryBuilder::new("Robotics Society")
                .search("robotics society engineering club")
                .group("category", "academic")
                .group("size", "large")
                .group("meeting", "weekly")
                .build(),
        )
        .entry(
            EntryBuilder::new("Film Collective")
                .search("film collective screenings")
                .group("category", "arts, social")
                .group("size", "small")
                .group("meeting", "monthly")
                .build(),
        )
        .entry(
            EntryBuilder::new("Climbing Club")
                .search("climbing club bouldering")
                .group("category", "sports, social")
                .group("size", "small")
                .build(),
        )
        .entry(
            EntryBuilder::new("Quiet Readers")
                .description("Book circle without a category")
                .build(),
        )
}

pub const CAMPUS_TITLES: &[&str] = &[
    "Chess Club",
    "Surf Team",
    "Robotics Society",
    "Film Collective",
    "Climbing Club",
    "Quiet Readers",
];

/// A two-page catalog in TOML, one public searchable page and one private.
pub const CATALOG_TOML: &str = r#"
[[pages]]
name = "explore"
title = "Explore"

[pages.anchors]
search_box = true
search_button = true
chip_bar = true
results_panel = true

[[pages.filters]]
group = "category"
value = "academic"
label = "Academic"

[[pages.entries]]
title = "Chess Club"
tags = ["Strategy"]
search = "chess club strategy"
[pages.entries.groups]
category = "academic"

[[pages.entries]]
title = "Surf Team"
search = "surf team ocean"

[[pages]]
name = "mine"
title = "Mine"
private = true
auth_link = true
"#;

/// The same catalog as [`CATALOG_TOML`], in YAML.
pub const CATALOG_YAML: &str = r#"
pages:
  - name: explore
    title: Explore
    anchors:
      search_box: true
      search_button: true
      chip_bar: true
      results_panel: true
    filters:
      - group: category
        value: academic
        label: Academic
    entries:
      - title: Chess Club
        tags: [Strategy]
        search: chess club strategy
        groups:
          category: academic
      - title: Surf Team
        search: surf team ocean
  - name: mine
    title: Mine
    private: true
    auth_link: true
"#;

/// The same catalog as [`CATALOG_TOML`], in JSON.
pub const CATALOG_JSON: &str = r#"{
  "pages": [
    {
      "name": "explore",
      "title": "Explore",
      "anchors": { "search_box": true, "search_button": true, "chip_bar": true, "results_panel": true },
      "filters": [{ "group": "category", "value": "academic", "label": "Academic" }],
      "entries": [
        { "title": "Chess Club", "tags": ["Strategy"], "search": "chess club strategy", "groups": { "category": "academic" } },
        { "title": "Surf Team", "search": "surf team ocean" }
      ]
    },
    { "name": "mine", "title": "Mine", "private": true, "auth_link": true }
  ]
}"#;
