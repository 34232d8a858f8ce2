//! orgdir-core: organization directory core library.
//!
//! This crate holds everything that does not depend on a terminal: the page
//! markup contract, the search/filter engine, the session stub, overlays and
//! configuration.
//!
//! # Architecture
//!
//! ```text
//! Catalog ──► PageMarkup ──► SearchFilterEngine ──► PageView
//!                                  ▲                   │
//!             input events ────────┘                   ▼
//!                                          hidden flags, chips, results
//! ```
//!
//! The engine is driven synchronously from the UI event loop; every mutation
//! re-derives the whole view before the next event is handled.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod markup;
pub mod matcher;
pub mod overlay;
pub mod render;
pub mod session;
pub mod state;
pub mod types;
pub mod view;

pub use catalog::{Access, Catalog, Page};
pub use engine::SearchFilterEngine;
pub use error::{Anchor, CatalogError, EngineError, SessionError};
pub use markup::{Anchors, EntryMarkup, FilterControl, PageMarkup};
pub use overlay::{DetailPanel, Layer, OverlayStack};
pub use render::{format_result_count, render_card, DetailAttrs, ResultCard, ResultsPanel};
pub use session::{Session, SessionStore};
pub use state::EngineState;
pub use types::{Entry, FilterChip, FilterGroupDefinition, FilterKey, FilterOption};
pub use view::{MemoryView, PageView};
