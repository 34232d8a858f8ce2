//! Site catalog: the pages of the directory and their markup.
//!
//! A catalog is a TOML, YAML or JSON file (format picked from the extension)
//! with one `[[pages]]` table per page. [`Catalog::demo`] returns the embedded
//! sample directory used when no `--catalog` is given.

use std::path::Path;

use config::{Config, File, FileFormat};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::markup::PageMarkup;

const DEMO_CATALOG_SRC: &str = include_str!("demo_catalog.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// One page of the site.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    /// Route name, e.g. `explore`.
    pub name: String,
    /// Tab label.
    pub title: String,
    /// Requires a signed-in session.
    #[serde(default)]
    pub private: bool,
    /// Only listed in navigation while signed in.
    #[serde(default)]
    pub auth_link: bool,
    #[serde(flatten)]
    pub markup: PageMarkup,
}

/// Outcome of navigating to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    RedirectToLogin,
}

impl Page {
    pub fn access(&self, authenticated: bool) -> Access {
        if self.private && !authenticated {
            Access::RedirectToLogin
        } else {
            Access::Granted
        }
    }

    /// Whether the page shows up in navigation for this session state.
    pub fn is_listed(&self, authenticated: bool) -> bool {
        !self.auth_link || authenticated
    }
}

impl Catalog {
    /// Load a catalog file.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] for a missing file, [`CatalogError::Config`]
    /// when it does not parse, [`CatalogError::NoPages`] when it is empty.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            return Err(CatalogError::NotFound(path.to_path_buf()));
        }
        let catalog: Self = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        catalog.validated()
    }

    /// Parse a catalog from a string in the given format.
    pub fn parse(src: &str, format: FileFormat) -> Result<Self, CatalogError> {
        let catalog: Self = Config::builder()
            .add_source(File::from_str(src, format))
            .build()?
            .try_deserialize()?;
        catalog.validated()
    }

    /// The embedded sample directory.
    ///
    /// # Panics
    ///
    /// Panics if the embedded TOML is malformed, which the unit tests rule out.
    pub fn demo() -> Self {
        Self::parse(DEMO_CATALOG_SRC, FileFormat::Toml)
            .expect("embedded demo catalog must be valid")
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }

    /// Where a successful login lands: the first private page, if any.
    pub fn private_landing(&self) -> Option<&Page> {
        self.pages.iter().find(|p| p.private)
    }

    fn validated(self) -> Result<Self, CatalogError> {
        if self.pages.is_empty() {
            return Err(CatalogError::NoPages);
        }
        Ok(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
