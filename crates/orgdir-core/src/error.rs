use std::path::PathBuf;

use thiserror::Error;

/// Page elements the search engine cannot run without.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    SearchBox,
    SearchButton,
    Entries,
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anchor::SearchBox => write!(f, "search box"),
            Anchor::SearchButton => write!(f, "search button"),
            Anchor::Entries => write!(f, "entry cards"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("search unavailable: missing {0}")]
    MissingAnchor(Anchor),

    #[error("unknown filter {group}:{value}")]
    UnknownFilterReference { group: String, value: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("catalog not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid catalog")]
    Config(#[from] config::ConfigError),

    #[error("catalog defines no pages")]
    NoPages,
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Please provide both your name and email.")]
    MissingCredentials,

    #[error("session store IO error at {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode session")]
    Encode(#[from] serde_json::Error),
}
