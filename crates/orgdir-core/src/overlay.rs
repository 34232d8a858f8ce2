//! Overlay layers (detail panel, login form, help) and the detail panel data.

use crate::render::DetailAttrs;

const FALLBACK_ORG: &str = "Student Organization";

/// A layer that can be opened over the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Detail,
    Login,
    Help,
}

/// Open layers, last opened on top. A layer is open at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayStack {
    layers: Vec<Layer>,
}

impl OverlayStack {
    /// Open `layer`, moving it to the top if it is already open.
    pub fn open(&mut self, layer: Layer) {
        self.layers.retain(|l| *l != layer);
        self.layers.push(layer);
        tracing::debug!(?layer, "overlay opened");
    }

    pub fn close(&mut self, layer: Layer) {
        self.layers.retain(|l| *l != layer);
        tracing::debug!(?layer, "overlay closed");
    }

    /// Close and return the top layer.
    pub fn close_top(&mut self) -> Option<Layer> {
        let top = self.layers.pop();
        if let Some(layer) = top {
            tracing::debug!(?layer, "overlay closed");
        }
        top
    }

    pub fn top(&self) -> Option<Layer> {
        self.layers.last().copied()
    }

    pub fn is_open(&self, layer: Layer) -> bool {
        self.layers.contains(&layer)
    }

    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers.iter().copied()
    }
}

/// Content of the detail panel, read from a card's detail attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPanel {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl DetailPanel {
    pub fn from_attrs(attrs: &DetailAttrs) -> Self {
        let title = if attrs.org.trim().is_empty() {
            FALLBACK_ORG.to_string()
        } else {
            attrs.org.clone()
        };
        let tags = if attrs.tags.is_empty() {
            Vec::new()
        } else {
            attrs.tags.split(',').map(|t| t.trim().to_string()).collect()
        };
        Self {
            title,
            body: attrs.description.clone(),
            tags,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
