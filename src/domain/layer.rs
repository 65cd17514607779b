//! Project layers and the selector that tracks the active one.

use std::fmt;

/// One of the project's top-level asset domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layer {
    /// Public-facing content views and styles.
    Content,
    /// Settings views and styles.
    Settings,
    /// Declared in configuration but without any asset paths.
    Backend,
    /// No layer has been selected yet.
    #[default]
    Unset,
}

impl Layer {
    /// Every layer value, including the ones without mappings.
    pub const ALL: [Self; 4] = [Self::Content, Self::Settings, Self::Backend, Self::Unset];

    /// Short lowercase name, used in report file names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Settings => "settings",
            Self::Backend => "backend",
            Self::Unset => "unset",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Holds the layer selected for the current invocation.
///
/// Starts out `Unset` and keeps whatever was set last; nothing resets it.
#[derive(Debug, Clone, Default)]
pub struct LayerSelector {
    active: Layer,
}

impl LayerSelector {
    /// Create a selector with no layer set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: Layer::Unset,
        }
    }

    /// Overwrite the active layer.
    pub fn set_layer(&mut self, layer: Layer) {
        tracing::debug!(%layer, "Active layer set");
        self.active = layer;
    }

    /// Currently active layer.
    #[must_use]
    pub const fn active_layer(&self) -> Layer {
        self.active
    }
}
