//! Task names and their prerequisites.

use std::fmt;
use std::str::FromStr;

use super::layer::Layer;

/// A named unit of work the runner can sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskName {
    SetLayerToContent,
    SetLayerToSettings,
    SetLayerToBackend,
    ValidateHtml,
    CompileCss,
    ValidateCss,
    Clean,
    ShowPaths,
}

impl TaskName {
    pub const ALL: [Self; 8] = [
        Self::SetLayerToContent,
        Self::SetLayerToSettings,
        Self::SetLayerToBackend,
        Self::ValidateHtml,
        Self::CompileCss,
        Self::ValidateCss,
        Self::Clean,
        Self::ShowPaths,
    ];

    /// Name as typed on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SetLayerToContent => "setLayerToContent",
            Self::SetLayerToSettings => "setLayerToSettings",
            Self::SetLayerToBackend => "setLayerToBackend",
            Self::ValidateHtml => "validateHTML",
            Self::CompileCss => "compileCSS",
            Self::ValidateCss => "validateCSS",
            Self::Clean => "clean",
            Self::ShowPaths => "showPaths",
        }
    }

    /// Tasks that must run first, in order.
    #[must_use]
    pub const fn prerequisites(self) -> &'static [Self] {
        match self {
            Self::ValidateCss => &[Self::CompileCss],
            _ => &[],
        }
    }

    /// Layer this task selects, if it is a layer-setting task.
    #[must_use]
    pub const fn selected_layer(self) -> Option<Layer> {
        match self {
            Self::SetLayerToContent => Some(Layer::Content),
            Self::SetLayerToSettings => Some(Layer::Settings),
            Self::SetLayerToBackend => Some(Layer::Backend),
            _ => None,
        }
    }

    /// Whether the task reads the active layer.
    #[must_use]
    pub const fn uses_layer(self) -> bool {
        matches!(self, Self::ValidateHtml | Self::CompileCss | Self::ValidateCss)
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown task: {s}. Use: {}", known.join(", "))
            })
    }
}
