//! Domain-level error types for layer-runner.
//!
//! All errors are typed with `thiserror`. External processor failures share a
//! single variant so every stage is reported the same way.

use std::fmt;

use thiserror::Error;

use super::layer::Layer;

/// External processor stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// HTML validation.
    HtmlValidator,
    /// Sass-to-CSS compilation.
    Sass,
    /// Vendor prefixing.
    Prefixer,
    /// CSS validation.
    CssValidator,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HtmlValidator => write!(f, "HTML validator"),
            Self::Sass => write!(f, "Sass compiler"),
            Self::Prefixer => write!(f, "prefixer"),
            Self::CssValidator => write!(f, "CSS validator"),
        }
    }
}

/// The active layer has no path mappings.
///
/// Raised for both `Unset` and `Backend`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no paths are mapped for the {layer} layer")]
pub struct UnresolvedLayerError {
    /// Layer that was active when resolution was attempted.
    pub layer: Layer,
}

/// Application-level errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// A layer-dependent task ran without a usable layer.
    #[error(transparent)]
    UnresolvedLayer(#[from] UnresolvedLayerError),

    /// An external processor failed.
    #[error("{stage} failed: {message}")]
    Processor {
        stage: Stage,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization failed.
    #[error("JSON error: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// A task name given on the command line is not known.
    #[error("{message}")]
    InvalidTask { message: String },

    /// Configuration or environment error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO operation failed.
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// Create a processor error without an underlying source.
    pub fn processor(stage: Stage, message: impl Into<String>) -> Self {
        Self::Processor {
            stage,
            message: message.into(),
            source: None,
        }
    }

    /// Create a processor error wrapping the collaborator's own error.
    pub fn processor_with(
        stage: Stage,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processor {
            stage,
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Create a JSON error.
    pub fn json_parse(err: serde_json::Error) -> Self {
        Self::JsonParse {
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create an IO error with context.
    pub fn io(message: impl Into<String>, err: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(err),
        }
    }
}

/// Result type alias using `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_layer_message() {
        let err = UnresolvedLayerError {
            layer: Layer::Backend,
        };
        assert_eq!(err.to_string(), "no paths are mapped for the backend layer");

        let app: AppError = err.into();
        assert!(matches!(app, AppError::UnresolvedLayer(e) if e.layer == Layer::Backend));
    }

    #[test]
    fn test_invalid_task_is_not_a_config_error() {
        let err = AppError::InvalidTask {
            message: "Unknown task: validateJS. Use: clean".into(),
        };
        assert_eq!(err.to_string(), "Unknown task: validateJS. Use: clean");
    }

    #[test]
    fn test_processor_error_names_stage() {
        let err = AppError::processor(Stage::Sass, "expected \";\"");
        assert_eq!(err.to_string(), "Sass compiler failed: expected \";\"");
    }
}
