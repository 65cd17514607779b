//! Domain layer - layers, configuration model, path resolution.
//!
//! This layer is pure: it never touches the filesystem or spawns processes.

pub mod config;
pub mod error;
pub mod layer;
pub mod paths;
pub mod task;

pub use config::{ColorScheme, Configuration, OutputStyle, ProcessorConfig, SassOptions};
pub use error::{AppError, Result, Stage};
pub use layer::{Layer, LayerSelector};
pub use paths::{resolve_path, PathKind, ResolvedPath};
pub use task::TaskName;
