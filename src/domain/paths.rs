//! Path resolution.
//!
//! Turns (artifact kind, layer, configuration) into a concrete path by
//! concatenating configured names. Folder names carry their own trailing
//! `/`, so no separator is inserted here.

use std::fmt;
use std::path::Path;

use super::config::Configuration;
use super::error::UnresolvedLayerError;
use super::layer::Layer;

/// Artifact a task needs a path for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    /// Main HTML view, input of `validateHTML`.
    HtmlView,
    /// Sass entry point, input of `compileCSS`.
    SassSource,
    /// Folder `compileCSS` writes into.
    CssTargetFolder,
    /// Compiled stylesheet: written by `compileCSS`, read by `validateCSS`.
    CssOutputFile,
}

impl PathKind {
    pub const ALL: [Self; 4] = [
        Self::HtmlView,
        Self::SassSource,
        Self::CssTargetFolder,
        Self::CssOutputFile,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HtmlView => "HTML view",
            Self::SassSource => "Sass source",
            Self::CssTargetFolder => "CSS target folder",
            Self::CssOutputFile => "CSS output file",
        }
    }
}

/// A path computed from configuration. Never stored, always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedPath(String);

impl ResolvedPath {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for ResolvedPath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

/// Resolve the path of `kind` for `layer`.
///
/// # Errors
/// Returns `UnresolvedLayerError` for `Unset` and `Backend`.
pub fn resolve_path(
    kind: PathKind,
    layer: Layer,
    config: &Configuration,
) -> Result<ResolvedPath, UnresolvedLayerError> {
    let (folder, files) = config
        .layer_files(layer)
        .ok_or(UnresolvedLayerError { layer })?;

    let file = match kind {
        PathKind::HtmlView => files.views.main.as_str(),
        PathKind::SassSource => files.styles.source.as_str(),
        PathKind::CssTargetFolder => "",
        PathKind::CssOutputFile => files.styles.target.as_str(),
    };

    Ok(ResolvedPath(format!(
        "{}{}{}",
        config.folders.development, folder, file
    )))
}
