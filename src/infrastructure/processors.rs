//! External processor seams.
//!
//! Each collaborator the tasks drive sits behind a small trait so tasks can
//! be exercised with fakes and the real tools can be swapped through
//! configuration.

use std::io;
use std::path::Path;

use serde::Serialize;

use crate::domain::{ProcessorConfig, Result, SassOptions};

use super::checker::{CommandCheck, CommandPrefixer};
use super::remover::FsRemover;
use super::sass::GrassCompiler;

/// Outcome of a validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Whether the validator accepted the input.
    pub passed: bool,
    /// Messages reported by the validator, one per line.
    pub messages: Vec<String>,
}

impl Diagnostics {
    /// Diagnostics for a clean run.
    #[cfg(test)]
    #[must_use]
    pub const fn passed() -> Self {
        Self {
            passed: true,
            messages: Vec::new(),
        }
    }

    /// Diagnostics for a rejected input.
    #[must_use]
    pub const fn failed(messages: Vec<String>) -> Self {
        Self {
            passed: false,
            messages,
        }
    }
}

/// Checks an HTML document on disk.
pub trait HtmlValidator {
    /// Validate the HTML file at `path`.
    ///
    /// # Errors
    /// Returns a processor error if the validator could not run.
    fn validate_html(&self, path: &Path) -> Result<Diagnostics>;
}

/// Compiles a Sass entry point to CSS.
pub trait SassCompiler {
    /// Compile the file at `path`.
    ///
    /// # Errors
    /// Returns a processor error on compilation failure.
    fn compile(&self, path: &Path, options: SassOptions) -> Result<String>;
}

/// Adds vendor prefixes to CSS.
pub trait Prefixer {
    /// Prefix `css` for the given browser targets.
    ///
    /// # Errors
    /// Returns a processor error if the prefixer failed.
    fn prefix(&self, css: &str, browsers: &[String]) -> Result<String>;
}

/// Checks CSS conformance.
pub trait CssValidator {
    /// Validate `css`, which was read from `origin`.
    ///
    /// # Errors
    /// Returns a processor error if the validator could not run.
    fn validate_css(&self, css: &str, origin: &Path) -> Result<Diagnostics>;
}

/// Deletes a file or folder.
pub trait PathRemover {
    /// Remove `path`, recursively for folders.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Prefixer that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughPrefixer;

impl Prefixer for PassthroughPrefixer {
    fn prefix(&self, css: &str, _browsers: &[String]) -> Result<String> {
        Ok(css.to_string())
    }
}

/// The set of collaborators tasks run against.
pub struct Processors {
    pub html: Box<dyn HtmlValidator>,
    pub sass: Box<dyn SassCompiler>,
    pub prefixer: Box<dyn Prefixer>,
    pub css: Box<dyn CssValidator>,
    pub remover: Box<dyn PathRemover>,
}

impl Processors {
    /// Build the default collaborators from configuration.
    #[must_use]
    pub fn from_config(config: &ProcessorConfig) -> Self {
        let prefixer = CommandPrefixer::new(&config.prefixer).map_or_else(
            || -> Box<dyn Prefixer> {
                tracing::debug!("No prefixer command configured, CSS passes through unchanged");
                Box::new(PassthroughPrefixer)
            },
            |prefixer| -> Box<dyn Prefixer> { Box::new(prefixer) },
        );

        Self {
            html: Box::new(CommandCheck::new(config.html_validator.clone())),
            sass: Box::new(GrassCompiler),
            prefixer,
            css: Box::new(CommandCheck::new(config.css_validator.clone())),
            remover: Box::new(FsRemover),
        }
    }
}
