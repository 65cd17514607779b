//! Sass compilation using the grass crate.
//!
//! grass targets dart-sass, which always emits numbers with ten decimal
//! places; other precision values are accepted but cannot be honored.

use std::path::Path;

use crate::domain::{AppError, OutputStyle, Result, SassOptions, Stage};

use super::processors::SassCompiler;

const GRASS_PRECISION: u8 = 10;

/// Compiles Sass with grass.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrassCompiler;

impl SassCompiler for GrassCompiler {
    fn compile(&self, path: &Path, options: SassOptions) -> Result<String> {
        if options.precision != GRASS_PRECISION {
            tracing::warn!(
                requested = options.precision,
                used = GRASS_PRECISION,
                "Sass precision is fixed by the compiler"
            );
        }

        let style = match options.output_style {
            OutputStyle::Expanded => grass::OutputStyle::Expanded,
            OutputStyle::Compressed => grass::OutputStyle::Compressed,
        };

        let mut grass_options = grass::Options::default().style(style);
        if let Some(parent) = path.parent() {
            grass_options = grass_options.load_path(parent);
        }

        tracing::debug!(path = %path.display(), "Compiling Sass");

        grass::from_path(path, &grass_options)
            .map_err(|e| AppError::processor(Stage::Sass, e.to_string()))
    }
}
