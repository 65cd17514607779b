//! Configuration file management.
//!
//! Handles loading configuration documents in JSON or TOML, picked by the
//! file extension, and writing the default document.

use std::fs;
use std::path::Path;

use crate::domain::{AppError, Configuration, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"{
    "colors": {
        "red": "red",
        "green": "green",
        "yellow": "yellow",
        "default": "normal"
    },
    "folders": {
        "development": "development/",
        "validator_results": "validator-results/",
        "layers": {
            "content": "content-layer/",
            "settings": "settings-layer/",
            "backend": "backend-layer/"
        }
    },
    "content_layer": {
        "views": { "main": "index.html" },
        "styles": { "source": "main.scss", "target": "main.css" }
    },
    "settings_layer": {
        "views": { "main": "index.html" },
        "styles": { "source": "main.scss", "target": "main.css" }
    },
    "processors": {
        "html_validator": ["vnu", "--errors-only"],
        "css_validator": ["vnu", "--errors-only", "--css"],
        "prefixer": ["npx", "postcss", "--use", "autoprefixer"],
        "browsers": ["last 2 versions"],
        "sass": { "output_style": "expanded", "precision": 10 }
    }
}
"#;

/// Supported configuration formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Load configuration from file, or the built-in default if it is missing.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<Configuration> {
    if path.exists() {
        load_config_from_file(path)
    } else {
        tracing::warn!(
            path = %path.display(),
            "Configuration file not found, using built-in defaults"
        );
        Ok(Configuration::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<Configuration> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    let config = match ConfigFormat::of(path) {
        ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| AppError::Config {
            message: format!("Failed to parse config file {}: {e}", path.display()),
        })?,
        ConfigFormat::Toml => toml::from_str(&content).map_err(|e| AppError::Config {
            message: format!("Failed to parse config file {}: {e}", path.display()),
        })?,
    };

    tracing::debug!(path = %path.display(), "Configuration loaded");

    Ok(config)
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns `true` when a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    let content = match ConfigFormat::of(path) {
        ConfigFormat::Json => DEFAULT_CONFIG.to_string(),
        ConfigFormat::Toml => {
            toml::to_string_pretty(&Configuration::default()).map_err(|e| AppError::Config {
                message: format!("Failed to serialize config: {e}"),
            })?
        }
    };

    fs::write(path, content).map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}
