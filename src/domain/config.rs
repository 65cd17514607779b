//! Configuration model.
//!
//! Mirrors the on-disk configuration document: folder layout, per-layer file
//! names, terminal colors, and external processor settings. Loaded once and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};

use super::layer::Layer;

/// Complete configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Terminal colors used for reports.
    #[serde(default)]
    pub colors: ColorScheme,

    /// Folder layout.
    pub folders: Folders,

    /// Files belonging to the content layer.
    pub content_layer: LayerFiles,

    /// Files belonging to the settings layer.
    pub settings_layer: LayerFiles,

    /// External processor settings.
    #[serde(default)]
    pub processors: ProcessorConfig,
}

impl Configuration {
    /// Folder name and file set for a layer that owns assets.
    ///
    /// `Backend` is declared in the folder layout but has no files, so it
    /// answers `None` just like `Unset`.
    #[must_use]
    pub fn layer_files(&self, layer: Layer) -> Option<(&str, &LayerFiles)> {
        match layer {
            Layer::Content => Some((self.folders.layers.content.as_str(), &self.content_layer)),
            Layer::Settings => Some((self.folders.layers.settings.as_str(), &self.settings_layer)),
            Layer::Backend | Layer::Unset => None,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let layer_files = LayerFiles {
            views: Views {
                main: "index.html".into(),
            },
            styles: Styles {
                source: "main.scss".into(),
                target: "main.css".into(),
            },
        };

        Self {
            colors: ColorScheme::default(),
            folders: Folders {
                development: "development/".into(),
                validator_results: "validator-results/".into(),
                layers: LayerFolders {
                    content: "content-layer/".into(),
                    settings: "settings-layer/".into(),
                    backend: "backend-layer/".into(),
                },
            },
            content_layer: layer_files.clone(),
            settings_layer: layer_files,
            processors: ProcessorConfig::default(),
        }
    }
}

/// Color names for terminal output.
///
/// Values are color names such as `red` or `bright green`; `normal` and
/// `default` leave text uncolored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Used for errors and guidance.
    #[serde(default = "default_red")]
    pub red: String,

    /// Used for successful steps.
    #[serde(default = "default_green")]
    pub green: String,

    /// Used for warnings and absent artifacts.
    #[serde(default = "default_yellow")]
    pub yellow: String,

    /// Used for plain text.
    #[serde(default = "default_plain")]
    pub default: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            red: default_red(),
            green: default_green(),
            yellow: default_yellow(),
            default: default_plain(),
        }
    }
}

fn default_red() -> String {
    "red".into()
}

fn default_green() -> String {
    "green".into()
}

fn default_yellow() -> String {
    "yellow".into()
}

fn default_plain() -> String {
    "normal".into()
}

/// Folder layout. Every folder name carries its trailing `/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folders {
    /// Root of the development tree.
    pub development: String,

    /// Where CSS validation reports are written.
    pub validator_results: String,

    /// Per-layer subfolders under `development`.
    pub layers: LayerFolders,
}

/// Per-layer subfolder names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFolders {
    pub content: String,
    pub settings: String,
    pub backend: String,
}

/// View and stylesheet names for one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerFiles {
    pub views: Views,
    pub styles: Styles,
}

/// HTML views of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Views {
    /// Main HTML file.
    pub main: String,
}

/// Stylesheets of a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Styles {
    /// Sass entry point.
    pub source: String,
    /// Compiled CSS file name.
    pub target: String,
}

/// Settings for the external processors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// HTML checker command; the HTML path is appended.
    #[serde(default = "default_html_validator")]
    pub html_validator: Vec<String>,

    /// CSS checker command; `-` is appended and CSS is fed on stdin.
    #[serde(default = "default_css_validator")]
    pub css_validator: Vec<String>,

    /// Prefixer command reading CSS on stdin. Empty means pass-through.
    #[serde(default = "default_prefixer")]
    pub prefixer: Vec<String>,

    /// Browser targets handed to the prefixer.
    #[serde(default = "default_browsers")]
    pub browsers: Vec<String>,

    /// Sass compiler options.
    #[serde(default)]
    pub sass: SassOptions,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            html_validator: default_html_validator(),
            css_validator: default_css_validator(),
            prefixer: default_prefixer(),
            browsers: default_browsers(),
            sass: SassOptions::default(),
        }
    }
}

fn default_html_validator() -> Vec<String> {
    vec!["vnu".into(), "--errors-only".into()]
}

fn default_css_validator() -> Vec<String> {
    vec!["vnu".into(), "--errors-only".into(), "--css".into()]
}

fn default_prefixer() -> Vec<String> {
    vec![
        "npx".into(),
        "postcss".into(),
        "--use".into(),
        "autoprefixer".into(),
    ]
}

fn default_browsers() -> Vec<String> {
    vec!["last 2 versions".into()]
}

/// CSS output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// One declaration per line.
    #[default]
    Expanded,
    /// Minified.
    Compressed,
}

/// Options handed to the Sass compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SassOptions {
    #[serde(default)]
    pub output_style: OutputStyle,

    /// Decimal places kept in numeric output.
    #[serde(default = "default_precision")]
    pub precision: u8,
}

impl Default for SassOptions {
    fn default() -> Self {
        Self {
            output_style: OutputStyle::Expanded,
            precision: default_precision(),
        }
    }
}

const fn default_precision() -> u8 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Configuration::default();
        assert_eq!(config.folders.development, "development/");
        assert_eq!(config.folders.layers.content, "content-layer/");
        assert_eq!(config.processors.sass.precision, 10);
        assert_eq!(config.processors.sass.output_style, OutputStyle::Expanded);
        assert_eq!(config.processors.browsers, vec!["last 2 versions"]);
    }

    #[test]
    fn test_layer_files_only_for_asset_layers() {
        let config = Configuration::default();

        let (folder, _) = config.layer_files(Layer::Content).unwrap();
        assert_eq!(folder, "content-layer/");
        let (folder, _) = config.layer_files(Layer::Settings).unwrap();
        assert_eq!(folder, "settings-layer/");

        assert!(config.layer_files(Layer::Backend).is_none());
        assert!(config.layer_files(Layer::Unset).is_none());
    }

    #[test]
    fn test_optional_sections_default() {
        let json = r#"{
            "folders": {
                "development": "dev/",
                "validator_results": "results/",
                "layers": { "content": "c/", "settings": "s/", "backend": "b/" }
            },
            "content_layer": { "views": { "main": "a.html" }, "styles": { "source": "a.scss", "target": "a.css" } },
            "settings_layer": { "views": { "main": "b.html" }, "styles": { "source": "b.scss", "target": "b.css" } },
            "colors": { "red": "bright red" }
        }"#;

        let config: Configuration = serde_json::from_str(json).unwrap();
        assert_eq!(config.colors.red, "bright red");
        assert_eq!(config.colors.green, "green");
        assert_eq!(config.processors, ProcessorConfig::default());
    }
}
