//! Human-readable task output.
//!
//! Everything tasks print goes through [`Reporter`], which writes colored
//! lines to any `Write` sink using the configured color names.

use std::io::Write;

use colored::{Color, Colorize};
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{
    resolve_path, AppError, ColorScheme, Configuration, Layer, PathKind, Result, TaskName,
};
use crate::infrastructure::Diagnostics;

/// Resolved color choices. `None` leaves text uncolored.
#[derive(Debug, Clone, Copy, Default)]
struct Palette {
    red: Option<Color>,
    green: Option<Color>,
    yellow: Option<Color>,
    plain: Option<Color>,
}

impl Palette {
    fn from_scheme(scheme: &ColorScheme) -> Self {
        Self {
            red: parse_color(&scheme.red),
            green: parse_color(&scheme.green),
            yellow: parse_color(&scheme.yellow),
            plain: parse_color(&scheme.default),
        }
    }
}

fn parse_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if name.is_empty() || name.eq_ignore_ascii_case("normal") || name.eq_ignore_ascii_case("default")
    {
        return None;
    }

    name.parse::<Color>().map_or_else(
        |()| {
            tracing::warn!(color = name, "Unknown color name, printing uncolored");
            None
        },
        Some,
    )
}

fn paint(text: &str, color: Option<Color>) -> String {
    color.map_or_else(|| text.to_string(), |c| text.color(c).to_string())
}

/// Writes task output to a sink.
pub struct Reporter<W: Write> {
    out: W,
    palette: Palette,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter using the configured colors.
    pub fn new(out: W, colors: &ColorScheme) -> Self {
        Self {
            out,
            palette: Palette::from_scheme(colors),
        }
    }

    /// Give back the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}").map_err(|e| AppError::io("Failed to write output", e))
    }

    /// Plain line.
    pub fn line(&mut self, text: &str) -> Result<()> {
        let text = paint(text, self.palette.plain);
        self.write(&text)
    }

    /// Success line.
    pub fn success(&mut self, text: &str) -> Result<()> {
        let text = paint(&format!("✓ {text}"), self.palette.green);
        self.write(&text)
    }

    /// Warning line.
    pub fn warn(&mut self, text: &str) -> Result<()> {
        let text = paint(text, self.palette.yellow);
        self.write(&text)
    }

    /// Error line.
    pub fn error(&mut self, text: &str) -> Result<()> {
        let text = paint(&format!("✗ {text}"), self.palette.red);
        self.write(&text)
    }

    /// Print the instructions shown when a task runs without a usable layer.
    pub fn layer_guidance(&mut self, task: TaskName, config: &Configuration) -> Result<()> {
        let text = paint(&format_layer_guidance(task, config), self.palette.red);
        write!(self.out, "{text}").map_err(|e| AppError::io("Failed to write output", e))
    }

    /// Print validator messages followed by a verdict for `subject`.
    pub fn diagnostics(&mut self, subject: &str, diagnostics: &Diagnostics) -> Result<()> {
        for message in &diagnostics.messages {
            self.line(&format!("  {message}"))?;
        }

        if diagnostics.passed {
            self.success(&format!("{subject} is valid"))
        } else {
            self.error(&format!(
                "{subject} has problems ({} message(s))",
                diagnostics.messages.len()
            ))
        }
    }
}

/// Multi-line instruction naming the layer-setting tasks to run first.
#[must_use]
pub fn format_layer_guidance(task: TaskName, config: &Configuration) -> String {
    let content = &config.content_layer;
    let action = match task {
        TaskName::CompileCss => format!("compile the {} file", content.styles.source),
        TaskName::ValidateCss => format!("validate the {} file", content.styles.target),
        _ => format!("validate the {} file", content.views.main),
    };
    let folder = config.folders.layers.content.trim_end_matches('/');

    format!(
        "\n\tThe layer in which you’re working has not been set. Precede this task\n\
         \twith either the {content_task} or the {settings_task} task to set\n\
         \tit. For example, to {action} in the {folder}\n\
         \tfolder, type\n\n\
         \t\t{bin} {content_task} {task}\n\n",
        content_task = TaskName::SetLayerToContent,
        settings_task = TaskName::SetLayerToSettings,
        bin = env!("CARGO_PKG_NAME"),
    )
}

/// Table of every resolved path for every layer.
#[must_use]
pub fn format_paths_table(config: &Configuration) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Layer".to_string()];
    header.extend(PathKind::ALL.iter().map(|k| k.label().to_string()));
    table.set_header(header);

    for layer in Layer::ALL {
        let mut row = vec![layer.to_string()];
        row.extend(PathKind::ALL.iter().map(|&kind| {
            resolve_path(kind, layer, config)
                .map_or_else(|_| "(unresolved)".to_string(), |p| p.to_string())
        }));
        table.add_row(row);
    }

    table.to_string()
}
