//! Command-backed processors.
//!
//! Validation and prefixing are delegated to external programs. Checkers
//! follow the Nu HTML Checker conventions: the document path is the last
//! argument, `-` reads from stdin, a non-zero exit status means the input
//! was rejected and the messages are on stderr.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::domain::{AppError, Result, Stage};

use super::processors::{CssValidator, Diagnostics, HtmlValidator, Prefixer};

/// Runs a checker command over a file or stdin.
#[derive(Debug, Clone)]
pub struct CommandCheck {
    command: Vec<String>,
}

impl CommandCheck {
    /// Create a checker from a program and its leading arguments.
    #[must_use]
    pub const fn new(command: Vec<String>) -> Self {
        Self { command }
    }

    fn build(&self, stage: Stage) -> Result<Command> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AppError::processor(stage, "no command configured"))?;

        let mut cmd = Command::new(program);
        cmd.args(args);
        Ok(cmd)
    }

    fn diagnostics(output: &Output) -> Diagnostics {
        let messages: Vec<String> = String::from_utf8_lossy(&output.stderr)
            .lines()
            .chain(String::from_utf8_lossy(&output.stdout).lines())
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();

        if output.status.success() {
            Diagnostics {
                passed: true,
                messages,
            }
        } else {
            Diagnostics::failed(messages)
        }
    }
}

impl HtmlValidator for CommandCheck {
    fn validate_html(&self, path: &Path) -> Result<Diagnostics> {
        let mut cmd = self.build(Stage::HtmlValidator)?;
        cmd.arg(path);

        tracing::debug!(command = ?self.command, path = %path.display(), "Running HTML checker");

        let output = cmd
            .output()
            .map_err(|e| AppError::processor_with(Stage::HtmlValidator, e))?;

        Ok(Self::diagnostics(&output))
    }
}

impl CssValidator for CommandCheck {
    fn validate_css(&self, css: &str, origin: &Path) -> Result<Diagnostics> {
        let mut cmd = self.build(Stage::CssValidator)?;
        cmd.arg("-");

        tracing::debug!(command = ?self.command, origin = %origin.display(), "Running CSS checker");

        let output = run_with_stdin(cmd, css, Stage::CssValidator)?;
        Ok(Self::diagnostics(&output))
    }
}

/// Prefixes CSS by piping it through a command.
///
/// Browser targets are passed in `BROWSERSLIST`.
#[derive(Debug, Clone)]
pub struct CommandPrefixer {
    command: Vec<String>,
}

impl CommandPrefixer {
    /// Create a prefixer, or `None` when the command list is empty.
    #[must_use]
    pub fn new(command: &[String]) -> Option<Self> {
        if command.is_empty() {
            None
        } else {
            Some(Self {
                command: command.to_vec(),
            })
        }
    }
}

impl Prefixer for CommandPrefixer {
    fn prefix(&self, css: &str, browsers: &[String]) -> Result<String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| AppError::processor(Stage::Prefixer, "no command configured"))?;

        let mut cmd = Command::new(program);
        cmd.args(args).env("BROWSERSLIST", browsers.join(", "));

        tracing::debug!(command = ?self.command, ?browsers, "Running prefixer");

        let output = run_with_stdin(cmd, css, Stage::Prefixer)?;

        if !output.status.success() {
            return Err(AppError::processor(
                Stage::Prefixer,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        String::from_utf8(output.stdout).map_err(|e| AppError::processor_with(Stage::Prefixer, e))
    }
}

/// Spawn `cmd`, write `input` to its stdin and collect its output.
fn run_with_stdin(mut cmd: Command, input: &str, stage: Stage) -> Result<Output> {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| AppError::processor_with(stage, e))?;

    // A child that exits without reading its input closes the pipe early;
    // its exit status and stderr carry the real outcome.
    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(AppError::processor_with(stage, e));
            }
        }
    }

    child
        .wait_with_output()
        .map_err(|e| AppError::processor_with(stage, e))
}
