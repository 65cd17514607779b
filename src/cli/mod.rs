//! CLI interface using clap.
//!
//! Tasks are positional and run in the order given.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{AppError, Result, TaskName};

/// Layer Runner - validate and compile front-end assets per project layer.
///
/// Set a layer, then name the tasks to run on it:
///   layer-runner setLayerToContent validateHTML
///   layer-runner setLayerToSettings compileCSS
///   layer-runner setLayerToContent validateCSS
///   layer-runner clean
#[derive(Parser, Debug)]
#[command(name = "layer-runner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file (.json or .toml).
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Write the default configuration file if it does not exist.
    #[arg(long)]
    pub init_config: bool,

    /// Tasks to run: setLayerToContent, setLayerToSettings, setLayerToBackend,
    /// validateHTML, compileCSS, validateCSS, clean, showPaths.
    #[arg(value_name = "TASK", required_unless_present = "init_config")]
    pub tasks: Vec<String>,
}

impl Cli {
    /// Parse the task arguments.
    ///
    /// # Errors
    /// Returns `AppError::InvalidTask` for the first unknown name.
    pub fn task_names(&self) -> Result<Vec<TaskName>> {
        self.tasks
            .iter()
            .map(|t| t.parse().map_err(|message| AppError::InvalidTask { message }))
            .collect()
    }
}
