//! Layer Runner - validate and compile front-end assets per project layer.
//!
//! A project is split into layers (content, settings, backend). Each
//! invocation names a layer and the tasks to run on it; paths come from a
//! static configuration file and the real work is handed to external tools.
//!
//! QUICK START:
//!   layer-runner --init-config                       # Write config.json
//!   layer-runner setLayerToContent validateHTML      # Check the content view
//!   layer-runner setLayerToSettings compileCSS       # Build settings CSS
//!   layer-runner setLayerToContent validateCSS       # Compile, then check CSS
//!   layer-runner clean                               # Remove generated files
//!   layer-runner showPaths                           # Print every resolved path

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::Write;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{RunSummary, TaskSequencer};
use cli::Cli;
use infrastructure::{ensure_config_exists, load_config, Processors};

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(&cli) {
        Ok(summary) => {
            let code = summary.exit_code();
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Main application logic.
fn run(cli: &Cli) -> domain::Result<RunSummary> {
    let tasks = cli.task_names()?;

    if cli.init_config && ensure_config_exists(&cli.config)? {
        println!(
            "{} Wrote default configuration to {}",
            "✓".green().bold(),
            cli.config.display()
        );
    }

    let config = load_config(&cli.config)?;
    let processors = Processors::from_config(&config.processors);

    let stdout = std::io::stdout();
    let mut sequencer = TaskSequencer::new(&config, &processors, stdout.lock());
    let summary = sequencer.run(&tasks);
    let layer = sequencer.active_layer();

    sequencer
        .into_output()
        .flush()
        .map_err(|e| domain::AppError::io("Failed to flush output", e))?;

    tracing::info!(
        %layer,
        completed = summary.completed,
        skipped = summary.skipped,
        rejected = summary.rejected,
        failed = summary.failed,
        "Run finished"
    );

    Ok(summary)
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();
}
