//! Task sequencing.
//!
//! Walks the task list given on the command line in order. The sequencer
//! owns the layer selector for its run, so the layer a task sees is the one
//! set by the closest preceding layer-setting task.

use std::collections::HashSet;
use std::io::Write;
use std::time::Instant;

use crate::domain::{Configuration, Layer, LayerSelector, Result, TaskName};
use crate::infrastructure::Processors;

use super::cleaner::{clean, CleanStatus};
use super::reporter::{format_paths_table, Reporter};
use super::tasks::{compile_css, validate_css, validate_html, TaskEnv, TaskOutcome};

/// Tally of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub failed: usize,
}

impl RunSummary {
    /// Whether any task failed or had its input rejected.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0 || self.rejected > 0
    }

    /// Process exit status for the run: 1 on any failure or rejection.
    /// Skipped tasks leave it at 0.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }

    const fn record(&mut self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Completed => self.completed += 1,
            TaskOutcome::Rejected => self.rejected += 1,
            TaskOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Runs tasks in order against one configuration.
pub struct TaskSequencer<'a, W: Write> {
    env: TaskEnv<'a>,
    reporter: Reporter<W>,
    selector: LayerSelector,
    ran: HashSet<(TaskName, Layer)>,
    summary: RunSummary,
}

impl<'a, W: Write> TaskSequencer<'a, W> {
    /// Create a sequencer with no layer selected.
    pub fn new(config: &'a Configuration, processors: &'a Processors, out: W) -> Self {
        Self {
            env: TaskEnv { config, processors },
            reporter: Reporter::new(out, &config.colors),
            selector: LayerSelector::new(),
            ran: HashSet::new(),
            summary: RunSummary::default(),
        }
    }

    /// Layer currently selected.
    #[must_use]
    pub const fn active_layer(&self) -> Layer {
        self.selector.active_layer()
    }

    /// Run every task in order. Later tasks run even if earlier ones failed.
    pub fn run(&mut self, tasks: &[TaskName]) -> RunSummary {
        for &task in tasks {
            self.run_task(task);
        }
        self.summary
    }

    /// Give back the output sink.
    #[must_use]
    pub fn into_output(self) -> W {
        self.reporter.into_inner()
    }

    fn run_task(&mut self, task: TaskName) {
        if let Some(layer) = task.selected_layer() {
            self.selector.set_layer(layer);
            return;
        }

        let layer = self.selector.active_layer();

        for &prerequisite in task.prerequisites() {
            if self.ran.contains(&(prerequisite, Self::run_key(prerequisite, layer))) {
                tracing::debug!(%prerequisite, %layer, "Prerequisite already ran");
                continue;
            }
            self.run_task(prerequisite);
        }

        let start = Instant::now();
        tracing::info!(%task, %layer, "Starting task");

        match self.execute(task, layer) {
            Ok(outcome) => self.summary.record(outcome),
            Err(e) => {
                tracing::debug!(%task, error = ?e, "Task failed");
                self.summary.failed += 1;
                if let Err(write_err) = self.reporter.error(&format!("'{task}' failed: {e}")) {
                    tracing::error!(error = %write_err, "Could not report task failure");
                }
            }
        }

        self.ran.insert((task, Self::run_key(task, layer)));

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        tracing::info!(%task, elapsed_ms, "Finished task");
    }

    /// Layer a task's run is keyed on; layer-independent tasks share one key.
    const fn run_key(task: TaskName, layer: Layer) -> Layer {
        if task.uses_layer() {
            layer
        } else {
            Layer::Unset
        }
    }

    fn execute(&mut self, task: TaskName, layer: Layer) -> Result<TaskOutcome> {
        let env = self.env;
        let reporter = &mut self.reporter;

        match task {
            TaskName::ValidateHtml => validate_html(env, layer, reporter),
            TaskName::CompileCss => compile_css(env, layer, reporter),
            TaskName::ValidateCss => validate_css(env, layer, reporter),
            TaskName::Clean => {
                let report = clean(env.config, env.processors.remover.as_ref(), reporter)?;
                for entry in &report.entries {
                    if let CleanStatus::Failed(reason) = &entry.status {
                        tracing::debug!(
                            artifact = entry.artifact.label,
                            path = %entry.artifact.path,
                            %reason,
                            "Artifact left in place"
                        );
                    }
                }
                if report.all_absent() {
                    tracing::info!("Nothing to clean");
                } else {
                    tracing::info!(removed = report.removed_count(), "Cleanup finished");
                }
                Ok(TaskOutcome::Completed)
            }
            TaskName::ShowPaths => {
                reporter.line(&format_paths_table(env.config))?;
                Ok(TaskOutcome::Completed)
            }
            TaskName::SetLayerToContent
            | TaskName::SetLayerToSettings
            | TaskName::SetLayerToBackend => Ok(TaskOutcome::Completed),
        }
    }
}
