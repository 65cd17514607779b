//! Removal of generated artifacts.
//!
//! Each known artifact is handled on its own: a missing or unreadable path is
//! reported as absent, a failed removal is reported, and the sweep continues.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::{resolve_path, Configuration, Layer, PathKind, Result};
use crate::infrastructure::PathRemover;

use super::reporter::Reporter;

/// A generated path cleanup may delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovableArtifact {
    /// Short description shown in reports.
    pub label: &'static str,
    pub path: String,
}

impl RemovableArtifact {
    /// Whether the path can currently be seen on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        fs::symlink_metadata(Path::new(&self.path)).is_ok()
    }
}

/// What happened to one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanStatus {
    Removed,
    Absent,
    Failed(String),
}

/// Per-artifact result of a cleanup.
#[derive(Debug, Clone)]
pub struct CleanEntry {
    pub artifact: RemovableArtifact,
    pub status: CleanStatus,
}

/// Result of a cleanup sweep.
#[derive(Debug, Clone, Default)]
pub struct CleanReport {
    pub entries: Vec<CleanEntry>,
}

impl CleanReport {
    /// Number of artifacts deleted.
    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status == CleanStatus::Removed)
            .count()
    }

    /// Whether nothing was there to remove.
    #[must_use]
    pub fn all_absent(&self) -> bool {
        self.entries.iter().all(|e| e.status == CleanStatus::Absent)
    }
}

/// Every artifact cleanup knows about, in sweep order.
#[must_use]
pub fn removable_artifacts(config: &Configuration) -> Vec<RemovableArtifact> {
    let mut artifacts = vec![RemovableArtifact {
        label: "validator results",
        path: config.folders.validator_results.clone(),
    }];

    for (layer, label) in [(Layer::Content, "content CSS"), (Layer::Settings, "settings CSS")] {
        if let Ok(path) = resolve_path(PathKind::CssOutputFile, layer, config) {
            artifacts.push(RemovableArtifact {
                label,
                path: path.to_string(),
            });
        }
    }

    artifacts
}

/// Delete every known artifact that exists and report on each.
///
/// # Errors
/// Only fails if the report itself cannot be written.
pub fn clean<W: Write>(
    config: &Configuration,
    remover: &dyn PathRemover,
    reporter: &mut Reporter<W>,
) -> Result<CleanReport> {
    let mut report = CleanReport::default();

    for artifact in removable_artifacts(config) {
        let status = if artifact.exists() {
            match remover.remove(Path::new(&artifact.path)) {
                Ok(()) => {
                    tracing::info!(path = %artifact.path, "Removed artifact");
                    reporter.success(&format!("Removed {} ({})", artifact.path, artifact.label))?;
                    CleanStatus::Removed
                }
                Err(e) => {
                    tracing::warn!(path = %artifact.path, error = %e, "Failed to remove artifact");
                    reporter.error(&format!("Could not remove {}: {e}", artifact.path))?;
                    CleanStatus::Failed(e.to_string())
                }
            }
        } else {
            reporter.warn(&format!("{} does not exist ({})", artifact.path, artifact.label))?;
            CleanStatus::Absent
        };

        report.entries.push(CleanEntry { artifact, status });
    }

    Ok(report)
}
