//! Application layer - tasks and their sequencing.
//!
//! This layer drives the external processors over resolved paths and
//! reports results.

pub mod cleaner;
pub mod reporter;
pub mod sequencer;
pub mod tasks;

pub use sequencer::{RunSummary, TaskSequencer};
