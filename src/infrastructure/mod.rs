//! Infrastructure layer - external adapters (config files, tools, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod checker;
pub mod config;
pub mod processors;
pub mod remover;
pub mod sass;

pub use config::{ensure_config_exists, load_config};
pub use processors::{Diagnostics, PathRemover, Processors};
