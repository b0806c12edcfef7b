//! Interactive shell over the scenario form and blueprint view.

pub mod commands;
pub mod forms;
pub mod help;
pub mod io;
pub mod output;
pub mod registry;
pub mod render;
mod shell;
pub mod shell_context;
pub mod table;

use std::path::PathBuf;

pub use shell::run_cli;
pub use shell_context::{CliMode, CommandError, CommandResult, ShellContext};

/// Startup options collected by the binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    /// Identity handed in by the host. `None` runs as the configured guest.
    pub user: Option<String>,
    /// Read commands from stdin without prompts.
    pub script: bool,
    pub config_path: Option<PathBuf>,
    /// Overrides the configured generation delay for this run.
    pub delay_ms: Option<u64>,
}
