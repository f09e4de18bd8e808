//! Terminal front end for the budget dashboard.

use std::io;

use thiserror::Error;

use crate::errors::BudgetError;

pub mod commands;
pub mod forms;
pub mod output;
mod shell;
pub mod state;

pub use commands::{CliMode, Session};
pub use shell::{parse_command_line, run_cli};
pub use state::Dashboard;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] BudgetError),
    #[error("{0}")]
    Input(String),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Dialog(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CliError {
    pub fn usage(usage: &str) -> Self {
        CliError::Input(format!("usage: {usage}"))
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}
