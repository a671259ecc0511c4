//! CLI command implementations.
//!
//! Each command writes its result to the given writer; diagnostics go
//! through `tracing`.

use thiserror::Error;

use tenant_console::PolicyError;

pub mod check;
pub mod operator;
pub mod roles;
pub mod validate;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Permission tables could not be loaded.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Reading input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Arguments are valid individually but not together.
    #[error("Invalid usage: {0}")]
    Usage(String),

    /// No access key on stdin.
    #[error("No access key provided on stdin")]
    EmptyKey,
}
