//! Error types for the `cb` front end.
//!
//! Wraps the core [`BoardError`] and adds the failures only the command
//! line can hit: configuration, workspace setup, health checks and policy denials.

use std::path::PathBuf;

use civic_lib::BoardError;
use thiserror::Error;

/// Primary error type for `civic_board`.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error from the board core.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The policy refused the command for the active role.
    #[error("Permission denied: {reason}")]
    Denied { reason: String },

    /// Configuration file could not be parsed.
    #[error("Configuration error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// `init` found an existing workspace.
    #[error("Already initialized: {path} (use --force to overwrite)")]
    AlreadyInitialized { path: PathBuf },

    /// `doctor` found at least one failing check.
    #[error("{failed} health check(s) failed; see the report above")]
    HealthCheck { failed: usize },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Denied { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type using `CliError`.
pub type Result<T> = std::result::Result<T, CliError>;
