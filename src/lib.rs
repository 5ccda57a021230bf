//! `civic_board` - Local civic feedback board
//!
//! This crate provides the `cb` command-line front end over
//! [`civic_lib`], the in-process board core.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Data directory and `config.yaml` resolution
//! - [`error`] - Front-end error type and exit codes
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//!
//! Issues, comments, the role policy, views and persistence live in
//! `civic_lib` and are re-exported here for convenience.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

pub use civic_lib::{
    Action, Authorization, Board, Category, Command, Comment, Issue, Outcome, Role, Status,
};
pub use error::{CliError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if command execution fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}

/// Exit code for an error returned by [`run`].
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>().map_or(1, CliError::exit_code)
}
