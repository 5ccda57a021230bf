//! Error types for `civic-lib`.
//!
//! Rejected input and missing targets are not errors here: mutations report
//! them as [`crate::board::NoChange`]. What remains are parse failures for
//! user-supplied strings and persistence failures on the write path.

use thiserror::Error;

/// Primary error type for civic-lib operations.
#[derive(Error, Debug)]
pub enum BoardError {
    // === Parse Errors ===
    /// Role string is not one of the four fixed roles.
    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    /// Status string is not a known status.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Category string is not a known category.
    #[error("Invalid category: {category}")]
    InvalidCategory { category: String },

    /// Filter selector is neither `all` nor a status.
    #[error("Invalid status filter: {filter}")]
    InvalidFilter { filter: String },

    /// Action name is not part of the policy table.
    #[error("Invalid action: {action}")]
    InvalidAction { action: String },

    // === Lookup Errors ===
    /// Issue with the specified ID was not found (read-side lookups only).
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    // === Storage Errors ===
    /// Persisted snapshot carries a schema version this build cannot read.
    #[error("Unsupported snapshot schema version: {version}")]
    UnsupportedSchema { version: u32 },

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using `BoardError`.
pub type Result<T> = std::result::Result<T, BoardError>;
