//! Output formatting for `civic_board`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`PermissionRow`] - One action of the policy table (permissions)
//! - [`BoardSummary`] - Aggregate counts (stats)
//!
//! Issues and command outcomes serialize directly from the core types.

mod output;
mod text;

pub use output::{BoardSummary, PermissionRow};
pub use text::{
    format_category_badge, format_comment_line, format_issue_details, format_issue_line,
    format_status_icon,
};
