//! Text formatting functions for `civic_board`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓ 📣)
//! - Category badges ([roads], [water], etc.)
//! - Issue, comment and detail formatting

use chrono::{DateTime, Utc};
use civic_lib::view::truncate_text;
use civic_lib::{Category, Comment, Issue, Status};

/// Status icon characters.
pub mod icons {
    /// Open report - awaiting triage (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - being worked (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Resolved - done (checkmark).
    pub const RESOLVED: &str = "✓";
    /// Broadcast announcement (megaphone).
    pub const UPDATE: &str = "📣";
}

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Resolved => icons::RESOLVED,
        Status::Update => icons::UPDATE,
    }
}

/// Format a category as a bracketed lowercase badge.
#[must_use]
pub fn format_category_badge(category: Category) -> String {
    format!("[{}]", category.as_str().to_lowercase())
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{status}] [{category}] {title} - {description}`,
/// with the description cut to `max_desc` characters.
#[must_use]
pub fn format_issue_line(issue: &Issue, max_desc: usize) -> String {
    format!(
        "{} {} [{}] {} {} - {}",
        format_status_icon(issue.status),
        issue.id,
        issue.status,
        format_category_badge(issue.category),
        issue.title,
        truncate_text(&issue.description, max_desc),
    )
}

/// Format one comment: `  {time} {role}: {text}`.
#[must_use]
pub fn format_comment_line(comment: &Comment) -> String {
    format!(
        "  {} {}: {}",
        format_timestamp(comment.at),
        comment.role,
        comment.text
    )
}

/// Multi-line issue view with the full description and every comment.
#[must_use]
pub fn format_issue_details(issue: &Issue) -> String {
    let mut out = format!(
        "{} {} {}\n",
        format_status_icon(issue.status),
        issue.id,
        issue.title
    );
    out += &format!(
        "Status: {}  Category: {}  Reported by: {}  Created: {}\n\n",
        issue.status,
        issue.category,
        issue.reporter_role,
        format_timestamp(issue.created_at),
    );
    out += &issue.description;
    out.push('\n');

    if issue.comments.is_empty() {
        out += "\nNo comments.\n";
    } else {
        out += &format!("\nComments ({}):\n", issue.comments.len());
        for comment in &issue.comments {
            out += &format_comment_line(comment);
            out.push('\n');
        }
    }
    out
}
