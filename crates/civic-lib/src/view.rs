//! Read-only projections over the issue collection.
//!
//! Nothing here mutates; every function borrows the collection and returns
//! references in collection order (most recent first).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::model::{Issue, Status};

/// Default number of entries in the recent-updates feed.
pub const DEFAULT_FEED_LIMIT: usize = 6;

/// Appended by [`truncate_text`] when text is cut.
pub const ELLIPSIS: &str = "...";

/// Status filter selector: `all` or a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, issue: &Issue) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => issue.status == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse::<Status>()
            .map(Self::Only)
            .map_err(|_| BoardError::InvalidFilter {
                filter: s.to_string(),
            })
    }
}

/// Issues matching `filter`, in collection order.
#[must_use]
pub fn filter_by_status(issues: &[Issue], filter: StatusFilter) -> Vec<&Issue> {
    issues.iter().filter(|issue| filter.matches(issue)).collect()
}

/// Up to `limit` open reports and broadcasts, in collection order.
#[must_use]
pub fn recent_feed(issues: &[Issue], limit: usize) -> Vec<&Issue> {
    issues
        .iter()
        .filter(|issue| issue.status.is_feed_visible())
        .take(limit)
        .collect()
}

/// `text` unchanged if it has at most `max_len` characters, otherwise its
/// first `max_len` characters followed by [`ELLIPSIS`].
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> String {
    match text.char_indices().nth(max_len) {
        None => text.to_string(),
        Some((cut, _)) => format!("{}{ELLIPSIS}", &text[..cut]),
    }
}

/// Resolve an externally tracked selection against the current collection.
///
/// Returns the latest snapshot of the selected issue, or `None` once it no
/// longer exists.
#[must_use]
pub fn resolve_selected<'a>(issues: &'a [Issue], selected_id: Option<&str>) -> Option<&'a Issue> {
    let id = selected_id?;
    issues.iter().find(|issue| issue.id == id)
}

/// Per-status tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub total: usize,
    pub open: usize,
    pub in_progress: usize,
    pub resolved: usize,
    pub updates: usize,
}

impl StatusCounts {
    #[must_use]
    pub const fn get(&self, status: Status) -> usize {
        match status {
            Status::Open => self.open,
            Status::InProgress => self.in_progress,
            Status::Resolved => self.resolved,
            Status::Update => self.updates,
        }
    }
}

#[must_use]
pub fn status_counts(issues: &[Issue]) -> StatusCounts {
    issues
        .iter()
        .fold(StatusCounts::default(), |mut counts, issue| {
            counts.total += 1;
            match issue.status {
                Status::Open => counts.open += 1,
                Status::InProgress => counts.in_progress += 1,
                Status::Resolved => counts.resolved += 1,
                Status::Update => counts.updates += 1,
            }
            counts
        })
}
