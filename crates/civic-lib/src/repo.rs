//! In-memory issue repository.
//!
//! Holds the single ordered collection (most recent first) that both the
//! mutation path and the view projector read. Mutations perform no
//! authorization; callers go through [`crate::policy`] first (see
//! [`crate::board::apply`]).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::model::{Category, Comment, Issue, Role, Status};
use crate::util::{COMMENT_PREFIX, ISSUE_PREFIX, generate_id};

/// Why a mutation left the collection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoChange {
    /// A required text field was empty after trimming.
    EmptyInput,
    /// The referenced issue is not in the collection.
    NotFound,
    /// The issue is a broadcast; its status is fixed.
    BroadcastStatusLocked,
    /// `Update` is reserved for broadcasts and cannot be assigned.
    InvalidTarget,
    /// The issue already has the requested status.
    SameStatus,
}

impl fmt::Display for NoChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::EmptyInput => "required text was empty",
            Self::NotFound => "issue not found",
            Self::BroadcastStatusLocked => "broadcast status cannot change",
            Self::InvalidTarget => "status 'Update' is reserved for broadcasts",
            Self::SameStatus => "issue already has that status",
        };
        f.write_str(msg)
    }
}

/// Trim `text`, returning `None` if nothing is left.
fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Ordered, id-unique collection of issues.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueRepository {
    issues: Vec<Issue>,
}

impl IssueRepository {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository from a loaded snapshot.
    ///
    /// Order is preserved. If the snapshot repeats an ID, the first
    /// occurrence wins and the rest are dropped.
    #[must_use]
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(issues.len());
        for issue in issues {
            if seen.insert(issue.id.clone()) {
                kept.push(issue);
            } else {
                tracing::warn!(id = %issue.id, "dropping duplicate issue id from snapshot");
            }
        }
        Self { issues: kept }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|issue| issue.id == id)
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create a citizen report and prepend it.
    ///
    /// # Errors
    ///
    /// `NoChange::EmptyInput` if the title or description is blank.
    pub fn create_issue(
        &mut self,
        title: &str,
        description: &str,
        category: Category,
        reporter: Role,
    ) -> Result<Issue, NoChange> {
        let (Some(title), Some(description)) = (non_blank(title), non_blank(description)) else {
            return Err(NoChange::EmptyInput);
        };
        Ok(self.insert_new(title, description, category, Status::Open, reporter, Utc::now()))
    }

    /// Create a politician broadcast and prepend it.
    ///
    /// The title is synthesized from the category, which defaults to
    /// `General`; the reporter is always `Politician`.
    ///
    /// # Errors
    ///
    /// `NoChange::EmptyInput` if the text is blank.
    pub fn create_broadcast(
        &mut self,
        text: &str,
        category: Option<Category>,
    ) -> Result<Issue, NoChange> {
        let text = non_blank(text).ok_or(NoChange::EmptyInput)?;
        let category = category.unwrap_or_default();
        let title = format!("Broadcast - {category}");
        Ok(self.insert_new(
            &title,
            text,
            category,
            Status::Update,
            Role::Politician,
            Utc::now(),
        ))
    }

    fn insert_new(
        &mut self,
        title: &str,
        description: &str,
        category: Category,
        status: Status,
        reporter: Role,
        now: DateTime<Utc>,
    ) -> Issue {
        let id = generate_id(ISSUE_PREFIX, title, now, self.issues.len(), |id| {
            self.contains(id)
        });
        let issue = Issue {
            id,
            title: title.to_string(),
            description: description.to_string(),
            category,
            status,
            comments: Vec::new(),
            created_at: now,
            reporter_role: reporter,
        };
        tracing::debug!(id = %issue.id, %status, %reporter, "created issue");
        self.issues.insert(0, issue.clone());
        issue
    }

    /// Append a comment to an issue.
    ///
    /// # Errors
    ///
    /// `NoChange::EmptyInput` for blank text, `NoChange::NotFound` for an
    /// unknown issue.
    pub fn append_comment(
        &mut self,
        issue_id: &str,
        role: Role,
        text: &str,
    ) -> Result<Comment, NoChange> {
        let text = non_blank(text).ok_or(NoChange::EmptyInput)?;
        if !self.contains(issue_id) {
            return Err(NoChange::NotFound);
        }

        let now = Utc::now();
        let id = {
            let taken: HashSet<&str> = self
                .issues
                .iter()
                .flat_map(|issue| issue.comments.iter().map(|c| c.id.as_str()))
                .collect();
            generate_id(COMMENT_PREFIX, text, now, taken.len(), |id| {
                taken.contains(id)
            })
        };

        let comment = Comment {
            id,
            role,
            text: text.to_string(),
            at: now,
        };
        let issue = self.get_mut(issue_id).ok_or(NoChange::NotFound)?;
        issue.comments.push(comment.clone());
        tracing::debug!(%issue_id, comment_id = %comment.id, %role, "appended comment");
        Ok(comment)
    }

    /// Replace an issue's status, returning the previous one.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown issue, `BroadcastStatusLocked` when the
    /// issue is a broadcast, `InvalidTarget` when asked to set `Update`,
    /// `SameStatus` when nothing would change.
    pub fn change_status(&mut self, issue_id: &str, status: Status) -> Result<Status, NoChange> {
        let issue = self.get_mut(issue_id).ok_or(NoChange::NotFound)?;
        if issue.status.is_broadcast() {
            return Err(NoChange::BroadcastStatusLocked);
        }
        if !status.is_trackable() {
            return Err(NoChange::InvalidTarget);
        }
        if issue.status == status {
            return Err(NoChange::SameStatus);
        }
        let previous = std::mem::replace(&mut issue.status, status);
        tracing::debug!(%issue_id, from = %previous, to = %status, "changed status");
        Ok(previous)
    }

    /// Remove an issue, returning it.
    ///
    /// # Errors
    ///
    /// `NoChange::NotFound` if the issue does not exist.
    pub fn delete_issue(&mut self, issue_id: &str) -> Result<Issue, NoChange> {
        let index = self
            .issues
            .iter()
            .position(|issue| issue.id == issue_id)
            .ok_or(NoChange::NotFound)?;
        let removed = self.issues.remove(index);
        tracing::debug!(%issue_id, "deleted issue");
        Ok(removed)
    }
}
