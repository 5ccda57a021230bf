//! Command dispatch: policy check, repository mutation, persistence.
//!
//! [`apply`] is the pure core, taking the current repository and a command
//! and returning the next repository plus what happened. [`Board`] wraps it
//! with a store and the externally tracked selection.

use serde::Serialize;

use crate::error::Result;
use crate::model::{Category, Comment, Issue, Role, Status};
use crate::policy::{self, Action, Authorization};
use crate::repo::IssueRepository;
pub use crate::repo::NoChange;
use crate::store::{IssueStore, SlotStore};

/// A user-initiated mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SubmitIssue {
        title: String,
        description: String,
        category: Category,
    },
    AddComment {
        issue_id: String,
        text: String,
    },
    ChangeStatus {
        issue_id: String,
        status: Status,
    },
    PostBroadcast {
        text: String,
        category: Option<Category>,
    },
    DeleteIssue {
        issue_id: String,
    },
}

impl Command {
    /// The policy action gating this command.
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::SubmitIssue { .. } => Action::SubmitIssue,
            Self::AddComment { .. } => Action::AddComment,
            Self::ChangeStatus { .. } => Action::ChangeStatus,
            Self::PostBroadcast { .. } => Action::PostBroadcast,
            Self::DeleteIssue { .. } => Action::DeleteIssue,
        }
    }
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created {
        issue: Issue,
    },
    Commented {
        issue_id: String,
        comment: Comment,
    },
    StatusChanged {
        issue_id: String,
        from: Status,
        to: Status,
    },
    Deleted {
        issue_id: String,
    },
    Unchanged {
        reason: NoChange,
    },
    Denied {
        authorization: Authorization,
    },
}

impl Outcome {
    /// True if the collection was modified.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged { .. } | Self::Denied { .. })
    }

    /// The denial, if the policy refused the command.
    #[must_use]
    pub const fn denial(&self) -> Option<&Authorization> {
        match self {
            Self::Denied { authorization } => Some(authorization),
            _ => None,
        }
    }
}

/// Apply `command` as `role`, returning the next state and the outcome.
///
/// On denial or no-op the returned repository equals the input.
#[must_use]
pub fn apply(repo: &IssueRepository, role: Role, command: &Command) -> (IssueRepository, Outcome) {
    let authorization = policy::check(role, command.action());
    if authorization.is_denied() {
        return (repo.clone(), Outcome::Denied { authorization });
    }

    let mut next = repo.clone();
    let result = match command {
        Command::SubmitIssue {
            title,
            description,
            category,
        } => next
            .create_issue(title, description, *category, role)
            .map(|issue| Outcome::Created { issue }),
        Command::AddComment { issue_id, text } => next
            .append_comment(issue_id, role, text)
            .map(|comment| Outcome::Commented {
                issue_id: issue_id.clone(),
                comment,
            }),
        Command::ChangeStatus { issue_id, status } => next
            .change_status(issue_id, *status)
            .map(|from| Outcome::StatusChanged {
                issue_id: issue_id.clone(),
                from,
                to: *status,
            }),
        Command::PostBroadcast { text, category } => next
            .create_broadcast(text, *category)
            .map(|issue| Outcome::Created { issue }),
        Command::DeleteIssue { issue_id } => next
            .delete_issue(issue_id)
            .map(|_| Outcome::Deleted {
                issue_id: issue_id.clone(),
            }),
    };

    match result {
        Ok(outcome) => (next, outcome),
        Err(reason) => {
            tracing::debug!(action = %command.action(), %reason, "command left board unchanged");
            (repo.clone(), Outcome::Unchanged { reason })
        }
    }
}

/// The live board: repository, persistence and current selection.
#[derive(Debug)]
pub struct Board<S> {
    repo: IssueRepository,
    store: IssueStore<S>,
    selected: Option<Issue>,
}

impl<S: SlotStore> Board<S> {
    /// Load the persisted collection and start with nothing selected.
    pub fn open(store: IssueStore<S>) -> Self {
        let repo = IssueRepository::from_issues(store.load());
        Self {
            repo,
            store,
            selected: None,
        }
    }

    #[must_use]
    pub const fn repo(&self) -> &IssueRepository {
        &self.repo
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        self.repo.issues()
    }

    #[must_use]
    pub const fn store(&self) -> &IssueStore<S> {
        &self.store
    }

    /// Apply a command, persisting the full collection if it changed.
    ///
    /// # Errors
    ///
    /// Returns an error only if persisting the new snapshot fails; in that
    /// case the in-memory state is left as it was.
    pub fn dispatch(&mut self, role: Role, command: &Command) -> Result<Outcome> {
        let (next, outcome) = apply(&self.repo, role, command);
        if outcome.is_change() {
            self.store.save(next.issues())?;
            self.repo = next;
            self.refresh_selection();
        }
        Ok(outcome)
    }

    /// Select an issue by ID. Returns false (and clears the selection) if
    /// no such issue exists.
    pub fn select(&mut self, issue_id: &str) -> bool {
        self.selected = self.repo.get(issue_id).cloned();
        self.selected.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&Issue> {
        self.selected.as_ref()
    }

    /// Re-resolve the selection against the latest collection: refreshed if
    /// the issue still exists, cleared otherwise.
    fn refresh_selection(&mut self) {
        let id = self.selected.as_ref().map(|issue| issue.id.as_str());
        self.selected = crate::view::resolve_selected(self.repo.issues(), id).cloned();
    }
}
