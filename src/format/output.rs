use civic_lib::policy::{self, Action};
use civic_lib::{Issue, Role, StatusCounts};
use serde::Serialize;

/// One row of the permission table.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionRow {
    pub action: Action,
    pub allowed_roles: Vec<Role>,
    /// Whether the active role may perform the action.
    pub allowed: bool,
}

impl PermissionRow {
    /// Rows for every action, evaluated for `role`.
    #[must_use]
    pub fn table(role: Role) -> Vec<Self> {
        Action::ALL
            .into_iter()
            .map(|action| Self {
                action,
                allowed_roles: policy::allowed_roles(action).to_vec(),
                allowed: policy::is_allowed(role, action),
            })
            .collect()
    }
}

/// Board summary for the stats view.
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary<'a> {
    #[serde(flatten)]
    pub counts: StatusCounts,
    pub comments: usize,
    /// Most recent entry, if any.
    pub latest: Option<&'a Issue>,
}

impl<'a> BoardSummary<'a> {
    #[must_use]
    pub fn from_issues(issues: &'a [Issue]) -> Self {
        Self {
            counts: civic_lib::view::status_counts(issues),
            comments: issues.iter().map(|issue| issue.comments.len()).sum(),
            latest: issues.first(),
        }
    }
}
