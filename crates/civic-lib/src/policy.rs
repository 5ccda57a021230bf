//! Role authorization policy.
//!
//! A pure lookup from `(role, action)` to allow/deny. Roles are
//! self-selected by the client, so this gates the intended workflow; it is
//! not a security boundary. Real enforcement would need a trusted server
//! holding the session and role.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::model::Role;

/// A mutation that requires authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    SubmitIssue,
    AddComment,
    ChangeStatus,
    PostBroadcast,
    DeleteIssue,
}

impl Action {
    pub const ALL: [Self; 5] = [
        Self::SubmitIssue,
        Self::AddComment,
        Self::ChangeStatus,
        Self::PostBroadcast,
        Self::DeleteIssue,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SubmitIssue => "submitIssue",
            Self::AddComment => "addComment",
            Self::ChangeStatus => "changeStatus",
            Self::PostBroadcast => "postBroadcast",
            Self::DeleteIssue => "deleteIssue",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BoardError::InvalidAction {
                action: s.to_string(),
            })
    }
}

/// Roles permitted to perform `action`.
#[must_use]
pub const fn allowed_roles(action: Action) -> &'static [Role] {
    match action {
        Action::SubmitIssue => &[Role::Citizen],
        Action::AddComment => &Role::ALL,
        Action::ChangeStatus => &[Role::Politician, Role::Moderator, Role::Admin],
        Action::PostBroadcast => &[Role::Politician],
        Action::DeleteIssue => &[Role::Admin],
    }
}

#[must_use]
pub const fn is_allowed(role: Role, action: Action) -> bool {
    matches!(
        (role, action),
        (_, Action::AddComment)
            | (Role::Citizen, Action::SubmitIssue)
            | (
                Role::Politician | Role::Moderator | Role::Admin,
                Action::ChangeStatus
            )
            | (Role::Politician, Action::PostBroadcast)
            | (Role::Admin, Action::DeleteIssue)
    )
}

/// Result of a policy check.
///
/// Denial is a value, not an error: callers inspect `allowed` and decide how
/// to present [`Authorization::reason`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub allowed: bool,
    pub action: Action,
    pub role: Role,
}

impl Authorization {
    #[must_use]
    pub const fn is_denied(&self) -> bool {
        !self.allowed
    }

    /// Human-readable denial reason, or `None` when allowed.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        if self.allowed {
            return None;
        }
        let permitted: Vec<&str> = allowed_roles(self.action)
            .iter()
            .map(|r| r.as_str())
            .collect();
        Some(format!(
            "Action '{}' is not permitted for role '{}' (allowed: {})",
            self.action,
            self.role,
            permitted.join(", ")
        ))
    }
}

/// Check whether `role` may perform `action`.
#[must_use]
pub fn check(role: Role, action: Action) -> Authorization {
    let allowed = is_allowed(role, action);
    if !allowed {
        tracing::warn!(%role, %action, "authorization denied");
    }
    Authorization {
        allowed,
        action,
        role,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_table() {
        assert!(!is_allowed(Role::Citizen, Action::DeleteIssue));
        assert!(is_allowed(Role::Admin, Action::DeleteIssue));
        assert!(!is_allowed(Role::Moderator, Action::PostBroadcast));
        assert!(is_allowed(Role::Politician, Action::PostBroadcast));
        assert!(is_allowed(Role::Citizen, Action::SubmitIssue));
        assert!(!is_allowed(Role::Admin, Action::SubmitIssue));
        assert!(!is_allowed(Role::Citizen, Action::ChangeStatus));
    }

    #[test]
    fn test_any_role_may_comment() {
        for role in Role::ALL {
            assert!(is_allowed(role, Action::AddComment));
        }
    }

    #[test]
    fn test_allowed_roles_agrees_with_is_allowed() {
        for action in Action::ALL {
            for role in Role::ALL {
                assert_eq!(
                    allowed_roles(action).contains(&role),
                    is_allowed(role, action),
                    "{role} / {action}"
                );
            }
        }
    }

    #[test]
    fn test_denial_carries_action_and_role() {
        let auth = check(Role::Citizen, Action::DeleteIssue);
        assert!(auth.is_denied());
        assert_eq!(auth.role, Role::Citizen);
        assert_eq!(auth.action, Action::DeleteIssue);

        let reason = auth.reason().unwrap();
        assert!(reason.contains("deleteIssue"));
        assert!(reason.contains("Citizen"));
        assert!(reason.contains("Admin"));
    }

    #[test]
    fn test_allowed_has_no_reason() {
        let auth = check(Role::Admin, Action::DeleteIssue);
        assert!(auth.allowed);
        assert!(auth.reason().is_none());
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("deleteIssue".parse::<Action>().unwrap(), Action::DeleteIssue);
        assert_eq!("POSTBROADCAST".parse::<Action>().unwrap(), Action::PostBroadcast);
        assert!("approve".parse::<Action>().is_err());
    }
}
