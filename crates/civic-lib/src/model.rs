//! Core data types for civic-lib.
//!
//! Serialized field names are camelCase and enum values use their display
//! spelling (`"In Progress"`), so persisted snapshots read naturally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Folds a user-supplied token for lenient matching: lowercase, with spaces,
/// dashes and underscores removed ("In Progress" == "in_progress").
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// The self-selected role of whoever is driving the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    Citizen,
    Politician,
    Moderator,
    Admin,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::Citizen, Self::Politician, Self::Moderator, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Citizen => "Citizen",
            Self::Politician => "Politician",
            Self::Moderator => "Moderator",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "citizen" => Ok(Self::Citizen),
            "politician" => Ok(Self::Politician),
            "moderator" | "mod" => Ok(Self::Moderator),
            "admin" => Ok(Self::Admin),
            _ => Err(BoardError::InvalidRole {
                role: s.to_string(),
            }),
        }
    }
}

/// Issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Category {
    #[default]
    General,
    Electricity,
    Roads,
    Sanitation,
    Water,
    Other,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::General,
        Self::Electricity,
        Self::Roads,
        Self::Sanitation,
        Self::Water,
        Self::Other,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Electricity => "Electricity",
            Self::Roads => "Roads",
            Self::Sanitation => "Sanitation",
            Self::Water => "Water",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "general" => Ok(Self::General),
            "electricity" => Ok(Self::Electricity),
            "roads" => Ok(Self::Roads),
            "sanitation" => Ok(Self::Sanitation),
            "water" => Ok(Self::Water),
            "other" => Ok(Self::Other),
            _ => Err(BoardError::InvalidCategory {
                category: s.to_string(),
            }),
        }
    }
}

/// Issue lifecycle status.
///
/// `Update` marks a broadcast and is never the source or target of a status
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Update,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Update];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Update => "Update",
        }
    }

    /// True for the broadcast-only status.
    #[must_use]
    pub const fn is_broadcast(self) -> bool {
        matches!(self, Self::Update)
    }

    /// True for statuses that may be changed (and changed to).
    #[must_use]
    pub const fn is_trackable(self) -> bool {
        matches!(self, Self::Open | Self::InProgress | Self::Resolved)
    }

    /// True for statuses surfaced in the recent-updates feed.
    #[must_use]
    pub const fn is_feed_visible(self) -> bool {
        matches!(self, Self::Open | Self::Update)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match fold(s).as_str() {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "update" => Ok(Self::Update),
            _ => Err(BoardError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// The primary persisted entity: a citizen report or a politician broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique ID (e.g., "iss-k3f9a").
    pub id: String,

    /// Citizen-supplied title, or "Broadcast - <category>".
    pub title: String,

    pub description: String,

    #[serde(default)]
    pub category: Category,

    #[serde(default)]
    pub status: Status,

    /// Chronological; only ever appended to.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// Creation timestamp (immutable).
    pub created_at: DateTime<Utc>,

    /// Role active at creation time (immutable).
    pub reporter_role: Role,
}

impl Issue {
    /// True if this entry is a politician broadcast.
    #[must_use]
    pub const fn is_broadcast(&self) -> bool {
        self.status.is_broadcast()
    }
}

/// A comment on an issue.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    /// Role active when the comment was posted.
    pub role: Role,
    pub text: String,
    pub at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_parses_display_and_snake_forms() {
        assert_eq!("In Progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("RESOLVED".parse::<Status>().unwrap(), Status::Resolved);
        assert!("closed".parse::<Status>().is_err());
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Politician ".parse::<Role>().unwrap(), Role::Politician);
        let err = "mayor".parse::<Role>().unwrap_err();
        assert!(matches!(err, BoardError::InvalidRole { role } if role == "mayor"));
    }

    #[test]
    fn category_roundtrips_through_display() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn only_update_is_broadcast() {
        assert!(Status::Update.is_broadcast());
        assert!(!Status::Update.is_trackable());
        for status in [Status::Open, Status::InProgress, Status::Resolved] {
            assert!(status.is_trackable());
            assert!(!status.is_broadcast());
        }
    }

    #[test]
    fn issue_serializes_with_camel_case_fields() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let issue = Issue {
            id: "iss-abc".to_string(),
            title: "Pothole".to_string(),
            description: "Large pothole on 5th".to_string(),
            category: Category::Roads,
            status: Status::InProgress,
            comments: vec![Comment {
                id: "cmt-1x2".to_string(),
                role: Role::Moderator,
                text: "Crew assigned".to_string(),
                at,
            }],
            created_at: at,
            reporter_role: Role::Citizen,
        };

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["reporterRole"], "Citizen");
        assert_eq!(json["category"], "Roads");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["comments"][0]["role"], "Moderator");
    }

    #[test]
    fn issue_deserializes_without_comments() {
        let raw = r#"{
            "id": "iss-1",
            "title": "Streetlight out",
            "description": "Corner of Elm",
            "category": "Electricity",
            "status": "Open",
            "createdAt": "2026-01-01T00:00:00Z",
            "reporterRole": "Citizen"
        }"#;
        let issue: Issue = serde_json::from_str(raw).unwrap();
        assert!(issue.comments.is_empty());
        assert_eq!(issue.category, Category::Electricity);
    }
}
