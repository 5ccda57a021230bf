//! Command implementations.
//!
//! Mutating commands build a [`civic_lib::Command`] inside
//! [`run_mutation`], which loads the file-backed board, dispatches the
//! command and reports the outcome.

pub mod comment;
pub mod completions;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod init;
pub mod list;
pub mod permissions;
pub mod show;
pub mod stats;
pub mod status;
pub mod version;

use civic_lib::util::ISSUE_PREFIX;
use civic_lib::{Board, Command, FileSlots, IssueRepository, IssueStore, Outcome, Role};

use crate::config::{self, CliOverrides, ResolvedConfig};
use crate::error::{CliError, Result};

/// Per-invocation state shared by board commands.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: ResolvedConfig,
    pub json: bool,
}

impl Context {
    /// Resolve configuration for this invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is malformed.
    pub fn new(overrides: &CliOverrides, json: bool) -> Result<Self> {
        Ok(Self {
            config: config::resolve(overrides)?,
            json,
        })
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.config.role
    }

    /// Open the board stored in the data directory.
    #[must_use]
    pub fn open_board(&self) -> Board<FileSlots> {
        Board::open(IssueStore::new(FileSlots::new(&self.config.data_dir)))
    }
}

/// Resolve a user-typed issue ID against the loaded collection.
///
/// An exact match wins, so IDs from older snapshots (any string) stay
/// addressable. Otherwise the input is lowercased and given the `iss-`
/// prefix if it lacks one.
#[must_use]
pub fn resolve_id(repo: &IssueRepository, raw: &str) -> String {
    let raw = raw.trim();
    if repo.contains(raw) {
        return raw.to_string();
    }
    let lowered = raw.to_lowercase();
    let prefix = format!("{ISSUE_PREFIX}-");
    if lowered.starts_with(&prefix) {
        lowered
    } else {
        format!("{prefix}{lowered}")
    }
}

/// Build a command against the current collection, dispatch it as the
/// active role and print the outcome.
///
/// # Errors
///
/// Returns `Denied` if the policy refused the command, or an error if the
/// new snapshot cannot be written.
pub fn run_mutation<F>(ctx: &Context, build: F) -> Result<Outcome>
where
    F: FnOnce(&IssueRepository) -> Command,
{
    let mut board = ctx.open_board();
    let command = build(board.repo());
    let outcome = board.dispatch(ctx.role(), &command)?;
    print_outcome(&outcome, ctx.json)?;

    if let Some(denial) = outcome.denial() {
        return Err(CliError::Denied {
            reason: denial.reason().unwrap_or_default(),
        });
    }
    Ok(outcome)
}

fn print_outcome(outcome: &Outcome, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Created { issue } if issue.is_broadcast() => {
            println!("Broadcast {}: {}", issue.id, issue.title);
        }
        Outcome::Created { issue } => println!("Created {}: {}", issue.id, issue.title),
        Outcome::Commented { issue_id, comment } => {
            println!("Commented on {issue_id} ({})", comment.id);
        }
        Outcome::StatusChanged { issue_id, from, to } => {
            println!("{issue_id}: {from} -> {to}");
        }
        Outcome::Deleted { issue_id } => println!("Deleted {issue_id}"),
        Outcome::Unchanged { reason } => println!("No change: {reason}"),
        // Reported by the caller through the returned error
        Outcome::Denied { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use civic_lib::{Category, Issue, Status};
    use proptest::prelude::*;

    fn legacy_issue(id: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: "Streetlight out".to_string(),
            description: "Elm and 3rd".to_string(),
            category: Category::Electricity,
            status: Status::Open,
            comments: Vec::new(),
            created_at: Utc::now(),
            reporter_role: Role::Citizen,
        }
    }

    #[test]
    fn resolve_adds_missing_prefix() {
        let repo = IssueRepository::new();
        assert_eq!(resolve_id(&repo, "k3f9"), "iss-k3f9");
        assert_eq!(resolve_id(&repo, "iss-k3f9"), "iss-k3f9");
        assert_eq!(resolve_id(&repo, " ISS-K3F9 "), "iss-k3f9");
    }

    #[test]
    fn resolve_prefers_exact_stored_id() {
        let repo = IssueRepository::from_issues(vec![
            legacy_issue("1712345678901"),
            legacy_issue("Legacy-ABC"),
        ]);
        assert_eq!(resolve_id(&repo, "1712345678901"), "1712345678901");
        assert_eq!(resolve_id(&repo, " Legacy-ABC "), "Legacy-ABC");
        assert_eq!(resolve_id(&repo, "legacy-abc"), "iss-legacy-abc");
    }

    proptest! {
        #[test]
        fn prop_stored_ids_resolve_to_themselves(id in "[A-Za-z0-9-]{1,16}") {
            let repo = IssueRepository::from_issues(vec![legacy_issue(&id)]);
            prop_assert_eq!(resolve_id(&repo, &id), id);
        }

        #[test]
        fn prop_unknown_ids_get_one_prefix(suffix in "[a-z0-9]{1,10}") {
            let repo = IssueRepository::new();
            let once = resolve_id(&repo, &suffix);
            prop_assert!(once.starts_with("iss-"));
            prop_assert_eq!(resolve_id(&repo, &once), once.clone());
        }
    }
}
