//! Delete command implementation.

use civic_lib::Command;

use super::{Context, resolve_id, run_mutation};
use crate::cli::IssueRef;
use crate::error::Result;

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the active role may not delete or the board cannot be saved.
pub fn execute(args: &IssueRef, ctx: &Context) -> Result<()> {
    run_mutation(ctx, |repo| Command::DeleteIssue {
        issue_id: resolve_id(repo, &args.id),
    })?;
    Ok(())
}
