//! Status command implementation.

use civic_lib::Command;

use super::{Context, resolve_id, run_mutation};
use crate::cli::StatusArgs;
use crate::error::Result;

/// Execute the status command.
///
/// # Errors
///
/// Returns an error if the active role may not change status or the board cannot be saved.
pub fn execute(args: &StatusArgs, ctx: &Context) -> Result<()> {
    run_mutation(ctx, |repo| Command::ChangeStatus {
        issue_id: resolve_id(repo, &args.id),
        status: args.status,
    })?;
    Ok(())
}
