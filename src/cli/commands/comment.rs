//! Comment command implementation.

use civic_lib::Command;

use super::{Context, resolve_id, run_mutation};
use crate::cli::CommentArgs;
use crate::error::Result;

/// Execute the comment command.
///
/// # Errors
///
/// Returns an error if the board cannot be saved.
pub fn execute(args: &CommentArgs, ctx: &Context) -> Result<()> {
    run_mutation(ctx, |repo| Command::AddComment {
        issue_id: resolve_id(repo, &args.id),
        text: args.text.clone(),
    })?;
    Ok(())
}
