//! Submit and broadcast commands.

use civic_lib::Command;

use super::{Context, run_mutation};
use crate::cli::{BroadcastArgs, SubmitArgs};
use crate::error::Result;

/// Execute the submit command.
///
/// # Errors
///
/// Returns an error if the active role may not submit or the board cannot be saved.
pub fn submit(args: &SubmitArgs, ctx: &Context) -> Result<()> {
    run_mutation(ctx, |_| Command::SubmitIssue {
        title: args.title.clone(),
        description: args.description.clone(),
        category: args.category,
    })?;
    Ok(())
}

/// Execute the broadcast command.
///
/// # Errors
///
/// Returns an error if the active role may not broadcast or the board cannot be saved.
pub fn broadcast(args: &BroadcastArgs, ctx: &Context) -> Result<()> {
    run_mutation(ctx, |_| Command::PostBroadcast {
        text: args.text.clone(),
        category: args.category,
    })?;
    Ok(())
}
