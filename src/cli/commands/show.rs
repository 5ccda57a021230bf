//! Show command implementation.

use civic_lib::BoardError;

use super::{Context, resolve_id};
use crate::cli::IssueRef;
use crate::error::Result;
use crate::format::format_issue_details;

/// Execute the show command.
///
/// # Errors
///
/// Returns `IssueNotFound` if no issue has the given ID.
pub fn execute(args: &IssueRef, ctx: &Context) -> Result<()> {
    let mut board = ctx.open_board();
    let id = resolve_id(board.repo(), &args.id);

    board.select(&id);
    let Some(issue) = board.selected() else {
        return Err(BoardError::IssueNotFound { id }.into());
    };

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(issue)?);
    } else {
        print!("{}", format_issue_details(issue));
    }
    Ok(())
}
