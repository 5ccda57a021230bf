//! List and feed commands.
//!
//! Both are projections over the loaded collection; neither writes.

use civic_lib::Issue;
use civic_lib::view::{filter_by_status, recent_feed};

use super::Context;
use crate::cli::{FeedArgs, ListArgs};
use crate::error::Result;
use crate::format::format_issue_line;

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ListArgs, ctx: &Context) -> Result<()> {
    let board = ctx.open_board();
    let issues = filter_by_status(board.issues(), args.status);
    print_issues(&issues, ctx, "No issues found.")
}

/// Execute the feed command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn feed(args: &FeedArgs, ctx: &Context) -> Result<()> {
    let limit = args.limit.unwrap_or(ctx.config.board.feed_limit);
    let board = ctx.open_board();
    let issues = recent_feed(board.issues(), limit);
    print_issues(&issues, ctx, "Nothing new.")
}

fn print_issues(issues: &[&Issue], ctx: &Context, empty_message: &str) -> Result<()> {
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(issues)?);
    } else if issues.is_empty() {
        println!("{empty_message}");
    } else {
        for issue in issues {
            println!("{}", format_issue_line(issue, ctx.config.board.truncate_len));
        }
        println!("\n{} issue(s)", issues.len());
    }
    Ok(())
}
