//! Stats command implementation.

use civic_lib::Status;

use super::Context;
use crate::error::Result;
use crate::format::{BoardSummary, format_status_icon};

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &Context) -> Result<()> {
    let board = ctx.open_board();
    let summary = BoardSummary::from_issues(board.issues());

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Total: {}", summary.counts.total);
    for status in Status::ALL {
        println!(
            "  {} {:<12} {}",
            format_status_icon(status),
            status.as_str(),
            summary.counts.get(status)
        );
    }
    println!("Comments: {}", summary.comments);
    if let Some(latest) = summary.latest {
        println!("Latest: {} {}", latest.id, latest.title);
    }
    Ok(())
}
