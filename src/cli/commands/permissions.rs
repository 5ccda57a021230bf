//! Permissions command: print the policy table for the active role.

use super::Context;
use crate::error::Result;
use crate::format::PermissionRow;

/// Execute the permissions command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(ctx: &Context) -> Result<()> {
    let rows = PermissionRow::table(ctx.role());

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Role: {}", ctx.role());
    for row in &rows {
        let roles: Vec<&str> = row.allowed_roles.iter().map(|r| r.as_str()).collect();
        println!(
            "  [{}] {:<14} {}",
            if row.allowed { "x" } else { " " },
            row.action.as_str(),
            roles.join(", ")
        );
    }
    Ok(())
}
