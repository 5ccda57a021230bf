//! Version command implementation.

use serde::Serialize;

use crate::error::Result;

#[derive(Serialize)]
struct VersionOutput<'a> {
    version: &'a str,
    build: &'a str,
    schema_version: u32,
}

/// Execute the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build = if cfg!(debug_assertions) {
        "dev"
    } else {
        "release"
    };

    if json {
        let output = VersionOutput {
            version,
            build,
            schema_version: civic_lib::store::SCHEMA_VERSION,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "cb {version} ({build}, snapshot schema v{})",
            civic_lib::store::SCHEMA_VERSION
        );
    }
    Ok(())
}
