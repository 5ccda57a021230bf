//! Command-line interface for `civic_board`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use civic_lib::{Category, Role, Status, StatusFilter};
use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;
use crate::logging;

/// `civic_board` (cb) - Local civic feedback board.
#[derive(Parser, Debug)]
#[command(name = "cb")]
#[command(
    author,
    version,
    about = "Local civic feedback board: issues, broadcasts, comments",
    long_about = None,
    after_help = "Roles are self-selected: permissions gate the workflow, they are not a security boundary."
)]
pub struct Cli {
    /// Act as this role (Citizen, Politician, Moderator, Admin)
    #[arg(short, long, global = true)]
    pub role: Option<Role>,

    /// Board data directory
    #[arg(long, global = true, env = "CIVIC_BOARD_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a board data directory
    Init(InitArgs),

    /// Submit a new issue (Citizen)
    Submit(SubmitArgs),

    /// Post an announcement (Politician)
    Broadcast(BroadcastArgs),

    /// Comment on an issue (any role)
    Comment(CommentArgs),

    /// Change an issue's status (Politician, Moderator, Admin)
    Status(StatusArgs),

    /// Delete an issue (Admin)
    Delete(IssueRef),

    /// List issues, optionally filtered by status
    List(ListArgs),

    /// Recent open reports and broadcasts
    Feed(FeedArgs),

    /// Show issue details and comments
    Show(IssueRef),

    /// Summary counts
    Stats,

    /// Show which actions each role may perform
    Permissions,

    /// Check the data directory, config and snapshot
    Doctor,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Default)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Short title
    pub title: String,

    /// What is wrong and where
    pub description: String,

    /// Category
    #[arg(short, long, default_value = "General")]
    pub category: Category,
}

#[derive(Args, Debug)]
pub struct BroadcastArgs {
    /// Announcement text
    pub text: String,

    /// Category (defaults to General)
    #[arg(short, long)]
    pub category: Option<Category>,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue ID
    pub id: String,

    /// Comment text
    pub text: String,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Issue ID
    pub id: String,

    /// New status (Open, "In Progress", Resolved)
    pub status: Status,
}

#[derive(Args, Debug)]
pub struct IssueRef {
    /// Issue ID
    pub id: String,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Status filter: all, Open, "In Progress", Resolved, Update
    #[arg(short, long, default_value = "all")]
    pub status: StatusFilter,
}

#[derive(Args, Debug, Default)]
pub struct FeedArgs {
    /// Maximum entries (defaults to config feed_limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.log_json)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let overrides = CliOverrides {
        data_dir: cli.data_dir.clone(),
        role: cli.role,
    };
    tracing::debug!(command = cli.command.name(), ?overrides, "dispatching");

    let ctx = || commands::Context::new(&overrides, cli.json);
    match &cli.command {
        Commands::Init(args) => commands::init::execute(args, &overrides)?,
        Commands::Submit(args) => commands::create::submit(args, &ctx()?)?,
        Commands::Broadcast(args) => commands::create::broadcast(args, &ctx()?)?,
        Commands::Comment(args) => commands::comment::execute(args, &ctx()?)?,
        Commands::Status(args) => commands::status::execute(args, &ctx()?)?,
        Commands::Delete(args) => commands::delete::execute(args, &ctx()?)?,
        Commands::List(args) => commands::list::execute(args, &ctx()?)?,
        Commands::Feed(args) => commands::list::feed(args, &ctx()?)?,
        Commands::Show(args) => commands::show::execute(args, &ctx()?)?,
        Commands::Stats => commands::stats::execute(&ctx()?)?,
        Commands::Permissions => commands::permissions::execute(&ctx()?)?,
        Commands::Doctor => commands::doctor::execute(&overrides, cli.json)?,
        Commands::Version => commands::version::execute(cli.json)?,
        Commands::Completions(args) => commands::completions::execute(args),
    }

    Ok(())
}

impl Commands {
    const fn name(&self) -> &'static str {
        match self {
            Self::Init(_) => "init",
            Self::Submit(_) => "submit",
            Self::Broadcast(_) => "broadcast",
            Self::Comment(_) => "comment",
            Self::Status(_) => "status",
            Self::Delete(_) => "delete",
            Self::List(_) => "list",
            Self::Feed(_) => "feed",
            Self::Show(_) => "show",
            Self::Stats => "stats",
            Self::Permissions => "permissions",
            Self::Doctor => "doctor",
            Self::Version => "version",
            Self::Completions(_) => "completions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_role_after_subcommand() {
        let cli = Cli::try_parse_from(["cb", "delete", "iss-1234", "--role", "admin"]).unwrap();
        assert_eq!(cli.role, Some(Role::Admin));
        assert!(matches!(cli.command, Commands::Delete(IssueRef { ref id }) if id == "iss-1234"));
    }

    #[test]
    fn submit_category_defaults_to_general() {
        let cli = Cli::try_parse_from(["cb", "submit", "Pothole", "Large pothole on 5th"]).unwrap();
        let Commands::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.category, Category::General);
    }

    #[test]
    fn status_accepts_spaced_value() {
        let cli = Cli::try_parse_from(["cb", "status", "iss-1", "In Progress"]).unwrap();
        let Commands::Status(args) = cli.command else {
            panic!("expected status");
        };
        assert_eq!(args.status, Status::InProgress);
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(Cli::try_parse_from(["cb", "stats", "--role", "mayor"]).is_err());
    }

    #[test]
    fn list_filter_defaults_to_all() {
        let cli = Cli::try_parse_from(["cb", "list"]).unwrap();
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.status, StatusFilter::All);
    }
}
