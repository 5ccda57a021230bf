//! Configuration management for `civic_board`.
//!
//! Configuration is loaded from `<data_dir>/config.yaml`, with:
//! - Data directory from `--data-dir`, then `CIVIC_BOARD_DIR`, then `./.civic`
//! - Command-line overrides (`--role`) taking precedence over the file
//! - Defaults for every missing key

use std::fs;
use std::path::{Path, PathBuf};

use civic_lib::Role;
use civic_lib::view::DEFAULT_FEED_LIMIT;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Directory used when neither flag nor environment names one.
pub const DEFAULT_DATA_DIR: &str = ".civic";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Default description width in list views.
pub const DEFAULT_TRUNCATE_LEN: usize = 120;

/// Template written by `cb init`.
pub const CONFIG_TEMPLATE: &str = r"# Civic board configuration
# default_role: Citizen     # Citizen | Politician | Moderator | Admin
# feed_limit: 6             # entries shown by `cb feed`
# truncate_len: 120         # description width in list views
";

/// Settings read from `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub default_role: Role,
    pub feed_limit: usize,
    pub truncate_len: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            default_role: Role::Citizen,
            feed_limit: DEFAULT_FEED_LIMIT,
            truncate_len: DEFAULT_TRUNCATE_LEN,
        }
    }
}

/// Overrides supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub data_dir: Option<PathBuf>,
    pub role: Option<Role>,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_dir: PathBuf,
    pub role: Role,
    pub board: BoardConfig,
}

impl ResolvedConfig {
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }
}

/// Load `config.yaml` from `data_dir`. A missing file yields defaults.
///
/// # Errors
///
/// Returns `Config` if the file exists but is not valid YAML for
/// [`BoardConfig`], or `Io` if it cannot be read.
pub fn load_config(data_dir: &Path) -> Result<BoardConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(BoardConfig::default());
        }
        Err(e) => return Err(CliError::Io(e)),
    };

    // A template with every line commented out parses as null.
    if contents.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    }) {
        return Ok(BoardConfig::default());
    }

    serde_yaml::from_str(&contents).map_err(|e| CliError::Config {
        path,
        reason: e.to_string(),
    })
}

/// Resolve data directory, config file and role for this invocation.
///
/// # Errors
///
/// Propagates [`load_config`] failures.
pub fn resolve(overrides: &CliOverrides) -> Result<ResolvedConfig> {
    let data_dir = overrides
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    let board = load_config(&data_dir)?;
    let role = overrides.role.unwrap_or(board.default_role);
    Ok(ResolvedConfig {
        data_dir,
        role,
        board,
    })
}
