use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::ExitStatus;

use assert_cmd::Command;
use tempfile::TempDir;

/// Isolated working directory with its own board data directory.
pub struct BoardWorkspace {
    _temp: TempDir,
    pub root: PathBuf,
    pub data_dir: PathBuf,
}

impl BoardWorkspace {
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().to_path_buf();
        let data_dir = root.join(".civic");
        Self {
            _temp: temp,
            root,
            data_dir,
        }
    }

    /// Path of the persisted issue snapshot.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("civic_board.issues.json")
    }
}

pub struct CbOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CbOutput {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }
}

/// `cb` pointed at the workspace, with logging left at its default level.
pub fn cb_command(workspace: &BoardWorkspace) -> Command {
    let mut cmd = Command::cargo_bin("cb").expect("cb binary");
    cmd.current_dir(&workspace.root)
        .env("CIVIC_BOARD_DIR", &workspace.data_dir)
        .env_remove("RUST_LOG");
    cmd
}

pub fn run_cb<I, S>(workspace: &BoardWorkspace, args: I, label: &str) -> CbOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = cb_command(workspace)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("[{label}] failed to run cb: {e}"));

    let out = CbOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    if !out.status.success() {
        eprintln!("[{label}] exit {:?}\nstderr:\n{}", out.status.code(), out.stderr);
    }
    out
}

/// Run a mutating command with `--json` and return the created issue ID.
pub fn create_issue<I, S>(workspace: &BoardWorkspace, args: I, label: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut full: Vec<std::ffi::OsString> = args
        .into_iter()
        .map(|a| a.as_ref().to_os_string())
        .collect();
    full.push("--json".into());

    let out = run_cb(workspace, full, label);
    assert!(out.status.success(), "[{label}] command failed");
    let value = out.json();
    assert_eq!(value["outcome"], "created", "[{label}] {}", out.stdout);
    value["issue"]["id"]
        .as_str()
        .expect("issue id in outcome")
        .to_string()
}
