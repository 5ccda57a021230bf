//! Doctor command implementation.
//!
//! Reads everything the board depends on without modifying it and reports
//! problems that normal commands recover from silently (for example a
//! corrupt snapshot, which loads as an empty board).

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use civic_lib::store::{STORAGE_KEY, decode_snapshot};
use civic_lib::{FileSlots, Issue, Role, SlotStore};
use serde::Serialize;

use crate::config::{self, CliOverrides, DEFAULT_DATA_DIR};
use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
struct CheckResult {
    name: &'static str,
    status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct DoctorReport {
    ok: bool,
    data_dir: PathBuf,
    checks: Vec<CheckResult>,
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &'static str,
    status: CheckStatus,
    message: Option<String>,
) {
    checks.push(CheckResult {
        name,
        status,
        message,
    });
}

/// Invariant violations in a loaded collection.
fn check_invariants(issues: &[Issue]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut seen = HashSet::new();
    for issue in issues {
        if !seen.insert(issue.id.as_str()) {
            problems.push(format!("duplicate issue id {}", issue.id));
        }
        if issue.title.trim().is_empty() || issue.description.trim().is_empty() {
            problems.push(format!("{} has an empty title or description", issue.id));
        }
        if issue.is_broadcast() && issue.reporter_role != Role::Politician {
            problems.push(format!(
                "{} is a broadcast reported by {}",
                issue.id, issue.reporter_role
            ));
        }
        if issue.comments.iter().any(|c| c.text.trim().is_empty()) {
            problems.push(format!("{} has an empty comment", issue.id));
        }
    }
    problems
}

fn run_checks(data_dir: &Path) -> Vec<CheckResult> {
    let mut checks = Vec::new();

    if data_dir.is_dir() {
        push_check(&mut checks, "data_dir", CheckStatus::Ok, None);
    } else {
        push_check(
            &mut checks,
            "data_dir",
            CheckStatus::Warn,
            Some("missing; it will be created on first write".to_string()),
        );
        return checks;
    }

    match config::load_config(data_dir) {
        Ok(_) => push_check(&mut checks, "config", CheckStatus::Ok, None),
        Err(e) => push_check(&mut checks, "config", CheckStatus::Error, Some(e.to_string())),
    }

    let slots = FileSlots::new(data_dir);
    let raw = match slots.read(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            push_check(
                &mut checks,
                "snapshot",
                CheckStatus::Ok,
                Some("no snapshot yet".to_string()),
            );
            return checks;
        }
        Err(e) => {
            push_check(&mut checks, "snapshot", CheckStatus::Error, Some(e.to_string()));
            return checks;
        }
    };

    match decode_snapshot(&raw) {
        Ok(issues) => {
            push_check(
                &mut checks,
                "snapshot",
                CheckStatus::Ok,
                Some(format!("{} issue(s)", issues.len())),
            );
            let problems = check_invariants(&issues);
            if problems.is_empty() {
                push_check(&mut checks, "invariants", CheckStatus::Ok, None);
            } else {
                push_check(
                    &mut checks,
                    "invariants",
                    CheckStatus::Warn,
                    Some(problems.join("; ")),
                );
            }
        }
        Err(e) => push_check(
            &mut checks,
            "snapshot",
            CheckStatus::Error,
            Some(format!("{e}; the board will load as empty")),
        ),
    }

    checks
}

fn failed_count(checks: &[CheckResult]) -> usize {
    checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count()
}

fn print_report(report: &DoctorReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    println!("Data directory: {}", report.data_dir.display());
    for check in &report.checks {
        let label = match check.status {
            CheckStatus::Ok => "OK",
            CheckStatus::Warn => "WARN",
            CheckStatus::Error => "ERROR",
        };
        match &check.message {
            Some(message) => println!("  {label:<5} {}: {message}", check.name),
            None => println!("  {label:<5} {}", check.name),
        }
    }
    Ok(())
}

/// Execute the doctor command.
///
/// # Errors
///
/// Returns an error if any check fails with status `error`.
pub fn execute(overrides: &CliOverrides, json: bool) -> Result<()> {
    let data_dir = overrides
        .data_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    let checks = run_checks(&data_dir);
    let failed = failed_count(&checks);
    let report = DoctorReport {
        ok: failed == 0,
        data_dir,
        checks,
    };
    print_report(&report, json)?;

    if report.ok {
        Ok(())
    } else {
        Err(CliError::HealthCheck { failed })
    }
}
