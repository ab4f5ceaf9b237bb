//! Shell command installer
//!
//! The command runs in the project directory with:
//! - `PLINTH_UNIT`: the unit id
//! - `PLINTH_PROJECT`: absolute project root
//! - `PLINTH_OPTION_<NAME>`: one per chosen option, name upper-cased

use std::collections::BTreeMap;
use std::path::Path;
use std::process::{Command, Output};

use crate::engine::InstallError;

/// Lines of stderr kept in the error detail
const STDERR_TAIL_LINES: usize = 5;

/// Run `command` for `unit_id` and fail on non-zero exit
pub fn run(
    command: &str,
    unit_id: &str,
    chosen_options: &BTreeMap<String, String>,
    project: &Path,
) -> Result<(), InstallError> {
    let project = std::path::absolute(project)
        .map_err(|e| InstallError::new(format!("cannot resolve project path: {e}")))?;
    let mut cmd = shell(command);
    cmd.current_dir(&project)
        .env("PLINTH_UNIT", unit_id)
        .env("PLINTH_PROJECT", &project);
    for (name, value) in chosen_options {
        cmd.env(option_env_name(name), value);
    }

    tracing::debug!(unit = %unit_id, command = %command, "running install command");
    let output = cmd
        .output()
        .map_err(|e| InstallError::new(format!("failed to start command '{command}': {e}")))?;
    log_output(unit_id, &output);

    if output.status.success() {
        return Ok(());
    }

    let status = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |code| code.to_string());
    let tail = stderr_tail(&output.stderr);
    if tail.is_empty() {
        Err(InstallError::new(format!("command exited with status {status}")))
    } else {
        Err(InstallError::new(format!(
            "command exited with status {status}: {tail}"
        )))
    }
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

/// `linter` -> `PLINTH_OPTION_LINTER`, `node-version` -> `PLINTH_OPTION_NODE_VERSION`
pub fn option_env_name(name: &str) -> String {
    let suffix: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("PLINTH_OPTION_{suffix}")
}

fn log_output(unit_id: &str, output: &Output) {
    for line in String::from_utf8_lossy(&output.stdout).lines() {
        tracing::debug!(unit = %unit_id, "stdout: {line}");
    }
    for line in String::from_utf8_lossy(&output.stderr).lines() {
        tracing::debug!(unit = %unit_id, "stderr: {line}");
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("; ")
}
