//! Post-install command execution.
//!
//! Spawning arbitrary shell commands is a process-boundary operation, so it
//! sits behind the [`CommandRunner`] trait and orchestration can be tested
//! with a recording implementation.

use anyhow::{Context as _, Result};
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Runs one shell command with a given working directory.
pub trait CommandRunner: std::fmt::Debug {
    /// Run `command` through the system shell with `dir` as the working
    /// directory, inheriting this process's stdout/stderr, and wait for it
    /// to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the shell cannot be spawned. A non-zero exit is
    /// not an error; it is reported through the returned status.
    fn run_shell(&self, dir: &Path, command: &str) -> Result<ExitStatus>;
}

/// Production [`CommandRunner`] that spawns the system shell.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run_shell(&self, dir: &Path, command: &str) -> Result<ExitStatus> {
        // status() inherits the parent's stdout/stderr, so post-install
        // output lands on the operator's console.
        shell_command(command)
            .current_dir(dir)
            .status()
            .with_context(|| format!("failed to execute: {command}"))
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}
