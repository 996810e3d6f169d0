// Shared helpers for integration tests.
//
// Provides tempfile-backed fixture trees and offline collaborator
// implementations so each integration test can drive the deploy pipeline
// without network access or a real terminal.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Mutex;

use anyhow::Result;
use deployer_cli::checkout::Checkout;
use deployer_cli::error::CheckoutError;
use deployer_cli::exec::CommandRunner;
use deployer_cli::prompt::Prompt;

/// Write a set of `(relative path, content)` files under `root`, creating
/// parent directories as needed.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (relative, content) in files {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create fixture parent");
        }
        std::fs::write(&path, content).expect("write fixture file");
    }
}

/// Recursively copy `src` into `dst`.
fn copy_recursive(src: &Path, dst: &Path) {
    std::fs::create_dir_all(dst).expect("create directory");
    for entry in std::fs::read_dir(src).expect("read fixture directory") {
        let entry = entry.expect("read fixture entry");
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copy_recursive(&from, &to);
        } else {
            std::fs::copy(&from, &to).expect("copy fixture file");
        }
    }
}

/// A [`Checkout`] that "clones" by copying a local fixture directory.
///
/// The fixture stands in for the repository working tree, so tests control
/// exactly what a checkout produces.
#[derive(Debug)]
pub struct FixtureCheckout {
    /// Directory whose contents are produced by every fetch.
    pub fixture: PathBuf,
    requests: Mutex<Vec<(String, Option<String>)>>,
}

impl FixtureCheckout {
    /// Create a checkout provider backed by `fixture`.
    pub fn new(fixture: impl Into<PathBuf>) -> Self {
        Self {
            fixture: fixture.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// The `(repository, branch)` pairs fetched so far.
    pub fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Checkout for FixtureCheckout {
    fn fetch(
        &self,
        repository: &str,
        branch: Option<&str>,
        dest: &Path,
    ) -> Result<(), CheckoutError> {
        self.requests
            .lock()
            .expect("requests lock")
            .push((repository.to_string(), branch.map(String::from)));
        copy_recursive(&self.fixture, dest);
        Ok(())
    }
}

/// A [`Checkout`] that always fails, standing in for an unreachable remote.
#[derive(Debug, Default)]
pub struct UnreachableCheckout;

impl Checkout for UnreachableCheckout {
    fn fetch(
        &self,
        repository: &str,
        _branch: Option<&str>,
        _dest: &Path,
    ) -> Result<(), CheckoutError> {
        Err(CheckoutError::Clone {
            repository: repository.to_string(),
            message: "could not resolve host".to_string(),
        })
    }
}

fn success_status() -> ExitStatus {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        ExitStatus::from_raw(0)
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::ExitStatusExt as _;
        ExitStatus::from_raw(0)
    }
}

/// A [`CommandRunner`] that records commands instead of spawning a shell.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingRunner {
    /// The `(working directory, command)` pairs run so far.
    pub fn commands(&self) -> Vec<(PathBuf, String)> {
        self.commands.lock().expect("commands lock").clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run_shell(&self, dir: &Path, command: &str) -> Result<ExitStatus> {
        self.commands
            .lock()
            .expect("commands lock")
            .push((dir.to_path_buf(), command.to_string()));
        Ok(success_status())
    }
}

/// A [`Prompt`] that plays back a scripted sequence of answers.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answers: Mutex<Vec<bool>>,
}

impl ScriptedPrompt {
    /// Script the answers, consumed in order.
    pub fn with_answers(answers: Vec<bool>) -> Self {
        Self {
            answers: Mutex::new(answers),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn confirm(&self, _question: &str) -> Result<bool> {
        let mut answers = self.answers.lock().expect("answers lock");
        anyhow::ensure!(!answers.is_empty(), "prompt asked more than scripted");
        Ok(answers.remove(0))
    }
}
