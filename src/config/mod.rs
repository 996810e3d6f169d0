//! The declarative configuration document.
//!
//! Lives at `~/.deployer/deployer.yaml` by default. The home directory is
//! resolved once at the entry point and passed in explicitly so nothing in
//! here reads ambient process state.

mod definition;

pub use definition::Definition;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Directory under the user's home that holds the config file.
const CONFIG_DIR: &str = ".deployer";

/// File name of the configuration document.
const CONFIG_FILE: &str = "deployer.yaml";

/// Starter document written when no config file exists yet.
const EXAMPLE_CONFIG: &str = "\
definitions:
  - repository: https://github.com/you/your-project.git
    branch: main
    sourceDir: .
    outDir: /srv/your-project
    ignore:
      - \".*/*\"
    noOverwrite:
      - conf/local.yaml
    noRemove:
      - venv/*
    postInstall:
      - echo deployed
";

/// Ordered sequence of deployment definitions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Definitions, processed in declaration order.
    pub definitions: Vec<Definition>,
}

/// Default config file location under `home`.
#[must_use]
pub fn config_file_path(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load the configuration document at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if it is not a valid configuration document.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Write a starter config with one illustrative definition to `path`,
/// creating missing parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Create`] if the directory or file cannot be
/// written.
pub fn bootstrap(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Create {
            path: path.display().to_string(),
            source,
        })?;
    }
    std::fs::write(path, EXAMPLE_CONFIG).map_err(|source| ConfigError::Create {
        path: path.display().to_string(),
        source,
    })
}
