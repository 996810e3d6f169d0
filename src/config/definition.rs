use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One configured source-to-destination deployment unit.
///
/// Loaded once per run from the YAML configuration document and never
/// mutated afterwards. Field names map to camelCase document keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    /// Location of the repository to deploy from.
    pub repository: String,

    /// Branch to check out; the repository default branch when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Subdirectory of the checkout to deploy; `.` deploys the whole tree.
    #[serde(default = "default_source_dir")]
    pub source_dir: String,

    /// Destination directory the tree is written into.
    pub out_dir: PathBuf,

    /// Glob patterns for source paths that are never copied.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Glob patterns for files whose existing destination copy must never be
    /// replaced. Never blocks creation of a brand-new destination file.
    #[serde(default)]
    pub no_overwrite: Vec<String>,

    /// Glob patterns for destination paths exempt from the prune pass.
    #[serde(default)]
    pub no_remove: Vec<String>,

    /// Shell commands run sequentially in the destination directory after a
    /// sync.
    #[serde(default)]
    pub post_install: Vec<String>,
}

fn default_source_dir() -> String {
    ".".to_string()
}
