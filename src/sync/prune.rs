//! Prune pass: delete destination entries that are absent from the source.
use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::path::Path;

use super::relative_label;
use crate::filter::PatternFilter;

/// Counters reported by one prune pass, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PruneStats {
    /// Destination entries (files or whole directories) deleted.
    pub removed: usize,
    /// Stale entries kept because a no-remove pattern matched.
    pub kept: usize,
    /// Entries whose deletion failed and was skipped.
    pub failed: usize,
}

/// Every relative path present under the source root, split by kind.
#[derive(Debug, Default)]
struct SourceIndex {
    dirs: HashSet<String>,
    files: HashSet<String>,
}

/// Delete entries under `dest_root` that no longer exist under `source_root`.
///
/// First enumerates every directory and file relative path present anywhere
/// under `source_root`, then walks `dest_root` depth-first:
///
/// - a destination directory absent from the source directory set and not
///   protected by a no-remove pattern is deleted recursively, and the walk
///   does not descend into it;
/// - a destination file absent from the source file set and not protected is
///   deleted;
/// - a protected path is left untouched even though it is absent from
///   source — this is how destination-local state (a virtual environment, a
///   data directory) survives repeated deployments;
/// - a deletion failure is logged and the walk continues.
///
/// # Errors
///
/// Returns an error if a directory under either root cannot be read.
/// Individual deletion failures are tolerated and only counted.
pub fn prune_tree(
    source_root: &Path,
    dest_root: &Path,
    no_remove: &PatternFilter,
) -> Result<PruneStats> {
    let mut source = SourceIndex::default();
    index_source(source_root, source_root, &mut source)?;

    let mut stats = PruneStats::default();
    prune_dir(&source, dest_root, dest_root, no_remove, &mut stats)?;
    Ok(stats)
}

/// Record the relative path of every entry under `dir` into `index`.
fn index_source(source_root: &Path, dir: &Path, index: &mut SourceIndex) -> Result<()> {
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            index
                .dirs
                .insert(relative_label(source_root, &path, false));
            index_source(source_root, &path, index)?;
        } else {
            index
                .files
                .insert(relative_label(source_root, &path, false));
        }
    }
    Ok(())
}

/// Recurse over one destination directory level, deleting stale entries.
fn prune_dir(
    source: &SourceIndex,
    dest_root: &Path,
    dir: &Path,
    no_remove: &PatternFilter,
    stats: &mut PruneStats,
) -> Result<()> {
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        if path.is_dir() {
            let relative = relative_label(dest_root, &path, false);
            if source.dirs.contains(&relative) {
                prune_dir(source, dest_root, &path, no_remove, stats)?;
                continue;
            }
            let label = relative_label(dest_root, &path, true);
            let allowed_to_remove = !no_remove.is_match(&label);
            if allowed_to_remove {
                match std::fs::remove_dir_all(&path) {
                    Ok(()) => {
                        tracing::debug!("removed stale directory {label}");
                        stats.removed += 1;
                    }
                    Err(e) => {
                        tracing::warn!("failed to remove {label}: {e}");
                        stats.failed += 1;
                    }
                }
            } else {
                tracing::debug!("keeping {label}: matched a no-remove pattern");
                stats.kept += 1;
            }
        } else {
            let label = relative_label(dest_root, &path, false);
            if source.files.contains(&label) {
                continue;
            }
            let allowed_to_remove = !no_remove.is_match(&label);
            if allowed_to_remove {
                match std::fs::remove_file(&path) {
                    Ok(()) => {
                        tracing::debug!("removed stale file {label}");
                        stats.removed += 1;
                    }
                    Err(e) => {
                        tracing::warn!("failed to remove {label}: {e}");
                        stats.failed += 1;
                    }
                }
            } else {
                tracing::debug!("keeping {label}: matched a no-remove pattern");
                stats.kept += 1;
            }
        }
    }
    Ok(())
}
