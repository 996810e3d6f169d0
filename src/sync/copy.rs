//! Copy pass: mirror a source tree into a destination directory.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::relative_label;
use crate::filter::PatternFilter;

/// Counters reported by one copy pass, for logging.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    /// Files copied into the destination.
    pub copied: usize,
    /// Existing destination files left alone because a no-overwrite pattern
    /// matched.
    pub protected: usize,
    /// Files and directories skipped by an ignore pattern.
    pub ignored: usize,
    /// Files whose copy failed and was skipped.
    pub failed: usize,
}

/// Mirror `source_root` into `dest_root`.
///
/// Walks the source tree depth-first (sibling order is not significant):
///
/// - non-ignored directories are created at the destination when missing,
///   ancestors included; ignored directories are skipped entirely, so their
///   descendants are never visited;
/// - non-ignored files are copied unless the destination file already exists
///   and is covered by a no-overwrite pattern — protection never blocks the
///   creation of a brand-new destination file, only replacement;
/// - a copy preserves the source file's permission bits and modification
///   time;
/// - an individual copy failure (e.g. permissions) is logged and the walk
///   continues with the next file.
///
/// # Errors
///
/// Returns an error if the destination root cannot be created or a source
/// directory cannot be read. Individual file copy failures are tolerated and
/// only counted.
pub fn copy_tree(
    source_root: &Path,
    dest_root: &Path,
    ignore: &PatternFilter,
    no_overwrite: &PatternFilter,
) -> Result<CopyStats> {
    let mut stats = CopyStats::default();
    std::fs::create_dir_all(dest_root)
        .with_context(|| format!("creating destination {}", dest_root.display()))?;
    copy_dir(
        source_root,
        source_root,
        dest_root,
        ignore,
        no_overwrite,
        &mut stats,
    )?;
    Ok(stats)
}

/// Recurse over one source directory level.
fn copy_dir(
    source_root: &Path,
    dir: &Path,
    dest_root: &Path,
    ignore: &PatternFilter,
    no_overwrite: &PatternFilter,
    stats: &mut CopyStats,
) -> Result<()> {
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
        let path = entry.path();
        // is_dir follows symlinks, so a directory symlink is recursed into
        // and its contents materialised rather than copying the link itself.
        if path.is_dir() {
            let label = relative_label(source_root, &path, true);
            if ignore.is_match(&label) {
                tracing::debug!("ignoring {label}");
                stats.ignored += 1;
                continue;
            }
            let dest = dest_root.join(path.strip_prefix(source_root).unwrap_or(&path));
            if !dest.exists() {
                std::fs::create_dir_all(&dest)
                    .with_context(|| format!("creating directory {}", dest.display()))?;
            }
            copy_dir(source_root, &path, dest_root, ignore, no_overwrite, stats)?;
        } else {
            let label = relative_label(source_root, &path, false);
            if ignore.is_match(&label) {
                tracing::debug!("ignoring {label}");
                stats.ignored += 1;
                continue;
            }
            let dest = dest_root.join(path.strip_prefix(source_root).unwrap_or(&path));
            if dest.exists() && no_overwrite.is_match(&label) {
                tracing::debug!("keeping existing {label}: matched a no-overwrite pattern");
                stats.protected += 1;
                continue;
            }
            match copy_file(&path, &dest) {
                Ok(()) => stats.copied += 1,
                Err(e) => {
                    tracing::warn!("failed to copy {label}: {e:#}");
                    stats.failed += 1;
                }
            }
        }
    }
    Ok(())
}

/// Copy one file, carrying over its modification time.
///
/// `std::fs::copy` already carries over the permission bits.
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    std::fs::copy(source, dest)
        .with_context(|| format!("copying to {}", dest.display()))?;
    let modified = std::fs::metadata(source)
        .and_then(|m| m.modified())
        .with_context(|| format!("reading modification time of {}", source.display()))?;
    let times = std::fs::FileTimes::new().set_modified(modified);
    std::fs::File::options()
        .write(true)
        .open(dest)
        .and_then(|f| f.set_times(times))
        .with_context(|| format!("preserving modification time of {}", dest.display()))?;
    Ok(())
}
