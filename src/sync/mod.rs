//! Tree reconciliation between a fresh checkout and a destination directory.
//!
//! Two passes, both driven by [`PatternFilter`](crate::filter::PatternFilter)
//! decisions over paths relative to the tree root being walked:
//!
//! - the **copy pass** ([`copy_tree`]) mirrors the source tree into the
//!   destination, honoring ignore and no-overwrite patterns;
//! - the **prune pass** ([`prune_tree`]) deletes destination entries that are
//!   absent from the source tree, honoring no-remove patterns.
//!
//! Pattern matching always happens on the path relative to the tree root
//! being compared (source root for copy/ignore decisions, destination root
//! for prune decisions), never on absolute filesystem paths — absolute
//! patterns would not be portable across machines.

mod copy;
mod prune;

pub use copy::{CopyStats, copy_tree};
pub use prune::{PruneStats, prune_tree};

use std::path::Path;

/// Render `path` relative to `root` as a forward-slash string.
///
/// Directories carry a trailing `/` so that directory-only patterns (e.g.
/// `build/*`) can be told apart from file patterns. The root itself renders
/// as the empty string.
pub(crate) fn relative_label(root: &Path, path: &Path, is_dir: bool) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut label = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if is_dir && !label.is_empty() {
        label.push('/');
    }
    label
}
