//! Glob pattern matching over normalized relative paths.
//!
//! Patterns use shell-style semantics: `*` matches any run of characters
//! (including none, and across path separators), `?` matches one character,
//! and character classes `[...]` are supported. Candidates are always paths
//! relative to the tree root being walked, with forward slashes, and with a
//! trailing `/` on directories so that directory-only patterns such as
//! `build/*` can be told apart from file patterns.

use globset::{Glob, GlobSet, GlobSetBuilder};

/// An ordered set of glob patterns compiled for repeated matching.
///
/// An empty pattern list matches nothing, ever. An unparseable pattern is
/// reported and dropped rather than aborting the run, so it also matches
/// nothing.
#[derive(Debug)]
pub struct PatternFilter {
    set: GlobSet,
}

impl PatternFilter {
    /// Compile `patterns` into a filter.
    ///
    /// Each pattern compiles independently; invalid ones are logged at warn
    /// level and skipped. This constructor never fails.
    #[must_use]
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => tracing::warn!("ignoring unparseable pattern {pattern:?}: {e}"),
            }
        }
        let set = builder.build().unwrap_or_else(|e| {
            tracing::warn!("failed to compile pattern set: {e}");
            GlobSet::empty()
        });
        Self { set }
    }

    /// Returns `true` if `relative` matches any pattern in the set.
    #[must_use]
    pub fn is_match(&self, relative: &str) -> bool {
        self.set.is_match(relative)
    }

    /// Returns `true` if the filter holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}
