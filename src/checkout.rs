//! Obtaining repository checkouts into scratch directories.
//!
//! Fetching a working tree is a process-boundary operation (network, version
//! control client), so it sits behind the [`Checkout`] trait and
//! orchestration can be tested against a fixture-backed implementation.

use std::path::Path;

use crate::error::CheckoutError;

/// Obtains a working tree of a repository at a single point in history.
pub trait Checkout: std::fmt::Debug {
    /// Fetch a shallow, history-less copy of `repository` into `dest`.
    ///
    /// Checks out `branch` when given, the repository default branch
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Clone`] when the working tree cannot be
    /// obtained. This is fatal to the run; the caller still cleans up the
    /// scratch directory.
    fn fetch(
        &self,
        repository: &str,
        branch: Option<&str>,
        dest: &Path,
    ) -> Result<(), CheckoutError>;
}

/// Production [`Checkout`] backed by libgit2.
#[derive(Debug, Default, Clone, Copy)]
pub struct GitCheckout;

impl Checkout for GitCheckout {
    fn fetch(
        &self,
        repository: &str,
        branch: Option<&str>,
        dest: &Path,
    ) -> Result<(), CheckoutError> {
        let mut fetch = git2::FetchOptions::new();
        // Depth 1 keeps the scratch checkout history-less.
        fetch.depth(1);

        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch);
        if let Some(branch) = branch {
            builder.branch(branch);
        }

        builder
            .clone(repository, dest)
            .map(|_| ())
            .map_err(|e| CheckoutError::Clone {
                repository: repository.to_string(),
                message: e.message().to_string(),
            })
    }
}

/// Temporary directory holding one definition's checkout.
///
/// Owned exclusively by the processing of that definition. Removal is
/// best-effort: an explicit [`cleanup`](Self::cleanup) logs failures (a
/// locked file is tolerated, not fatal), and the underlying
/// [`tempfile::TempDir`] still removes the directory on drop if cleanup was
/// never reached.
#[derive(Debug)]
pub struct ScratchDir {
    dir: tempfile::TempDir,
}

impl ScratchDir {
    /// Create a fresh scratch directory.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Scratch`] if the directory cannot be
    /// created.
    pub fn new() -> Result<Self, CheckoutError> {
        let dir = tempfile::Builder::new()
            .prefix("deployer-")
            .tempdir()
            .map_err(|source| CheckoutError::Scratch { source })?;
        Ok(Self { dir })
    }

    /// Path of the scratch directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Remove the scratch directory, tolerating failure.
    pub fn cleanup(self) {
        let path = self.dir.path().to_path_buf();
        tracing::debug!("cleaning up scratch directory {}", path.display());
        if let Err(e) = self.dir.close() {
            tracing::debug!("failed to delete scratch directory {}: {e}", path.display());
        }
    }
}
