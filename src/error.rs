//! Domain-specific error types for the deployment engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors ([`ConfigError`], [`CheckoutError`])
//! while the command handler at the CLI boundary converts them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! Per-file copy failures and per-path deletion failures during
//! reconciliation are deliberately *not* errors: they are logged and the
//! walk continues at file granularity.

use thiserror::Error;

/// Top-level error type for the deployment engine.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at the CLI command boundary.
#[derive(Error, Debug)]
pub enum DeployerError {
    /// Configuration-related error (reading, parsing, bootstrapping).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Failure to obtain a checkout of a configured repository.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),
}

/// Errors that arise from loading or bootstrapping the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file contains invalid YAML or an invalid schema.
    #[error("Invalid config file {path}: {source}")]
    Parse {
        /// Path to the file that could not be parsed.
        path: String,
        /// Underlying deserialization error.
        source: serde_yaml::Error,
    },

    /// The starter config file could not be written.
    #[error("Failed to create config file {path}: {source}")]
    Create {
        /// Path to the file that could not be created.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors that arise while obtaining a checkout.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Cloning the repository failed.
    #[error("Failed to clone {repository}: {message}")]
    Clone {
        /// Location of the repository that could not be cloned.
        repository: String,
        /// Message reported by the version-control client.
        message: String,
    },

    /// The scratch directory for the checkout could not be created.
    #[error("Failed to create scratch directory: {source}")]
    Scratch {
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
