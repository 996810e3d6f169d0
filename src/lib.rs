//! Declarative repository deployment engine.
//!
//! A YAML document lists deployment definitions: a repository to pull from,
//! an optional branch, a source subdirectory, a destination directory, glob
//! filters, and post-install commands. Each run shallow-clones every
//! configured repository into a scratch directory, reconciles the checkout
//! into the destination (copy pass, optional prune pass), and runs the
//! post-install commands with the destination as working directory.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]** — parse and bootstrap the YAML configuration document
//! - **[`filter`]** / **[`sync`]** — glob matching and tree reconciliation
//! - **[`checkout`]** / **[`exec`]** / **[`prompt`]** — process-boundary
//!   collaborators behind traits so orchestration is testable offline
//! - **[`commands`]** — top-level run orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod checkout;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod filter;
pub mod logging;
pub mod prompt;
pub mod sync;
