//! The deploy run: process every configured definition in order.
//!
//! Definitions are strictly sequential; the next one does not begin until
//! the previous one's checkout, reconciliation passes, and post-install
//! commands have all completed. Each definition gets its own scratch
//! directory, so no state is shared between them.

use anyhow::{Context as _, Result};

use crate::checkout::{Checkout, GitCheckout, ScratchDir};
use crate::cli::Cli;
use crate::config::{self, Config, Definition};
use crate::exec::{CommandRunner, ShellRunner};
use crate::filter::PatternFilter;
use crate::logging::{DefinitionStatus, Log, Logger};
use crate::prompt::{Prompt, TerminalPrompt};
use crate::sync;

/// Collaborators and options for one deploy run.
///
/// The process-boundary collaborators are trait objects so tests can drive
/// the orchestration with fixture checkouts, recorded command runs, and
/// scripted prompt answers.
pub struct Context<'a> {
    /// Logging backend.
    pub log: &'a dyn Log,
    /// Provider of shallow repository checkouts.
    pub checkout: &'a dyn Checkout,
    /// Runner for post-install shell commands.
    pub runner: &'a dyn CommandRunner,
    /// Interactive confirmation prompt.
    pub prompt: &'a dyn Prompt,
    /// Ask before running each definition.
    pub ask: bool,
    /// Run the prune pass after the copy pass.
    pub upgrade: bool,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("ask", &self.ask)
            .field("upgrade", &self.upgrade)
            .finish_non_exhaustive()
    }
}

/// Run the deploy command with production collaborators.
///
/// Loads the configuration (bootstrapping a starter file when absent and
/// creation is enabled) and processes every definition in order.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined, the config
/// file cannot be loaded or bootstrapped, or a definition fails on checkout
/// or reconciliation.
pub fn run(args: &Cli, log: &Logger) -> Result<()> {
    let config_file = match &args.file {
        Some(file) => file.clone(),
        None => {
            let home = dirs::home_dir().context("cannot determine home directory")?;
            config::config_file_path(&home)
        }
    };

    if !config_file.exists() {
        if args.create {
            config::bootstrap(&config_file)?;
            log.info(&format!(
                "created example config at {}",
                config_file.display()
            ));
            log.info("edit it and run again");
        } else {
            log.warn(&format!("no config file at {}", config_file.display()));
        }
        return Ok(());
    }

    let deploy_config = config::load(&config_file)?;
    log.debug(&format!(
        "loaded {} definitions from {}",
        deploy_config.definitions.len(),
        config_file.display()
    ));

    let checkout = GitCheckout;
    let runner = ShellRunner;
    let prompt = TerminalPrompt;
    let ctx = Context {
        log,
        checkout: &checkout,
        runner: &runner,
        prompt: &prompt,
        ask: args.prompt,
        upgrade: args.upgrade,
    };
    process_all(&deploy_config, &ctx)
}

/// Process every definition in declaration order.
///
/// # Errors
///
/// Stops at the first definition that fails on checkout or reconciliation
/// and propagates its error; earlier definitions keep their results.
pub fn process_all(deploy_config: &Config, ctx: &Context) -> Result<()> {
    for definition in &deploy_config.definitions {
        process_definition(ctx, definition)?;
    }
    Ok(())
}

/// Process one definition: confirm, check out, reconcile, clean up, run
/// post-install commands.
///
/// # Errors
///
/// Returns an error when the checkout or a reconciliation walk fails; the
/// scratch directory is cleaned up first and the definition is recorded as
/// failed. Per-file copy and per-path deletion failures are logged and
/// tolerated, post-install failures are logged and tolerated.
pub fn process_definition(ctx: &Context, definition: &Definition) -> Result<()> {
    let out_dir =
        std::path::absolute(&definition.out_dir).unwrap_or_else(|_| definition.out_dir.clone());

    if ctx.ask {
        let question = format!(
            "Run for {} to write into {}?",
            definition.repository,
            out_dir.display()
        );
        if !ctx.prompt.confirm(&question)? {
            ctx.log
                .record_definition(&definition.repository, DefinitionStatus::Skipped, Some("declined"));
            return Ok(());
        }
    }

    ctx.log
        .stage(&format!("Deploying {}", definition.repository));

    let scratch = match ScratchDir::new() {
        Ok(scratch) => scratch,
        Err(e) => {
            ctx.log.record_definition(
                &definition.repository,
                DefinitionStatus::Failed,
                Some("scratch directory could not be created"),
            );
            return Err(e.into());
        }
    };

    match definition.branch.as_deref() {
        Some(branch) => ctx
            .log
            .info(&format!("cloning {} branch {branch}", definition.repository)),
        None => ctx.log.info(&format!("cloning {}", definition.repository)),
    }
    ctx.log
        .debug(&format!("scratch directory {}", scratch.path().display()));

    if let Err(e) = ctx.checkout.fetch(
        &definition.repository,
        definition.branch.as_deref(),
        scratch.path(),
    ) {
        ctx.log.record_definition(
            &definition.repository,
            DefinitionStatus::Failed,
            Some("checkout failed"),
        );
        scratch.cleanup();
        return Err(e.into());
    }

    let source_root = scratch.path().join(&definition.source_dir);
    let ignore = PatternFilter::new(&definition.ignore);
    let no_overwrite = PatternFilter::new(&definition.no_overwrite);
    let no_remove = PatternFilter::new(&definition.no_remove);

    let copied = sync::copy_tree(&source_root, &out_dir, &ignore, &no_overwrite);
    let pruned = match &copied {
        Ok(_) if ctx.upgrade => Some(sync::prune_tree(&source_root, &out_dir, &no_remove)),
        _ => None,
    };

    scratch.cleanup();

    let copy_stats = match copied {
        Ok(stats) => stats,
        Err(e) => {
            ctx.log.record_definition(
                &definition.repository,
                DefinitionStatus::Failed,
                Some("copy pass failed"),
            );
            return Err(e);
        }
    };
    ctx.log.info(&format!(
        "copied {} files ({} protected, {} ignored)",
        copy_stats.copied, copy_stats.protected, copy_stats.ignored
    ));
    if copy_stats.failed > 0 {
        ctx.log
            .warn(&format!("{} files could not be copied", copy_stats.failed));
    }

    if let Some(pruned) = pruned {
        match pruned {
            Ok(prune_stats) => {
                ctx.log.info(&format!(
                    "removed {} stale entries ({} protected)",
                    prune_stats.removed, prune_stats.kept
                ));
                if prune_stats.failed > 0 {
                    ctx.log.warn(&format!(
                        "{} stale entries could not be removed",
                        prune_stats.failed
                    ));
                }
            }
            Err(e) => {
                ctx.log.record_definition(
                    &definition.repository,
                    DefinitionStatus::Failed,
                    Some("prune pass failed"),
                );
                return Err(e);
            }
        }
    }

    if !definition.post_install.is_empty() {
        ctx.log.info("running post-install commands");
        for command in &definition.post_install {
            ctx.log.info(command);
            match ctx.runner.run_shell(&out_dir, command) {
                Ok(status) if !status.success() => {
                    ctx.log
                        .warn(&format!("post-install command exited with {status}"));
                }
                Ok(_) => {}
                Err(e) => ctx
                    .log
                    .warn(&format!("post-install command failed: {e:#}")),
            }
        }
    }

    ctx.log
        .record_definition(&definition.repository, DefinitionStatus::Ok, None);
    Ok(())
}
