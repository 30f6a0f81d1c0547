//! Hook runner: fail-fast execution guarded by a clean working tree.
//!
//! The protocol is a small state machine:
//!
//! 1. the working tree must be clean, otherwise no hook runs;
//! 2. hooks run in order and the first failure stops the run;
//! 3. after the last hook the tree must still be clean.
//!
//! Nothing is rolled back when a hook fails. Whatever the hooks changed is
//! left in the working tree for the caller to inspect.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, info};

use crate::context::RunContext;
use crate::registry::{Hook, Named};

/// Source of "is the working tree clean" answers.
pub trait WorkingTree {
    /// Uncommitted changes and untracked files below `dir`, one entry each.
    fn uncommitted_changes(&self, dir: &Path) -> anyhow::Result<Vec<String>>;
}

/// Runs external commands on behalf of hooks.
pub trait CommandExecutor {
    fn execute(&self, dir: &Path, program: &str, args: &[String]) -> anyhow::Result<()>;
}

/// Executes commands as child processes of pondi.
///
/// stdout is discarded and stderr is passed through so the user sees what a
/// failing tool complained about.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn execute(&self, dir: &Path, program: &str, args: &[String]) -> anyhow::Result<()> {
        let status = Command::new(program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("unable to run {}", program))?;

        if !status.success() {
            anyhow::bail!("{}", status);
        }
        Ok(())
    }
}

/// Why a hook run stopped.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("working tree has uncommitted changes, refusing to run hooks:\n{}", .changes.join("\n"))]
    DirtyBefore { changes: Vec<String> },
    #[error("hook {name} failed: {source:#}")]
    HookFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("hooks left uncommitted changes, inspect and commit them:\n{}", .changes.join("\n"))]
    DirtyAfter { changes: Vec<String> },
    #[error("unable to inspect working tree: {0:#}")]
    Inspect(#[source] anyhow::Error),
}

/// Runs hooks against a working tree.
pub struct HookRunner<'a> {
    tree: &'a dyn WorkingTree,
    executor: &'a dyn CommandExecutor,
}

impl<'a> HookRunner<'a> {
    pub fn new(tree: &'a dyn WorkingTree, executor: &'a dyn CommandExecutor) -> Self {
        Self { tree, executor }
    }

    /// Run `hooks` in order. `on_start` is called right before each hook.
    pub fn run<F>(
        &self,
        ctx: &RunContext,
        hooks: &[&Hook],
        mut on_start: F,
    ) -> Result<(), HookError>
    where
        F: FnMut(&Hook),
    {
        let changes = self.changes(&ctx.dir)?;
        if !changes.is_empty() {
            return Err(HookError::DirtyBefore { changes });
        }

        for &hook in hooks {
            on_start(hook);
            debug!(hook = hook.name(), command = ?hook.command, "running hook");
            self.execute(ctx, hook)
                .map_err(|source| HookError::HookFailed {
                    name: hook.name().to_string(),
                    source,
                })?;
        }

        let changes = self.changes(&ctx.dir)?;
        if !changes.is_empty() {
            return Err(HookError::DirtyAfter { changes });
        }

        info!(hooks = hooks.len(), "hooks finished");
        Ok(())
    }

    fn changes(&self, dir: &Path) -> Result<Vec<String>, HookError> {
        self.tree
            .uncommitted_changes(dir)
            .map_err(HookError::Inspect)
    }

    fn execute(&self, ctx: &RunContext, hook: &Hook) -> anyhow::Result<()> {
        let (program, args) = hook
            .command
            .split_first()
            .context("hook has an empty command")?;
        self.executor.execute(&ctx.dir, program, args)
    }
}
