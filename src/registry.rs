//! Named checks and hooks, and the registry that holds them.
//!
//! The registry is built once at startup and is read-only afterwards. Order
//! matters: it is the display order for checks and the execution order for
//! hooks.

use std::collections::HashSet;
use std::fmt;

use crate::context::RunContext;
use crate::error::{Error, Result};

/// Anything with a stable name that can be selected on the command line.
pub trait Named {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
}

/// The executable part of a check: given a run context, pass or fail.
pub trait Probe {
    fn run(&self, ctx: &RunContext) -> anyhow::Result<()>;
}

impl<F> Probe for F
where
    F: Fn(&RunContext) -> anyhow::Result<()>,
{
    fn run(&self, ctx: &RunContext) -> anyhow::Result<()> {
        self(ctx)
    }
}

/// A read-only validation against repository state.
pub struct Check {
    pub name: String,
    pub description: String,
    probe: Box<dyn Probe>,
}

impl Check {
    pub fn new<P: Probe + 'static>(
        name: impl Into<String>,
        description: impl Into<String>,
        probe: P,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            probe: Box::new(probe),
        }
    }

    pub fn run(&self, ctx: &RunContext) -> anyhow::Result<()> {
        self.probe.run(ctx)
    }
}

impl Named for Check {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// A side-effecting command run before releasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub name: String,
    pub description: String,
    /// Program followed by its arguments.
    pub command: Vec<String>,
}

impl Hook {
    pub fn new(name: impl Into<String>, description: impl Into<String>, command: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            command: command.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Named for Hook {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// The ordered lists of checks and hooks known to this process.
#[derive(Debug)]
pub struct Registry {
    checks: Vec<Check>,
    hooks: Vec<Hook>,
}

impl Registry {
    /// Build a registry, rejecting duplicate names within either list.
    pub fn new(checks: Vec<Check>, hooks: Vec<Hook>) -> Result<Self> {
        ensure_unique("check", &checks)?;
        ensure_unique("hook", &hooks)?;
        Ok(Self { checks, hooks })
    }

    /// The checks and hooks shipped with pondi.
    pub fn builtin() -> Self {
        Self {
            checks: crate::builtin::checks(),
            hooks: crate::builtin::hooks(),
        }
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn check_names(&self) -> Vec<&str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.name()).collect()
    }
}

fn ensure_unique<T: Named>(kind: &'static str, items: &[T]) -> Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        if !seen.insert(item.name()) {
            return Err(Error::DuplicateName {
                kind,
                name: item.name().to_string(),
            });
        }
    }
    Ok(())
}
