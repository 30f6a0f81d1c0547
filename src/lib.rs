//! pondi - pre-release gatekeeper.
//!
//! pondi runs a fixed set of named checks and remediation hooks against a
//! repository before a release is cut. Checks are read-only and all of them
//! run, with their failures collected into one error. Hooks change the
//! working tree, so they only run on a clean tree and stop at the first
//! failure.
//!
//! # Architecture
//!
//! - `registry`: named checks and hooks, built once at startup
//! - `builtin`: the checks and hooks shipped with pondi
//! - `filter`: narrowing a registry list by names to skip
//! - `runner`: the check runner
//! - `hooks`: the hook runner and its clean-tree guard
//! - `multi_error`: aggregation of several failures into one error
//! - `context`: run context and release version
//! - `config`: YAML release configuration
//! - `git`: the `git` queries checks and hooks rely on
//! - `report`: output formatting (pretty, JSON)

pub mod builtin;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod git;
pub mod hooks;
pub mod multi_error;
pub mod registry;
pub mod report;
pub mod runner;

pub use config::Config;
pub use context::{ReleaseVersion, RunContext};
pub use error::{Error, Result};
pub use filter::{filter, filter_checks, filter_hooks};
pub use git::Git;
pub use hooks::{CommandExecutor, HookError, HookRunner, SystemExecutor, WorkingTree};
pub use multi_error::MultiError;
pub use registry::{Check, Hook, Named, Probe, Registry};
pub use runner::{run_checks, CheckOutcome, CheckReport};
