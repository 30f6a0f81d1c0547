//! Command-line interface for pondi.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::context::{ReleaseVersion, RunContext};
use crate::filter::{filter_checks, filter_hooks};
use crate::git::Git;
use crate::hooks::{HookRunner, SystemExecutor};
use crate::registry::Registry;
use crate::report;
use crate::runner::run_checks;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Pre-release gatekeeper.
///
/// pondi runs a fixed set of release checks and remediation hooks against a
/// repository before a release is cut, and reports what needs fixing.
#[derive(Parser)]
#[command(name = "pondi")]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalOptions {
    /// Be verbose (print check descriptions, info-level logging)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Print debug messages
    #[arg(long, global = true)]
    pub debug: bool,

    /// Load configuration from file (default: .pondi.yml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable checks
    #[arg(long, global = true, value_delimiter = ',', value_name = "NAME1,NAME2")]
    pub disable_checks: Vec<String>,

    /// Disable hooks
    #[arg(long, global = true, value_delimiter = ',', value_name = "NAME1,NAME2")]
    pub disable_hooks: Vec<String>,

    /// Release version (format: 1.2.3), required
    #[arg(long = "version", id = "release", global = true, value_name = "1.2.3")]
    pub release: Option<String>,

    /// Repository to operate on
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all checks and print the current result for each
    Check(CheckArgs),
    /// Run all hooks, stopping at the first failure
    Hooks,
}

/// Output formats for the check command.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Pretty,
    Json,
}

/// Arguments for the check command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
    pub format: Format,
}

/// Everything validated before a check or hook runs.
struct Prepared {
    registry: Registry,
    ctx: RunContext,
}

/// Validate version, config and exclusion lists. Any failure here is a
/// configuration error and nothing has run yet.
fn prepare(opts: &GlobalOptions) -> anyhow::Result<Prepared> {
    let version: ReleaseVersion = match &opts.release {
        Some(v) => v.parse()?,
        None => anyhow::bail!("required flag --version not set"),
    };

    let (config_path, explicit) = match &opts.config {
        Some(p) => (p.clone(), true),
        None => (opts.dir.join(DEFAULT_CONFIG_FILE), false),
    };
    let config = Config::resolve(&config_path, explicit)?;
    debug!(?config, "configuration loaded");

    let registry = Registry::builtin();
    filter_checks(registry.checks(), &opts.disable_checks)?;
    filter_hooks(registry.hooks(), &opts.disable_hooks)?;

    Ok(Prepared {
        registry,
        ctx: RunContext::new(&opts.dir, version),
    })
}

/// Run the check command.
pub fn run_check(opts: &GlobalOptions, args: &CheckArgs) -> anyhow::Result<i32> {
    let prepared = match prepare(opts) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let checks = filter_checks(prepared.registry.checks(), &opts.disable_checks)?;
    let report = run_checks(&prepared.ctx, &checks);

    match args.format {
        Format::Json => report::write_json(prepared.ctx.version.as_str(), &report)?,
        Format::Pretty => report::write_pretty(&report, opts.verbose),
    }

    match &report.result {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(errors) => {
            debug!("{} check(s) failed:\n{}", errors.len(), errors);
            Ok(EXIT_FAILED)
        }
    }
}

/// Run the hooks command.
pub fn run_hooks(opts: &GlobalOptions) -> anyhow::Result<i32> {
    let prepared = match prepare(opts) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let hooks = filter_hooks(prepared.registry.hooks(), &opts.disable_hooks)?;
    let tree = Git::new(&prepared.ctx.dir);
    let runner = HookRunner::new(&tree, &SystemExecutor);

    let result = runner.run(&prepared.ctx, &hooks, |hook| {
        println!("run {}", hook.name);
        if opts.verbose {
            println!("    {}", hook.description);
        }
    });

    match result {
        Ok(()) => Ok(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            Ok(EXIT_FAILED)
        }
    }
}
