//! The checks and hooks shipped with pondi.

use anyhow::Context;

use crate::context::RunContext;
use crate::git::Git;
use crate::registry::{Check, Hook};

/// Branch releases are cut from.
pub const RELEASE_BRANCH: &str = "master";

/// All built-in checks, in display order.
pub fn checks() -> Vec<Check> {
    vec![
        Check::new(
            "check-branch-master",
            "test if the current branch is master",
            check_branch_master,
        ),
        Check::new(
            "check-uncommitted-changes",
            "test if the working tree is clean (no uncommitted changes, no untracked files)",
            check_uncommitted_changes,
        ),
        Check::new(
            "check-version-tag",
            "test that the tag for the new version does not exist yet",
            check_version_tag,
        ),
    ]
}

/// All built-in hooks, in execution order.
pub fn hooks() -> Vec<Hook> {
    vec![
        Hook::new(
            "go-mod-download",
            "run 'go mod download' to make sure all Go modules are accessible",
            &["go", "mod", "download"],
        ),
        Hook::new(
            "go-generate",
            "run 'go generate ./...' to make sure all generated code is up to date",
            &["go", "generate", "./..."],
        ),
        Hook::new(
            "gofmt",
            "run 'gofmt -w .' to format all source code",
            &["gofmt", "-w", "."],
        ),
    ]
}

pub fn check_branch_master(ctx: &RunContext) -> anyhow::Result<()> {
    let branch = Git::new(&ctx.dir)
        .current_branch()
        .context("unable to find current branch")?;

    if branch != RELEASE_BRANCH {
        anyhow::bail!("current branch is {:?} instead of {}", branch, RELEASE_BRANCH);
    }
    Ok(())
}

pub fn check_uncommitted_changes(ctx: &RunContext) -> anyhow::Result<()> {
    let changes = Git::new(&ctx.dir)
        .status()
        .context("unable to query working tree status")?;

    if !changes.is_empty() {
        let files: Vec<&str> = changes.iter().map(|c| c.trim()).collect();
        anyhow::bail!("uncommitted changes found: {}", files.join(", "));
    }
    Ok(())
}

pub fn check_version_tag(ctx: &RunContext) -> anyhow::Result<()> {
    let tag = ctx.version.tag();
    let exists = Git::new(&ctx.dir)
        .tag_exists(&tag)
        .context("unable to list tags")?;

    if exists {
        anyhow::bail!("tag {} already exists", tag);
    }
    Ok(())
}
