//! Thin wrapper around the `git` binary.
//!
//! Only the queries the release checks and the hook guard need are exposed;
//! each one shells out and reports a non-zero exit as [`Error::Git`].

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::hooks::WorkingTree;

/// A git working copy rooted at `dir`.
#[derive(Debug, Clone)]
pub struct Git {
    dir: PathBuf,
}

impl Git {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Name of the currently checked out branch (empty when HEAD is detached).
    pub fn current_branch(&self) -> Result<String> {
        let out = self.output(&["branch", "--show-current"])?;
        Ok(out.trim_end_matches('\n').to_string())
    }

    /// Entries of `git status --porcelain`, untracked files included.
    pub fn status(&self) -> Result<Vec<String>> {
        let out = self.output(&["status", "--porcelain", "--untracked-files=all"])?;
        Ok(out
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Whether `tag` already exists in the repository.
    pub fn tag_exists(&self, tag: &str) -> Result<bool> {
        let out = self.output(&["tag", "--list", tag])?;
        Ok(out.lines().any(|l| l.trim() == tag))
    }

    fn output(&self, args: &[&str]) -> Result<String> {
        let joined = args.join(" ");
        debug!(dir = %self.dir.display(), "git {}", joined);

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| Error::Git {
                args: joined.clone(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = match stderr.trim() {
                "" => output.status.to_string(),
                s => s.to_string(),
            };
            return Err(Error::Git {
                args: joined,
                detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl WorkingTree for Git {
    fn uncommitted_changes(&self, dir: &Path) -> anyhow::Result<Vec<String>> {
        let changes = if dir == self.dir {
            self.status()?
        } else {
            Git::new(dir).status()?
        };
        Ok(changes)
    }
}
