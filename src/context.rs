//! Run context shared by every check and hook of one invocation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+$").expect("version pattern is valid"));

/// A release version in strict `MAJOR.MINOR.PATCH` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the git tag the release will be published under.
    pub fn tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl FromStr for ReleaseVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if VERSION_PATTERN.is_match(s) {
            Ok(ReleaseVersion(s.to_string()))
        } else {
            Err(Error::InvalidVersion(s.to_string()))
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable input for a single run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub dir: PathBuf,
    pub version: ReleaseVersion,
}

impl RunContext {
    pub fn new<P: AsRef<Path>>(dir: P, version: ReleaseVersion) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            version,
        }
    }
}
