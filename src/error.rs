//! Library error type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a run: configuration, registry and
/// filtering problems, plus failures of the underlying `git` queries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid {kind} name {name:?}")]
    UnknownName { kind: &'static str, name: String },
    #[error("duplicate {kind} name {name:?}")]
    DuplicateName { kind: &'static str, name: String },
    #[error("version {0:?} is invalid (format: 1.2.3)")]
    InvalidVersion(String),
    #[error("error loading config file {}: {detail}", .path.display())]
    Config { path: PathBuf, detail: String },
    #[error("git {args} failed: {detail}")]
    Git { args: String, detail: String },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_name_message() {
        let err = Error::UnknownName {
            kind: "check",
            name: "Z".to_string(),
        };
        assert_eq!(err.to_string(), "invalid check name \"Z\"");
    }

    #[test]
    fn test_invalid_version_message() {
        let err = Error::InvalidVersion("1.2".to_string());
        assert_eq!(err.to_string(), "version \"1.2\" is invalid (format: 1.2.3)");
    }
}
