//! Release configuration loaded from `.pondi.yml`.
//!
//! The configuration only lists the platforms release artifacts are built
//! for. Keys missing from the file fall back to [`Config::default`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = ".pondi.yml";

/// Target platforms for release artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub goos: Vec<String>,
    pub goarch: Vec<String>,
    pub goarm: Vec<String>,
}

/// On-disk form; every key is optional and unknown keys are rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    goos: Option<Vec<String>>,
    #[serde(default)]
    goarch: Option<Vec<String>>,
    #[serde(default)]
    goarm: Option<Vec<String>>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            goos: strings(&["linux", "darwin"]),
            goarch: strings(&["386", "amd64", "arm64"]),
            goarm: strings(&["6", "7"]),
        }
    }
}

impl Config {
    /// Parse a config from a YAML string.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };

        let defaults = Config::default();
        Ok(Config {
            goos: raw.goos.unwrap_or(defaults.goos),
            goarch: raw.goarch.unwrap_or(defaults.goarch),
            goarm: raw.goarm.unwrap_or(defaults.goarm),
        })
    }

    /// Load a config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        Config::parse(&content).map_err(|e| config_error(path, e))
    }

    /// Load `path`, or fall back to the defaults when the file does not
    /// exist and was not asked for explicitly.
    pub fn resolve<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Self> {
        let path = path.as_ref();
        if !explicit {
            if let Err(e) = fs::metadata(path) {
                if e.kind() == io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), "config file not found, using defaults");
                    return Ok(Config::default());
                }
            }
        }
        Config::load(path)
    }
}

fn config_error(path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Config {
        path: path.to_path_buf(),
        detail: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full() {
        let cfg = Config::parse("goos: [linux]\ngoarch: [amd64]\ngoarm: []\n").unwrap();
        assert_eq!(cfg.goos, vec!["linux"]);
        assert_eq!(cfg.goarch, vec!["amd64"]);
        assert!(cfg.goarm.is_empty());
    }

    #[test]
    fn test_parse_fills_defaults() {
        let cfg = Config::parse("goos:\n  - freebsd\n").unwrap();
        assert_eq!(cfg.goos, vec!["freebsd"]);
        assert_eq!(cfg.goarch, Config::default().goarch);
        assert_eq!(cfg.goarm, Config::default().goarm);
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("goos: [linux]\nplatforms: [x]\n").is_err());
    }

    #[test]
    fn test_resolve_missing_implicit_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = Config::resolve(temp.path().join(DEFAULT_CONFIG_FILE), false).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_resolve_missing_explicit_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yml");
        let err = Config::resolve(&path, true).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("custom.yml"));
    }

    #[test]
    fn test_resolve_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "goarch: [arm64]\n").unwrap();

        let cfg = Config::resolve(&path, false).unwrap();
        assert_eq!(cfg.goarch, vec!["arm64"]);
        assert_eq!(cfg.goos, vec!["linux", "darwin"]);
    }

    #[test]
    fn test_resolve_invalid_file_is_error_even_when_implicit() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(&path, "goos: linux: bad\n").unwrap();
        assert!(Config::resolve(&path, false).is_err());
    }
}
