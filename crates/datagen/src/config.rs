//! Run configuration: an optional TOML file, overridden by command-line flags.
//!
//! ```toml
//! snapshot = "snapshot.json"
//! out_dir = "generated"
//! log = "info"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Host snapshot to extract from.
    pub snapshot: PathBuf,
    /// Directory the text files are written into.
    pub out_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    pub log: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            snapshot: PathBuf::from("snapshot.json"),
            out_dir: PathBuf::from("generated"),
            log: "info".to_owned(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse(&text)
    }

    /// `--config <path>` is read first, then `--snapshot`, `--out` and
    /// `--log` override individual fields.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let args: Vec<String> = args.into_iter().collect();
        let flag = |name: &str| {
            args.iter()
                .skip_while(|a| a.as_str() != name)
                .nth(1)
                .cloned()
        };

        let mut config = match flag("--config") {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::new(),
        };
        if let Some(snapshot) = flag("--snapshot") {
            config.snapshot = snapshot.into();
        }
        if let Some(out) = flag("--out") {
            config.out_dir = out.into();
        }
        if let Some(log) = flag("--log") {
            config.log = log;
        }
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config {}", .0.display())]
    Io(PathBuf, #[source] std::io::Error),

    #[error("parsing config")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.out_dir, Path::new("generated"));
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse("out_dir = \"data\"\nlog = \"debug\"\n").unwrap();
        assert_eq!(config.snapshot, Path::new("snapshot.json"));
        assert_eq!(config.out_dir, Path::new("data"));
        assert_eq!(config.log, "debug");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::parse("threads = 4").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datagen.toml");
        fs::write(&path, "snapshot = \"a.json\"\nout_dir = \"a\"\n").unwrap();

        let config = Config::from_args(args(&[
            "datagen",
            "--config",
            path.to_str().unwrap(),
            "--out",
            "b",
        ]))
        .unwrap();
        assert_eq!(config.snapshot, Path::new("a.json"));
        assert_eq!(config.out_dir, Path::new("b"));
        assert_eq!(config.log, "info");
    }

    #[test]
    fn test_missing_config_file() {
        let err = Config::from_args(args(&["datagen", "--config", "/nonexistent/datagen.toml"]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
