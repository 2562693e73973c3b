use std::path::PathBuf;
use thiserror::Error;

use crate::Value;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("no configuration file found among {candidates:?}")]
    NoConfigFile { candidates: Vec<PathBuf> },

    #[error("failed to stat config file '{path}': {source}")]
    StatError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {source}")]
    ParseError { path: PathBuf, source: FormatError },

    #[error("cannot look up key {key} at depth {depth}: value is a {found}, not a mapping")]
    NotAMap {
        key: Value,
        depth: usize,
        found: &'static str,
    },

    #[error("key {key} not found at depth {depth}")]
    KeyNotFound { key: Value, depth: usize },
}

/// A document rejected by its parser.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
