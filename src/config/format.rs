//! Document formats and their parsers.

use std::fmt;
use std::path::Path;

use super::FormatError;
use crate::Value;

/// The syntax of a configuration file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Toml,
    /// YAML, which also covers JSON documents.
    Yaml,
}

impl Format {
    /// `.toml` files are TOML; everything else, including files without an
    /// extension, is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Format::Toml,
            _ => Format::Yaml,
        }
    }

    /// Parses a whole document into a [`Value`] tree.
    pub fn parse(self, contents: &str) -> Result<Value, FormatError> {
        match self {
            Format::Toml => {
                let table: toml::Table = toml::from_str(contents)?;
                Ok(Value::from(toml::Value::Table(table)))
            }
            Format::Yaml if contents.trim().is_empty() => Ok(Value::Null),
            Format::Yaml => Ok(serde_yaml::from_str(contents)?),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Toml => write!(f, "toml"),
            Format::Yaml => write!(f, "yaml"),
        }
    }
}
