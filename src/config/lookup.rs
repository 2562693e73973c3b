use std::path::{Path, PathBuf};

use super::resolve::resolve;
use super::source::FileSource;
use crate::decode::{decode_value, Decode};
use crate::{Error, Value};

/// Typed access to values stored in a configuration file.
///
/// The file is the first of the candidate paths that exists. It is read
/// on the first lookup, not at construction, and the parsed document is
/// kept for later lookups.
///
/// ## Example
///
/// ```no_run
/// use cfgpath::{path, Config};
/// use std::collections::HashMap;
///
/// let config = Config::new(["./app.local.yaml", "./app.yaml", "/etc/app.toml"]);
///
/// let mut name = String::new();
/// config.config(&mut name, path!["app", "name"])?;
///
/// let limits: HashMap<String, u32> = config.get(path!["limits"])?;
/// # Ok::<(), cfgpath::Error>(())
/// ```
#[derive(Debug)]
pub struct Config {
    source: FileSource,
}

impl Config {
    /// Creates a configuration from candidate file paths, in priority order.
    ///
    /// No file I/O happens here.
    pub fn new<I, P>(candidates: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            source: FileSource::new(
                candidates
                    .into_iter()
                    .map(|p| p.as_ref().to_path_buf())
                    .collect(),
            ),
        }
    }

    /// Stores the value found under `keys` in `dest`.
    ///
    /// `dest` is only written when the whole lookup and decode succeeded.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if a key is a sequence or mapping. This
    ///   is checked before the file is loaded.
    /// - [`Error::Config`] if no file could be loaded or a key is missing.
    /// - [`Error::Decode`] if the value does not fit `T`.
    pub fn config<T, K>(&self, dest: &mut T, keys: K) -> Result<(), Error>
    where
        T: Decode,
        K: IntoIterator,
        K::Item: Into<Value>,
    {
        *dest = self.get(keys)?;
        Ok(())
    }

    /// Decodes the value found under `keys` into a new `T`.
    ///
    /// See [`config`](Self::config) for the failure cases.
    pub fn get<T, K>(&self, keys: K) -> Result<T, Error>
    where
        T: Decode,
        K: IntoIterator,
        K::Item: Into<Value>,
    {
        let keys = key_path(keys)?;
        let root = self.source.tree()?;
        let value = resolve(root, &keys)?;
        Ok(decode_value(value)?)
    }

    pub fn candidates(&self) -> &[PathBuf] {
        self.source.candidates()
    }

    /// The file the configuration was read from, once it has been loaded.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.path()
    }
}

fn key_path<K>(keys: K) -> Result<Vec<Value>, Error>
where
    K: IntoIterator,
    K::Item: Into<Value>,
{
    keys.into_iter()
        .map(Into::<Value>::into)
        .enumerate()
        .map(|(depth, key)| {
            if key.is_scalar() {
                Ok(key)
            } else {
                Err(Error::InvalidArgument(format!(
                    "key at depth {depth} is a {}, keys must be scalars",
                    key.kind()
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{path, ConfigError};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn config_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_new_does_no_io() {
        let config = Config::new(["/nonexistent/a.yaml", "/nonexistent/b.toml"]);
        assert_eq!(config.candidates().len(), 2);
        assert!(config.source_path().is_none());
    }

    #[test]
    fn test_config_reads_value() {
        let file = config_file(".yaml", "server:\n  port: 8080\n");
        let config = Config::new([file.path()]);

        let mut port = 0u16;
        config.config(&mut port, path!["server", "port"]).unwrap();
        assert_eq!(port, 8080);
        assert_eq!(config.source_path(), Some(file.path()));
    }

    #[test]
    fn test_toml_file() {
        let file = config_file(".toml", "[limits]\ncpu = 4\nmemory = 512\n");
        let config = Config::new([file.path()]);

        let limits: HashMap<String, u32> = config.get(path!["limits"]).unwrap();
        assert_eq!(limits["memory"], 512);
    }

    #[test]
    fn test_non_scalar_key_rejected_before_load() {
        let dir = TempDir::new().unwrap();
        let config = Config::new([dir.path().join("missing.yaml")]);

        let mut value = Value::Null;
        let result = config.config(&mut value, [Value::from("a"), Value::Sequence(vec![])]);
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = config.config(&mut value, path!["a"]);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::NoConfigFile { .. }))
        ));
    }

    #[test]
    fn test_failed_decode_leaves_destination_untouched() {
        let file = config_file(".yaml", "list: [1, 2, three]\n");
        let config = Config::new([file.path()]);

        let mut list = vec![7i64];
        let result = config.config(&mut list, path!["list"]);
        assert!(matches!(result, Err(Error::Decode(_))));
        assert_eq!(list, [7]);
    }

    #[test]
    fn test_failed_lookup_leaves_destination_untouched() {
        let file = config_file(".yaml", "a: 1\n");
        let config = Config::new([file.path()]);

        let mut s = String::from("unchanged");
        let result = config.config(&mut s, path!["b"]);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::KeyNotFound { .. }))
        ));
        assert_eq!(s, "unchanged");
    }
}
