//! Selection and loading of the configuration file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, trace};

use super::format::Format;
use super::ConfigError;
use crate::Value;

/// Returns the first candidate that exists and is not a directory.
///
/// Missing candidates and directories are skipped. Any other stat failure
/// (e.g. permission denied on a parent directory) stops the search.
pub fn resolve_file(candidates: &[PathBuf]) -> Result<PathBuf, ConfigError> {
    for candidate in candidates {
        match fs::metadata(candidate) {
            Ok(meta) if meta.is_dir() => {
                debug!("skipping config candidate '{}': is a directory", candidate.display());
            }
            Ok(_) => return Ok(candidate.clone()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("skipping config candidate '{}': not found", candidate.display());
            }
            Err(e) => {
                return Err(ConfigError::StatError {
                    path: candidate.clone(),
                    source: e,
                })
            }
        }
    }
    Err(ConfigError::NoConfigFile {
        candidates: candidates.to_vec(),
    })
}

/// Reads and parses `path` in the format implied by its extension.
///
/// A file that was selected but cannot be read is an error; there is no
/// fallback to later candidates.
pub fn load(path: &Path) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let format = Format::from_path(path);
    debug!("loading config file '{}' as {format}", path.display());
    format.parse(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[derive(Debug)]
struct Document {
    path: PathBuf,
    root: Value,
}

/// A candidate list whose first existing file is loaded on demand.
///
/// Only a successful load is cached; after a failure the next call searches
/// and parses again. Concurrent first calls may each load the file, but
/// all of them observe the same cached tree afterwards.
#[derive(Debug)]
pub struct FileSource {
    candidates: Vec<PathBuf>,
    document: OnceLock<Document>,
}

impl FileSource {
    /// Creates a source without touching the filesystem.
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            document: OnceLock::new(),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// The file the tree was loaded from, once loaded.
    pub fn path(&self) -> Option<&Path> {
        self.document.get().map(|doc| doc.path.as_path())
    }

    /// Returns the parsed document, loading it on first use.
    pub fn tree(&self) -> Result<&Value, ConfigError> {
        if let Some(doc) = self.document.get() {
            trace!("using cached config from '{}'", doc.path.display());
            return Ok(&doc.root);
        }
        let path = resolve_file(&self.candidates)?;
        let root = load(&path)?;
        Ok(&self.document.get_or_init(|| Document { path, root }).root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(file, "{contents}").unwrap();
        file
    }

    #[test]
    fn test_resolve_file_skips_missing_and_directories() {
        let dir = TempDir::new().unwrap();
        let file = yaml_file("a: 1");
        let candidates = vec![
            dir.path().to_path_buf(),
            dir.path().join("missing.yaml"),
            file.path().to_path_buf(),
        ];

        assert_eq!(resolve_file(&candidates).unwrap(), file.path());
    }

    #[test]
    fn test_resolve_file_first_match_wins() {
        let first = yaml_file("a: 1");
        let second = yaml_file("a: 2");
        let candidates = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        assert_eq!(resolve_file(&candidates).unwrap(), first.path());
    }

    #[test]
    fn test_resolve_file_none_found() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().to_path_buf(), dir.path().join("nope.yaml")];

        let result = resolve_file(&candidates);
        assert!(matches!(
            result,
            Err(ConfigError::NoConfigFile { candidates: c }) if c.len() == 2
        ));
        assert!(matches!(resolve_file(&[]), Err(ConfigError::NoConfigFile { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_file_stat_failure_stops_search() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let hidden = locked.join("config.yaml");
        fs::write(&hidden, "a: 1").unwrap();
        let fallback = yaml_file("a: 2");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        let stat = fs::metadata(&hidden);
        let result = resolve_file(&[hidden.clone(), fallback.path().to_path_buf()]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if stat.is_ok() {
            // Running with privileges that ignore directory modes.
            return;
        }
        match result {
            Err(ConfigError::StatError { path, source }) => {
                assert_eq!(path, hidden);
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected a stat error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_parse_error() {
        let file = yaml_file("invalid: yaml: syntax:");
        assert!(matches!(load(file.path()), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let result = load(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_tree_is_cached() {
        let file = yaml_file("a: 1");
        let source = FileSource::new(vec![file.path().to_path_buf()]);
        assert!(source.path().is_none());

        let first = source.tree().unwrap().clone();
        fs::write(file.path(), "a: 2").unwrap();
        assert_eq!(source.tree().unwrap(), &first);
        assert_eq!(source.path(), Some(file.path()));
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("late.yaml");
        let source = FileSource::new(vec![path.clone()]);

        assert!(matches!(source.tree(), Err(ConfigError::NoConfigFile { .. })));

        fs::write(&path, "a: 1").unwrap();
        let root = source.tree().unwrap().as_mapping().unwrap();
        assert_eq!(root.get_str("a"), Some(&Value::Integer(1)));
    }
}
