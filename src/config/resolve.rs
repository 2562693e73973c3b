//! Key-path lookup inside a loaded document.

use log::trace;

use super::ConfigError;
use crate::Value;

/// Follows `keys` through nested mappings starting at `root`.
///
/// An empty path returns `root` itself. Every key must be found in a
/// mapping; there is no partial result.
pub fn resolve<'a>(root: &'a Value, keys: &[Value]) -> Result<&'a Value, ConfigError> {
    let mut current = root;

    for (depth, key) in keys.iter().enumerate() {
        let Value::Mapping(map) = current else {
            return Err(ConfigError::NotAMap {
                key: key.clone(),
                depth,
                found: current.kind(),
            });
        };
        current = map.get(key).ok_or_else(|| ConfigError::KeyNotFound {
            key: key.clone(),
            depth,
        })?;
    }

    trace!("resolved key path of length {} to a {}", keys.len(), current.kind());
    Ok(current)
}
