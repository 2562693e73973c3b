use std::fmt;

use thiserror::Error;

use crate::Value;

/// Failure to convert a [`Value`] into a destination type.
///
/// The error records where inside the decoded value it happened, e.g.
/// `recursive.first` for a record field or `servers[2]` for a sequence
/// element.
#[derive(Debug, Error)]
#[error("{kind} (at {})", location(.path))]
pub struct DecodeError {
    kind: DecodeErrorKind,
    path: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("no decoding rule for destination type `{destination}`")]
    UnsupportedKind { destination: &'static str },
}

/// One step from a value into one of its children.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// A record field, named by its lookup key.
    Field(String),
    /// A sequence element.
    Index(usize),
    /// A mapping entry, named by the source key.
    Key(Value),
}

impl DecodeError {
    pub(crate) fn mismatch(expected: &'static str, found: &Value) -> Self {
        Self::new(DecodeErrorKind::TypeMismatch {
            expected,
            found: found.kind(),
        })
    }

    pub(crate) fn unsupported<T>() -> Self {
        Self::new(DecodeErrorKind::UnsupportedKind {
            destination: std::any::type_name::<T>(),
        })
    }

    fn new(kind: DecodeErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Segments from the decoded value down to the failing child.
    pub fn path(&self) -> &[PathSegment] {
        &self.path
    }

    pub(crate) fn in_field(self, tag: &str) -> Self {
        self.prepend(PathSegment::Field(tag.to_string()))
    }

    pub(crate) fn at_index(self, index: usize) -> Self {
        self.prepend(PathSegment::Index(index))
    }

    pub(crate) fn at_key(self, key: &Value) -> Self {
        self.prepend(PathSegment::Key(key.clone()))
    }

    // Errors bubble up from the innermost value, so segments arrive in reverse.
    fn prepend(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }
}

fn location(path: &[PathSegment]) -> Path<'_> {
    Path(path)
}

struct Path<'a>(&'a [PathSegment]);

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) => write!(f, "{{{key}}}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_root() {
        let err = DecodeError::mismatch("number", &Value::from("x"));
        assert_eq!(
            err.to_string(),
            "type mismatch: expected number, found string (at <root>)"
        );
    }

    #[test]
    fn test_display_nested_path() {
        let err = DecodeError::mismatch("bool", &Value::Integer(1))
            .in_field("third")
            .at_index(2)
            .at_key(&Value::from("servers"))
            .in_field("recursive");
        assert_eq!(
            err.to_string(),
            r#"type mismatch: expected bool, found integer (at recursive{"servers"}[2].third)"#
        );
    }

    #[test]
    fn test_unsupported_names_type() {
        let err = DecodeError::unsupported::<std::fs::File>();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::UnsupportedKind { destination } if destination.ends_with("File")
        ));
    }
}
