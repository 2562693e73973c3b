//! Record destinations: structs whose fields are looked up by name.

use super::{decode_value, Decode, DecodeError};
use crate::{Mapping, Value};

/// Field access for a record being decoded from a mapping.
///
/// This is the runtime half of [`decode_record!`](crate::decode_record);
/// the macro generates one [`field`](RecordFields::field) call per field.
#[derive(Debug, Clone, Copy)]
pub struct RecordFields<'a> {
    map: &'a Mapping,
}

impl<'a> RecordFields<'a> {
    /// Fails unless `value` is a mapping.
    pub fn new(value: &'a Value) -> Result<Self, DecodeError> {
        match value {
            Value::Mapping(map) => Ok(Self { map }),
            other => Err(DecodeError::mismatch("mapping", other)),
        }
    }

    /// Decodes the entry stored under `tag`.
    ///
    /// Returns `Ok(None)` when the source has no such key, leaving the field
    /// at its zero value.
    pub fn field<T: Decode>(&self, tag: &str) -> Result<Option<T>, DecodeError> {
        match self.map.get_str(tag) {
            Some(value) => decode_value(value).map(Some).map_err(|e| e.in_field(tag)),
            None => Ok(None),
        }
    }
}

/// Declares a struct and implements [`Decode`](crate::Decode) for it.
///
/// Each field is read from the source mapping under its own name, or under
/// the tag given after `=>`. Fields missing from the source keep their zero
/// value and source keys without a matching field are ignored.
///
/// ```
/// use cfgpath::{decode_record, decode_value, Value};
///
/// decode_record! {
///     #[derive(Debug, PartialEq)]
///     pub struct Server {
///         pub host: String,
///         pub port: u16 => "listen_port",
///         pub tls: bool,
///     }
/// }
///
/// let source: Value = serde_yaml::from_str("host: example.com\nlisten_port: 8443\nextra: 1")?;
/// let server: Server = decode_value(&source)?;
/// assert_eq!(
///     server,
///     Server { host: "example.com".into(), port: 8443, tls: false }
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! decode_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Decode for $name {
            fn zero() -> Self {
                Self {
                    $($field: <$field_ty as $crate::Decode>::zero(),)*
                }
            }

            fn decode(
                value: &$crate::Value,
            ) -> ::std::result::Result<Self, $crate::DecodeError> {
                let fields = $crate::decode::RecordFields::new(value)?;
                let mut record = <Self as $crate::Decode>::zero();
                $(
                    if let ::std::option::Option::Some(decoded) = fields
                        .field::<$field_ty>($crate::__record_tag!($field $(=> $tag)?))?
                    {
                        record.$field = decoded;
                    }
                )*
                ::std::result::Result::Ok(record)
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __record_tag {
    ($field:ident) => {
        ::std::stringify!($field)
    };
    ($field:ident => $tag:literal) => {
        $tag
    };
}

#[cfg(test)]
mod tests {
    use crate::{decode_value, DecodeErrorKind, PathSegment, Value};

    decode_record! {
        #[derive(Debug, PartialEq)]
        struct Inner {
            first: i64 => "first",
            second: f64 => "second",
            third: bool => "third",
        }
    }

    decode_record! {
        /// Mixes tagged and untagged fields.
        #[derive(Debug, PartialEq)]
        struct Outer {
            #[allow(non_snake_case)]
            MatchFieldName: bool,
            need_a_tag: bool => "need_a_tag",
            inner: Inner => "recursive",
        }
    }

    fn yaml(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn test_record_with_tags() {
        let value = yaml(
            r#"
MatchFieldName: true
need_a_tag: true
recursive:
  first: 1
  second: 2.0
  third: true
"#,
        );
        let outer: Outer = decode_value(&value).unwrap();
        assert_eq!(
            outer,
            Outer {
                MatchFieldName: true,
                need_a_tag: true,
                inner: Inner {
                    first: 1,
                    second: 2.0,
                    third: true,
                },
            }
        );
    }

    #[test]
    fn test_untagged_field_ignores_other_spellings() {
        let value = yaml("match_field_name: true\ninner:\n  first: 5\n");
        let outer: Outer = decode_value(&value).unwrap();
        assert!(!outer.MatchFieldName);
        assert_eq!(outer.inner.first, 0);
    }

    #[test]
    fn test_missing_fields_keep_zero_and_extra_keys_ignored() {
        let value = yaml("recursive:\n  second: 1.5\nunknown: [1, 2]\n");
        let outer: Outer = decode_value(&value).unwrap();
        assert_eq!(
            outer,
            Outer {
                MatchFieldName: false,
                need_a_tag: false,
                inner: Inner {
                    first: 0,
                    second: 1.5,
                    third: false,
                },
            }
        );
    }

    #[test]
    fn test_null_record_is_zero() {
        let outer: Outer = decode_value(&Value::Null).unwrap();
        assert_eq!(outer.inner.second, 0.0);
        assert!(!outer.need_a_tag);
    }

    #[test]
    fn test_record_requires_mapping() {
        let err = decode_value::<Outer>(&Value::from("struct")).unwrap_err();
        assert!(matches!(
            err.kind(),
            DecodeErrorKind::TypeMismatch { expected: "mapping", found: "string" }
        ));
    }

    #[test]
    fn test_field_error_carries_path() {
        let value = yaml("recursive:\n  third: \"yes\"\n");
        let err = decode_value::<Outer>(&value).unwrap_err();
        assert_eq!(
            err.path(),
            &[
                PathSegment::Field("recursive".into()),
                PathSegment::Field("third".into()),
            ]
        );
        assert!(err.to_string().ends_with("(at recursive.third)"));
    }
}
