//! Conversion of parsed [`Value`]s into typed destinations.
//!
//! Every destination type implements [`Decode`]. The rules are uniform:
//!
//! - a null source yields the destination's zero value ([`Decode::zero`]);
//! - scalars must match the destination's kind (numbers convert between
//!   widths with `as` semantics, so narrowing truncates silently);
//! - sequences and mappings are rebuilt element by element;
//! - records are declared with [`decode_record!`](crate::decode_record).
//!
//! Decoding always builds a fresh value, so a failure never leaves a
//! half-written destination behind.

mod error;
mod record;

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;

use crate::{Mapping, Value};

pub use error::{DecodeError, DecodeErrorKind, PathSegment};
pub use record::RecordFields;

/// A type that can be produced from a configuration [`Value`].
///
/// Types that only provide [`zero`](Decode::zero) have no decoding rule: any
/// non-null source fails with [`DecodeErrorKind::UnsupportedKind`].
///
/// ```
/// use cfgpath::{decode_value, Decode, DecodeError, Value};
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
///
/// impl Decode for Port {
///     fn zero() -> Self {
///         Port(0)
///     }
///
///     fn decode(value: &Value) -> Result<Self, DecodeError> {
///         u16::decode(value).map(Port)
///     }
/// }
///
/// assert_eq!(decode_value::<Port>(&Value::Integer(8080))?, Port(8080));
/// assert_eq!(decode_value::<Port>(&Value::Null)?, Port(0));
/// # Ok::<(), DecodeError>(())
/// ```
pub trait Decode: Sized {
    /// The value a null source decodes to.
    fn zero() -> Self;

    /// Decodes a non-null source value.
    fn decode(_value: &Value) -> Result<Self, DecodeError> {
        Err(DecodeError::unsupported::<Self>())
    }
}

/// Decodes `value` into `T`, mapping null to `T::zero()`.
pub fn decode_value<T: Decode>(value: &Value) -> Result<T, DecodeError> {
    if value.is_null() {
        return Ok(T::zero());
    }
    T::decode(value)
}

/// The "any" destination: keeps the source as it is, including null.
impl Decode for Value {
    fn zero() -> Self {
        Value::Null
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

/// A mapping with "any" keys and values, kept as parsed.
impl Decode for Mapping {
    fn zero() -> Self {
        Mapping::new()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::Mapping(map) => Ok(map.clone()),
            other => Err(DecodeError::mismatch("mapping", other)),
        }
    }
}

impl Decode for String {
    fn zero() -> Self {
        String::new()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(DecodeError::mismatch("string", other)),
        }
    }
}

impl Decode for PathBuf {
    fn zero() -> Self {
        PathBuf::new()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        String::decode(value).map(PathBuf::from)
    }
}

impl Decode for bool {
    fn zero() -> Self {
        false
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        match *value {
            Value::Bool(b) => Ok(b),
            ref other => Err(DecodeError::mismatch("bool", other)),
        }
    }
}

macro_rules! decode_number {
    ($($ty:ty),* $(,)?) => {$(
        impl Decode for $ty {
            fn zero() -> Self {
                0 as $ty
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            fn decode(value: &Value) -> Result<Self, DecodeError> {
                match *value {
                    Value::Integer(i) => Ok(i as $ty),
                    Value::Float(x) => Ok(x as $ty),
                    ref other => Err(DecodeError::mismatch("number", other)),
                }
            }
        }
    )*};
}

decode_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// `None` for null, `Some` for anything that decodes into `T`.
impl<T: Decode> Decode for Option<T> {
    fn zero() -> Self {
        None
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        T::decode(value).map(Some)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        T::decode(value).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn zero() -> Self {
        Vec::new()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let Value::Sequence(items) = value else {
            return Err(DecodeError::mismatch("sequence", value));
        };
        items
            .iter()
            .enumerate()
            .map(|(index, item)| decode_value(item).map_err(|e| e.at_index(index)))
            .collect()
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn zero() -> Self {
        HashMap::default()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let Value::Mapping(map) = value else {
            return Err(DecodeError::mismatch("mapping", value));
        };
        let mut out = HashMap::with_capacity_and_hasher(map.len(), S::default());
        for (key, item) in map.iter() {
            let (k, v) = decode_entry(key, item)?;
            out.insert(k, v);
        }
        Ok(out)
    }
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Ord,
    V: Decode,
{
    fn zero() -> Self {
        BTreeMap::new()
    }

    fn decode(value: &Value) -> Result<Self, DecodeError> {
        let Value::Mapping(map) = value else {
            return Err(DecodeError::mismatch("mapping", value));
        };
        map.iter().map(|(key, item)| decode_entry(key, item)).collect()
    }
}

// Key conversion failures are reported, never skipped.
fn decode_entry<K: Decode, V: Decode>(key: &Value, item: &Value) -> Result<(K, V), DecodeError> {
    let k = decode_value(key).map_err(|e| e.at_key(key))?;
    let v = decode_value(item).map_err(|e| e.at_key(key))?;
    Ok((k, v))
}
