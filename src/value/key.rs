//! Mapping keys and path segments.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};
use crate::value::Value;

/// A mapping key, also used as a path segment.
///
/// Only scalar values can act as keys. Integer keys double as sequence
/// indices when a path walks through a sequence. Integral floats become
/// integer keys, so keys agree with numeric [`Value`] equality.
///
/// # Examples
///
/// ```rust
/// use ramkit::{Key, Value};
///
/// assert_eq!(Key::try_from(&Value::from("name")), Ok(Key::from("name")));
/// assert_eq!(Key::try_from(&Value::from(1.0)), Ok(Key::Int(1)));
/// assert_eq!(Key::try_from(&Value::from(1.5)), Ok(Key::from(1.5)));
/// assert!(Key::try_from(&Value::seq([])).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// The null key.
    Null,
    /// A boolean key.
    Bool(bool),
    /// An integer key or sequence index.
    Int(i64),
    /// A non-integral float key.
    Float(FloatKey),
    /// A string key.
    Str(String),
}

/// A float usable as a key: equality, ordering and hashing follow the
/// IEEE 754 total order, and every NaN is the same key.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    /// Wraps `float`, collapsing NaN payloads into one.
    pub const fn new(float: f64) -> Self {
        if float.is_nan() {
            Self(f64::NAN)
        } else {
            Self(float)
        }
    }

    /// Returns the wrapped float.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for FloatKey {}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Key {
    /// Returns the integer if this key can address a sequence.
    pub const fn as_index(&self) -> Option<i64> {
        match self {
            Self::Int(index) => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(formatter, "null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{:?}", float.get()),
            Self::Str(string) => write!(formatter, "{string}"),
        }
    }
}

impl TryFrom<&Value> for Key {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(flag) => Ok(Self::Bool(*flag)),
            Value::Int(integer) => Ok(Self::Int(*integer)),
            Value::Float(float) => Ok(Self::from(*float)),
            Value::Str(string) => Ok(Self::Str(string.clone())),
            other => Err(Error::UnhashableKey {
                found: other.type_name(),
            }),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Str(string) => Ok(Self::Str(string)),
            other => Self::try_from(&other),
        }
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Null => Self::Null,
            Key::Bool(flag) => Self::Bool(flag),
            Key::Int(integer) => Self::Int(integer),
            Key::Float(float) => Self::Float(float.get()),
            Key::Str(string) => Self::Str(string),
        }
    }
}

impl From<&str> for Key {
    fn from(string: &str) -> Self {
        Self::Str(string.to_string())
    }
}

impl From<String> for Key {
    fn from(string: String) -> Self {
        Self::Str(string)
    }
}

impl From<i64> for Key {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Key {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
impl From<f64> for Key {
    fn from(float: f64) -> Self {
        let integral = float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64;
        if integral {
            Self::Int(float as i64)
        } else {
            Self::Float(FloatKey::new(float))
        }
    }
}

impl From<bool> for Key {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::null(Value::Null, Key::Null)]
    #[case::boolean(Value::Bool(true), Key::Bool(true))]
    #[case::integer(Value::Int(3), Key::Int(3))]
    #[case::string(Value::from("id"), Key::from("id"))]
    #[case::fraction(Value::Float(0.5), Key::Float(FloatKey::new(0.5)))]
    #[case::integral_float(Value::Float(3.0), Key::Int(3))]
    #[case::negative_zero(Value::Float(-0.0), Key::Int(0))]
    fn scalar_values_become_keys(#[case] value: Value, #[case] expected: Key) {
        assert_eq!(Key::try_from(&value), Ok(expected));
    }

    #[rstest]
    #[case::sequence(Value::seq(Vec::new()), "a sequence")]
    #[case::mapping(Value::empty_map(), "a mapping")]
    fn containers_are_unhashable(#[case] value: Value, #[case] found: &'static str) {
        assert_eq!(Key::try_from(&value), Err(Error::UnhashableKey { found }));
    }

    #[rstest]
    fn display_is_unquoted() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::Int(-1).to_string(), "-1");
        assert_eq!(Key::from(2.5).to_string(), "2.5");
    }

    #[rstest]
    fn float_keys_are_hashable() {
        let mut keys = std::collections::HashSet::new();
        keys.insert(Key::from(1.5));
        keys.insert(Key::from(1.5));
        keys.insert(Key::from(f64::NAN));
        keys.insert(Key::from(-f64::NAN));
        assert_eq!(keys.len(), 2);
        assert_eq!(Value::from(Key::from(1.5)), Value::Float(1.5));
    }
}
