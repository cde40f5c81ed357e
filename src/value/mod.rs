//! Dynamic values operated on by the combinators.
//!
//! Every combinator in this crate works on [`Value`], a tagged union over
//! scalars, the two container shapes ([`Value::Seq`] and [`Value::Map`]) and
//! first-class [`Function`]s.
//!
//! # Sharing
//!
//! Containers are held behind a reference counter, so cloning a `Value` is a
//! pointer copy. Path writes copy only the containers on the way from the root
//! to the modified leaf; every sibling branch stays shared with the input.
//!
//! # Examples
//!
//! ```rust
//! use ramkit::{map, seq, Value};
//!
//! let user = map! { "name" => "ada", "tags" => seq!["admin", "ops"] };
//! assert!(user.is_mapping());
//! assert_eq!(user.to_string(), r#"{"name": "ada", "tags": ["admin", "ops"]}"#);
//! ```

mod container;
mod key;
#[cfg(feature = "serde")]
mod json;

use std::fmt;

use indexmap::IndexMap;

pub use container::Container;
pub use key::{FloatKey, Key};

use crate::error::{Error, Result};
use crate::function::Function;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which makes values `Send + Sync`.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// The element storage of [`Value::Seq`].
pub type Sequence = Vec<Value>;

/// The entry storage of [`Value::Map`]. Insertion order is preserved.
pub type Mapping = IndexMap<Key, Value>;

/// A dynamically shaped value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value. Also stands in for an absent lookup result when one has to
    /// be passed on to a callback.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered sequence.
    Seq(ReferenceCounter<Sequence>),
    /// A key/value mapping.
    Map(ReferenceCounter<Mapping>),
    /// A callable value.
    Function(Function),
}

impl Value {
    /// Builds a sequence value.
    pub fn seq(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Seq(ReferenceCounter::new(items.into_iter().collect()))
    }

    /// Builds a mapping value.
    pub fn map(entries: impl IntoIterator<Item = (Key, Self)>) -> Self {
        Self::Map(ReferenceCounter::new(entries.into_iter().collect()))
    }

    /// Returns an empty mapping.
    pub fn empty_map() -> Self {
        Self::Map(ReferenceCounter::new(Mapping::new()))
    }

    /// Describes the shape of this value for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "a boolean",
            Self::Int(_) => "an integer",
            Self::Float(_) => "a float",
            Self::Str(_) => "a string",
            Self::Seq(_) => "a sequence",
            Self::Map(_) => "a mapping",
            Self::Function(_) => "a function",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for [`Value::Map`].
    pub const fn is_mapping(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    /// Returns `true` for [`Value::Seq`].
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// Truthiness used by predicates: null, `false`, zero, and empty
    /// strings or containers are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Int(integer) => *integer != 0,
            Self::Float(float) => *float != 0.0,
            Self::Str(string) => !string.is_empty(),
            Self::Seq(items) => !items.is_empty(),
            Self::Map(entries) => !entries.is_empty(),
            Self::Function(_) => true,
        }
    }

    /// Returns the integer, if any.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(integer) => Some(*integer),
            _ => None,
        }
    }

    /// Returns the string slice, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(string) => Some(string),
            _ => None,
        }
    }

    /// Returns the entries of a mapping, if this is one.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the elements of a sequence, if this is one.
    pub fn as_sequence(&self) -> Option<&[Self]> {
        match self {
            Self::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the function, or a type mismatch naming `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value is not callable.
    pub fn expect_function(&self, operation: &'static str) -> Result<&Function> {
        match self {
            Self::Function(function) => Ok(function),
            other => Err(Error::mismatch(operation, "a function", other.type_name())),
        }
    }

    /// Returns the mapping entries, or a type mismatch naming `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value is not a mapping.
    pub fn expect_mapping(&self, operation: &'static str) -> Result<&Mapping> {
        self.as_mapping()
            .ok_or_else(|| Error::mismatch(operation, "a mapping", self.type_name()))
    }

    /// Returns the integer, or a type mismatch naming `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] when the value is not an integer.
    pub fn expect_int(&self, operation: &'static str) -> Result<i64> {
        self.as_int()
            .ok_or_else(|| Error::mismatch(operation, "an integer", self.type_name()))
    }
}

// =============================================================================
// Equality
// =============================================================================

#[allow(clippy::cast_precision_loss)]
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Int(left), Self::Float(right)) | (Self::Float(right), Self::Int(left)) => {
                (*left as f64) == *right
            }
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::Seq(left), Self::Seq(right)) => {
                ReferenceCounter::ptr_eq(left, right) || left == right
            }
            (Self::Map(left), Self::Map(right)) => {
                ReferenceCounter::ptr_eq(left, right) || left == right
            }
            (Self::Function(left), Self::Function(right)) => left.same_as(right),
            _ => false,
        }
    }
}

// =============================================================================
// Display
// =============================================================================

fn write_key(formatter: &mut fmt::Formatter<'_>, key: &Key) -> fmt::Result {
    match key {
        Key::Str(string) => write!(formatter, "{string:?}"),
        other => write!(formatter, "{other}"),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(formatter, "null"),
            Self::Bool(flag) => write!(formatter, "{flag}"),
            Self::Int(integer) => write!(formatter, "{integer}"),
            Self::Float(float) => write!(formatter, "{float:?}"),
            Self::Str(string) => write!(formatter, "{string:?}"),
            Self::Seq(items) => {
                write!(formatter, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write!(formatter, "{item}")?;
                }
                write!(formatter, "]")
            }
            Self::Map(entries) => {
                write!(formatter, "{{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        write!(formatter, ", ")?;
                    }
                    write_key(formatter, key)?;
                    write!(formatter, ": {value}")?;
                }
                write!(formatter, "}}")
            }
            Self::Function(function) => write!(formatter, "<function {}>", function.name()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(integer: i64) -> Self {
        Self::Int(integer)
    }
}

impl From<i32> for Value {
    fn from(integer: i32) -> Self {
        Self::Int(i64::from(integer))
    }
}

impl From<u32> for Value {
    fn from(integer: u32) -> Self {
        Self::Int(i64::from(integer))
    }
}

#[allow(clippy::cast_precision_loss)]
impl From<usize> for Value {
    fn from(integer: usize) -> Self {
        i64::try_from(integer).map_or(Self::Float(integer as f64), Self::Int)
    }
}

impl From<f64> for Value {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        Self::Str(string.to_string())
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        Self::Str(string)
    }
}

impl From<Sequence> for Value {
    fn from(items: Sequence) -> Self {
        Self::Seq(ReferenceCounter::new(items))
    }
}

impl From<Mapping> for Value {
    fn from(entries: Mapping) -> Self {
        Self::Map(ReferenceCounter::new(entries))
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(option: Option<T>) -> Self {
        option.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Self> for Value {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        Self::seq(iter)
    }
}

impl FromIterator<(Key, Self)> for Value {
    fn from_iter<I: IntoIterator<Item = (Key, Self)>>(iter: I) -> Self {
        Self::map(iter)
    }
}

// =============================================================================
// Construction Macros
// =============================================================================

/// Builds a [`Value::Seq`] from expressions convertible into [`Value`].
///
/// ```rust
/// use ramkit::{seq, Value};
///
/// let items = seq![1, "two", 3.0];
/// assert_eq!(items.as_sequence().map(<[Value]>::len), Some(3));
/// ```
#[macro_export]
macro_rules! seq {
    () => {
        $crate::Value::seq(::std::vec::Vec::new())
    };
    ($($item:expr),+ $(,)?) => {
        $crate::Value::seq(::std::vec![$($crate::Value::from($item)),+])
    };
}

/// Builds a [`Value::Map`] from `key => value` pairs.
///
/// ```rust
/// use ramkit::{map, Key, Value};
///
/// let record = map! { "id" => 1, "name" => "ada" };
/// assert_eq!(
///     record.as_mapping().and_then(|entries| entries.get(&Key::from("id"))),
///     Some(&Value::Int(1))
/// );
/// ```
#[macro_export]
macro_rules! map {
    () => {
        $crate::Value::empty_map()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Value::map(::std::vec![$(($crate::Key::from($key), $crate::Value::from($value))),+])
    };
}
