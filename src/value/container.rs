//! The two container shapes combinators dispatch on.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::value::{Mapping, Value};

/// A borrowed view of a value as one of the two container shapes.
///
/// Strings fall through to the sequence shape as a sequence of
/// one-character strings. Everything else is rejected.
///
/// # Examples
///
/// ```rust
/// use ramkit::{map, seq, Container};
///
/// let record = map! { "a" => 1 };
/// assert!(matches!(record.container("map"), Ok(Container::Mapping(_))));
///
/// let items = seq![1, 2];
/// assert!(matches!(items.container("map"), Ok(Container::Sequence(_))));
/// ```
#[derive(Debug, Clone)]
pub enum Container<'a> {
    /// A key/value mapping.
    Mapping(&'a Mapping),
    /// An ordered sequence.
    Sequence(Cow<'a, [Value]>),
}

fn characters(string: &str) -> Vec<Value> {
    string
        .chars()
        .map(|character| Value::Str(character.to_string()))
        .collect()
}

impl Value {
    /// Views this value as a container.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for scalars and functions.
    pub fn container(&self, operation: &'static str) -> Result<Container<'_>> {
        match self {
            Self::Map(entries) => Ok(Container::Mapping(entries)),
            Self::Seq(items) => Ok(Container::Sequence(Cow::Borrowed(items.as_slice()))),
            Self::Str(string) => Ok(Container::Sequence(Cow::Owned(characters(string)))),
            other => Err(Error::mismatch(
                operation,
                "a mapping or a sequence",
                other.type_name(),
            )),
        }
    }

    /// Views this value as a sequence, for operations with no mapping rule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] for mappings, scalars and functions.
    pub fn items(&self, operation: &'static str) -> Result<Cow<'_, [Self]>> {
        match self.container(operation) {
            Ok(Container::Sequence(items)) => Ok(items),
            Ok(Container::Mapping(_)) => Err(Error::mismatch(operation, "a sequence", "a mapping")),
            Err(_) => Err(Error::mismatch(operation, "a sequence", self.type_name())),
        }
    }
}
