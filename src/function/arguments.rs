//! Argument lists passed to [`Function`](crate::Function)s.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::value::Value;

/// Inline capacity for positional arguments; combinators take at most three.
const INLINE_ARGUMENTS: usize = 4;

/// Positional arguments.
pub type Positional = SmallVec<[Value; INLINE_ARGUMENTS]>;

/// Named arguments, in the order they were supplied.
pub type Named = IndexMap<String, Value>;

/// The positional and named arguments of one call.
///
/// # Examples
///
/// ```rust
/// use ramkit::{args, Value};
///
/// let first = args![1, scale = 2];
/// let second = args![3, scale = 4];
/// let merged = first.merge(second);
///
/// assert_eq!(merged.positional(), &[Value::Int(1), Value::Int(3)]);
/// assert_eq!(merged.named().get("scale"), Some(&Value::Int(4)));
/// assert_eq!(merged.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    positional: Positional,
    named: Named,
}

impl Arguments {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list from its parts.
    pub const fn from_parts(positional: Positional, named: Named) -> Self {
        Self { positional, named }
    }

    /// Appends a positional argument.
    #[must_use]
    pub fn push(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Sets a named argument, replacing any earlier value for `name`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Returns the positional arguments.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the named arguments.
    pub const fn named(&self) -> &Named {
        &self.named
    }

    /// Counts positional and named arguments together.
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Returns `true` when no argument was supplied.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `later`'s positional arguments after this list's and merges
    /// named arguments with later values winning.
    #[must_use]
    pub fn merge(mut self, later: Self) -> Self {
        self.positional.extend(later.positional);
        self.named.extend(later.named);
        self
    }

    /// Splits the list into its positional and named parts.
    pub fn into_parts(self) -> (Positional, Named) {
        (self.positional, self.named)
    }

    /// Returns the positional arguments, rejecting named ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnexpectedNamedArguments`] when any named argument is
    /// present.
    pub fn into_positional(self, function: &str) -> Result<Positional> {
        if self.named.is_empty() {
            Ok(self.positional)
        } else {
            Err(Error::UnexpectedNamedArguments {
                function: function.to_string(),
                count: self.named.len(),
            })
        }
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_parts(iter.into_iter().collect(), Named::new())
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        values.into_iter().collect()
    }
}

/// Builds [`Arguments`] from positional expressions and `name = value` pairs.
///
/// ```rust
/// use ramkit::{args, Value};
///
/// let arguments = args![1, "two", flag = true];
/// assert_eq!(arguments.positional().len(), 2);
/// assert_eq!(arguments.named().get("flag"), Some(&Value::Bool(true)));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::new()
    };
    ($($tokens:tt)+) => {
        $crate::__args_inner!($crate::Arguments::new(); $($tokens)+)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __args_inner {
    ($arguments:expr;) => {
        $arguments
    };
    ($arguments:expr; $name:ident = $value:expr $(, $($rest:tt)*)?) => {
        $crate::__args_inner!($arguments.with(::std::stringify!($name), $value); $($($rest)*)?)
    };
    ($arguments:expr; $value:expr $(, $($rest:tt)*)?) => {
        $crate::__args_inner!($arguments.push($value); $($($rest)*)?)
    };
}
