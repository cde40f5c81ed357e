//! Error types for the combinator toolkit.
//!
//! Only caller bugs are reported as errors: arity misconfiguration,
//! shape mismatches and malformed records. Lookups that find nothing
//! resolve to `None` (or an empty result) instead.
//!
//! # Examples
//!
//! ```rust
//! use ramkit::{Error, Function, arity};
//!
//! let variadic = Function::variadic("sum", |arguments| Ok(arguments.positional()[0].clone()));
//! assert_eq!(
//!     arity(&variadic),
//!     Err(Error::VariadicArity { function: "sum".to_string() })
//! );
//! ```

use thiserror::Error;

/// Errors raised by the currying engine, the combinators, the path engine
/// and the diff engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The arity of a variadic function was requested but never declared.
    #[error("function `{function}` is variadic; declare its arity before currying it")]
    VariadicArity {
        /// The name of the offending function.
        function: String,
    },

    /// A named argument does not match any parameter of the function.
    #[error("function `{function}` has no parameter named `{parameter}`")]
    UnknownParameter {
        /// The name of the function being invoked.
        function: String,
        /// The name supplied by the caller.
        parameter: String,
    },

    /// A parameter was bound both positionally and by name.
    #[error("function `{function}` received parameter `{parameter}` twice")]
    DuplicateArgument {
        /// The name of the function being invoked.
        function: String,
        /// The parameter bound twice.
        parameter: String,
    },

    /// A fixed parameter was left unbound when the function fired.
    #[error("function `{function}` is missing argument `{parameter}`")]
    MissingArgument {
        /// The name of the function being invoked.
        function: String,
        /// The unbound parameter.
        parameter: String,
    },

    /// Named arguments were supplied to a function that only takes positional ones.
    #[error("function `{function}` does not accept named arguments ({count} supplied)")]
    UnexpectedNamedArguments {
        /// The name of the function being invoked.
        function: String,
        /// How many named arguments were supplied.
        count: usize,
    },

    /// An operation received a value of the wrong shape.
    #[error("{operation}: expected {expected}, found {found}")]
    TypeMismatch {
        /// The operation that rejected the value.
        operation: &'static str,
        /// The shape the operation accepts.
        expected: &'static str,
        /// The shape it was given.
        found: &'static str,
    },

    /// The value cannot be used as a mapping key.
    #[error("{found} cannot be used as a mapping key")]
    UnhashableKey {
        /// The shape of the rejected value.
        found: &'static str,
    },

    /// A path write addressed a sequence index that does not exist.
    #[error("index {index} is out of range for a sequence of length {length}")]
    IndexOutOfRange {
        /// The requested index.
        index: i64,
        /// The length of the sequence.
        length: usize,
    },

    /// A record passed to the diff engine has no identity field.
    #[error("record at position {position} has no `{field}` field")]
    MissingIdentity {
        /// The identity field that was looked up.
        field: String,
        /// The position of the record in its collection.
        position: usize,
    },

    /// A registry lookup named a combinator that does not exist.
    #[error("unknown combinator `{name}`")]
    UnknownCombinator {
        /// The requested name.
        name: String,
    },
}

impl Error {
    /// Builds a [`Error::TypeMismatch`].
    pub(crate) const fn mismatch(
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            operation,
            expected,
            found,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::variadic(
        Error::VariadicArity { function: "sum".to_string() },
        "function `sum` is variadic; declare its arity before currying it"
    )]
    #[case::mismatch(
        Error::mismatch("reduce", "a sequence", "a mapping"),
        "reduce: expected a sequence, found a mapping"
    )]
    #[case::out_of_range(
        Error::IndexOutOfRange { index: 7, length: 2 },
        "index 7 is out of range for a sequence of length 2"
    )]
    fn error_messages(#[case] error: Error, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
