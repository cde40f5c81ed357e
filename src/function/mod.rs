//! First-class functions and the arity model.
//!
//! A [`Function`] pairs a body with an explicit description of its
//! parameters. Arity is never guessed at call time: it is either declared
//! with [`Function::with_arity`] or derived from the fixed parameter list the
//! function was built with.
//!
//! # Overview
//!
//! - [`Function::new`]: fixed, named parameters; arity is the parameter count
//! - [`Function::variadic`]: raw access to [`Arguments`]; arity must be declared
//! - [`arity`]: the required argument count of a function
//! - [`curry`] / [`curry_auto`]: partial application until the arity is met
//! - [`n_ary`], [`unary`], [`binary`], [`self_arity`]: argument truncation
//! - [`partial`], [`flip`], [`pipe`], [`always`], [`identity`]: small adapters
//!
//! # Examples
//!
//! ```rust
//! use ramkit::{args, arity, curry, Function, Value};
//!
//! let add = Function::new("add", ["left", "right"], |arguments| {
//!     Ok(Value::Int(arguments[0].expect_int("add")? + arguments[1].expect_int("add")?))
//! });
//! assert_eq!(arity(&add), Ok(2));
//!
//! let curried = curry(2, add);
//! let add_five = curried.call(args![5]).unwrap();
//! let add_five = add_five.expect_function("example").unwrap();
//! assert_eq!(add_five.call(args![3]), Ok(Value::Int(8)));
//! ```

mod adapt;
mod arguments;
mod curry;

use std::fmt;

use tracing::debug;

pub use adapt::{always, binary, flip, identity, n_ary, partial, pipe, self_arity, unary};
pub use arguments::Arguments;
pub use curry::{curry, curry_auto};

use crate::error::{Error, Result};
use crate::value::{ReferenceCounter, Value};

/// Marker for what a function body must be to live inside a [`Function`].
///
/// With the `arc` feature this requires `Send + Sync`; otherwise it holds
/// for every type.
#[cfg(feature = "arc")]
pub trait ThreadSafety: Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Send + Sync> ThreadSafety for T {}

/// Marker for what a function body must be to live inside a [`Function`].
///
/// With the `arc` feature this requires `Send + Sync`; otherwise it holds
/// for every type.
#[cfg(not(feature = "arc"))]
pub trait ThreadSafety {}

#[cfg(not(feature = "arc"))]
impl<T> ThreadSafety for T {}

#[cfg(feature = "arc")]
type Body = dyn Fn(Arguments) -> Result<Value> + Send + Sync;

#[cfg(not(feature = "arc"))]
type Body = dyn Fn(Arguments) -> Result<Value>;

/// The parameter list a function was built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameters {
    /// Named parameters bound in order.
    Fixed(ReferenceCounter<[String]>),
    /// Any number of positional arguments.
    Variadic,
}

#[derive(Clone)]
struct Inner {
    name: ReferenceCounter<str>,
    parameters: Parameters,
    declared_arity: Option<usize>,
    body: ReferenceCounter<Body>,
}

/// A callable value with a known parameter shape.
///
/// Functions are immutable; [`Function::with_arity`] returns a new function
/// sharing the same body.
#[derive(Clone)]
pub struct Function {
    inner: ReferenceCounter<Inner>,
}

impl Function {
    /// Creates a function with fixed, named parameters.
    ///
    /// When invoked, positional arguments fill the parameters in order and
    /// named arguments fill them by name. The body receives the bound values
    /// in parameter order followed by any surplus positional arguments.
    pub fn new<N, P, F>(name: N, parameters: P, body: F) -> Self
    where
        N: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
        F: Fn(&[Value]) -> Result<Value> + ThreadSafety + 'static,
    {
        let name: ReferenceCounter<str> = ReferenceCounter::from(name.into());
        let parameters: ReferenceCounter<[String]> =
            parameters.into_iter().map(Into::into).collect();
        let bound_name = ReferenceCounter::clone(&name);
        let bound_parameters = ReferenceCounter::clone(&parameters);
        let body = move |arguments: Arguments| {
            let bound = bind(&bound_name, &bound_parameters, arguments)?;
            body(&bound)
        };
        Self {
            inner: ReferenceCounter::new(Inner {
                name,
                parameters: Parameters::Fixed(parameters),
                declared_arity: None,
                body: ReferenceCounter::new(body),
            }),
        }
    }

    /// Creates a function that receives its [`Arguments`] untouched.
    ///
    /// Variadic functions have no inferable arity; attach one with
    /// [`Function::with_arity`] before currying.
    pub fn variadic<N, F>(name: N, body: F) -> Self
    where
        N: Into<String>,
        F: Fn(Arguments) -> Result<Value> + ThreadSafety + 'static,
    {
        Self {
            inner: ReferenceCounter::new(Inner {
                name: ReferenceCounter::from(name.into()),
                parameters: Parameters::Variadic,
                declared_arity: None,
                body: ReferenceCounter::new(body),
            }),
        }
    }

    /// Returns a copy of this function carrying explicit arity metadata.
    #[must_use]
    pub fn with_arity(&self, arity: usize) -> Self {
        let mut inner = (*self.inner).clone();
        inner.declared_arity = Some(arity);
        Self {
            inner: ReferenceCounter::new(inner),
        }
    }

    /// Returns the name given at construction.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the parameter list given at construction.
    pub fn parameters(&self) -> &Parameters {
        &self.inner.parameters
    }

    /// Returns the explicitly declared arity, if any.
    pub fn declared_arity(&self) -> Option<usize> {
        self.inner.declared_arity
    }

    /// Invokes the function.
    ///
    /// # Errors
    ///
    /// Returns binding errors for fixed-parameter functions and whatever the
    /// body itself reports.
    pub fn call(&self, arguments: Arguments) -> Result<Value> {
        (self.inner.body)(arguments)
    }

    /// Invokes the function with positional arguments only.
    ///
    /// # Errors
    ///
    /// See [`Function::call`].
    pub fn apply<I>(&self, arguments: I) -> Result<Value>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.call(arguments.into_iter().map(Into::into).collect())
    }

    /// Returns `true` when both handles share one body.
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(
            ReferenceCounter::as_ptr(&self.inner.body),
            ReferenceCounter::as_ptr(&other.inner.body),
        )
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Function")
            .field("name", &self.name())
            .field("parameters", self.parameters())
            .field("declared_arity", &self.declared_arity())
            .finish_non_exhaustive()
    }
}

fn bind(function: &str, parameters: &[String], arguments: Arguments) -> Result<Vec<Value>> {
    let (positional, named) = arguments.into_parts();
    let mut slots: Vec<Option<Value>> = vec![None; parameters.len()];
    let mut surplus = Vec::new();

    for (index, value) in positional.into_iter().enumerate() {
        match slots.get_mut(index) {
            Some(slot) => *slot = Some(value),
            None => surplus.push(value),
        }
    }

    for (parameter, value) in named {
        let position = parameters
            .iter()
            .position(|candidate| *candidate == parameter)
            .ok_or_else(|| Error::UnknownParameter {
                function: function.to_string(),
                parameter: parameter.clone(),
            })?;
        if slots[position].is_some() {
            return Err(Error::DuplicateArgument {
                function: function.to_string(),
                parameter,
            });
        }
        slots[position] = Some(value);
    }

    let mut bound = slots
        .into_iter()
        .zip(parameters)
        .map(|(slot, parameter)| {
            slot.ok_or_else(|| Error::MissingArgument {
                function: function.to_string(),
                parameter: parameter.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    bound.extend(surplus);
    Ok(bound)
}

/// Returns the number of required arguments of `function`.
///
/// Declared arity wins; otherwise the fixed parameter count is used.
///
/// # Errors
///
/// Returns [`Error::VariadicArity`] for a variadic function with no declared
/// arity.
///
/// # Examples
///
/// ```rust
/// use ramkit::{arity, Function, Value};
///
/// let pair = Function::new("pair", ["left", "right"], |arguments| {
///     Ok(Value::seq(arguments.to_vec()))
/// });
/// assert_eq!(arity(&pair), Ok(2));
/// assert_eq!(arity(&pair.with_arity(1)), Ok(1));
/// ```
pub fn arity(function: &Function) -> Result<usize> {
    if let Some(declared) = function.declared_arity() {
        return Ok(declared);
    }
    match function.parameters() {
        Parameters::Fixed(parameters) => Ok(parameters.len()),
        Parameters::Variadic => {
            debug!(function = function.name(), "arity requested for variadic function");
            Err(Error::VariadicArity {
                function: function.name().to_string(),
            })
        }
    }
}
