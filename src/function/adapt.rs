//! Function adapters.
//!
//! Small combinators that reshape how a [`Function`] receives its
//! arguments:
//!
//! - [`n_ary`], [`unary`], [`binary`]: truncate the argument list
//! - [`self_arity`]: truncate to the function's own arity
//! - [`partial`]: fix leading arguments
//! - [`flip`]: swap the first two arguments (C combinator)
//! - [`pipe`]: left-to-right composition
//! - [`always`]: ignore all arguments (K combinator)
//! - [`identity`]: return the argument unchanged (I combinator)
//!
//! # Laws
//!
//! - **Double flip identity**: `flip(flip(f))(a, b) == f(a, b)`
//! - **Pipe identity**: `pipe([identity(), f])(x) == f(x)`

use crate::error::Result;
use crate::function::{Arguments, Function, arity};
use crate::value::Value;

/// Returns a function of arity `count` that drops every positional argument
/// past the first `count` before calling `function`.
///
/// This is how callbacks of arity one, two or three are fed from a call
/// site that always supplies three arguments.
///
/// # Examples
///
/// ```rust
/// use ramkit::{n_ary, Function, Value};
///
/// let count = Function::variadic("count", |arguments| Ok(Value::from(arguments.len())));
/// assert_eq!(n_ary(2, count).apply([1, 2, 3]), Ok(Value::Int(2)));
/// ```
pub fn n_ary(count: usize, function: Function) -> Function {
    let name = function.name().to_string();
    Function::variadic(name, move |arguments: Arguments| {
        let mut positional = arguments.into_positional(function.name())?;
        positional.truncate(count);
        function.call(Arguments::from_parts(positional, Default::default()))
    })
    .with_arity(count)
}

/// [`n_ary`] with a count of one.
pub fn unary(function: Function) -> Function {
    n_ary(1, function)
}

/// [`n_ary`] with a count of two.
pub fn binary(function: Function) -> Function {
    n_ary(2, function)
}

/// Truncates calls to `function`'s own [`arity`].
///
/// # Errors
///
/// Returns [`Error::VariadicArity`](crate::Error::VariadicArity) when the
/// arity of `function` is unknown.
///
/// # Examples
///
/// ```rust
/// use ramkit::{self_arity, Function, Value};
///
/// let first = Function::new("first", ["value"], |arguments| Ok(arguments[0].clone()));
/// let adapted = self_arity(first).unwrap();
/// assert_eq!(adapted.apply(["a", "b", "c"]), Ok(Value::from("a")));
/// ```
pub fn self_arity(function: Function) -> Result<Function> {
    Ok(n_ary(arity(&function)?, function))
}

/// Fixes the leading arguments of `function`.
///
/// The result declares the arity still missing when `function`'s arity is
/// known, and stays variadic otherwise.
pub fn partial(function: Function, fixed: Arguments) -> Function {
    let remaining = arity(&function)
        .ok()
        .map(|total| total.saturating_sub(fixed.len()));
    let name = function.name().to_string();
    let partial = Function::variadic(name, move |arguments: Arguments| {
        function.call(fixed.clone().merge(arguments))
    });
    match remaining {
        Some(remaining) => partial.with_arity(remaining),
        None => partial,
    }
}

/// Swaps the first two positional arguments of `function`.
///
/// # Examples
///
/// ```rust
/// use ramkit::{flip, Function, Value};
///
/// let subtract = Function::new("subtract", ["minuend", "subtrahend"], |arguments| {
///     Ok(Value::Int(arguments[0].expect_int("subtract")? - arguments[1].expect_int("subtract")?))
/// });
/// assert_eq!(flip(subtract).apply([3, 10]), Ok(Value::Int(7)));
/// ```
pub fn flip(function: Function) -> Function {
    let name = function.name().to_string();
    Function::new(name, ["second", "first"], move |arguments: &[Value]| {
        let mut swapped = arguments.to_vec();
        swapped.swap(0, 1);
        function.apply(swapped)
    })
}

/// Composes unary functions left to right.
///
/// `pipe([f, g, h])(x)` is `h(g(f(x)))`. An empty pipeline is the identity.
pub fn pipe(functions: impl IntoIterator<Item = Function>) -> Function {
    let functions: Vec<Function> = functions.into_iter().collect();
    Function::new("pipe", ["value"], move |arguments: &[Value]| {
        functions
            .iter()
            .try_fold(arguments[0].clone(), |value, function| function.apply([value]))
    })
}

/// Returns a function that ignores its arguments and yields `value`.
pub fn always(value: Value) -> Function {
    Function::variadic("always", move |_| Ok(value.clone())).with_arity(0)
}

/// Returns the identity function.
pub fn identity() -> Function {
    Function::new("identity", ["value"], |arguments: &[Value]| {
        Ok(arguments[0].clone())
    })
}
