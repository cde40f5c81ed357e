//! The currying engine.
//!
//! [`curry`] wraps a function so that calls supplying fewer arguments than
//! its arity return a new partially applied function instead of firing.
//!
//! # Design Decisions
//!
//! Every partial application closes over its own merged copy of the
//! accumulated arguments, so a partially applied function can be reused:
//! calling it twice with different continuations yields two independent
//! results. Arguments are counted regardless of kind, so named arguments
//! count towards the arity just like positional ones.
//!
//! ```text
//! curry(3, f)(1)(2, 3) = f(1, 2, 3)
//! curry(3, f)(1, 2)(3) = f(1, 2, 3)
//! ```

use tracing::trace;

use crate::error::Result;
use crate::function::{Arguments, Function, arity};
use crate::value::Value;

/// Curries `function` at `arity`.
///
/// Once the accumulated argument count reaches `arity`, `function` fires
/// once with the positional arguments in call order and the named arguments
/// merged with later values winning. Surplus arguments are passed through.
/// With an arity of `0` the first call fires immediately.
///
/// The result declares `arity` as its own arity, and every partial
/// application declares the number of arguments still missing.
///
/// # Examples
///
/// ```rust
/// use ramkit::{args, curry, Function, Value};
///
/// let sum = Function::new("sum", ["a", "b", "c"], |arguments| {
///     let mut total = 0;
///     for argument in arguments {
///         total += argument.expect_int("sum")?;
///     }
///     Ok(Value::Int(total))
/// });
///
/// let curried = curry(3, sum);
/// let partial = curried.call(args![1]).unwrap();
/// let partial = partial.expect_function("example").unwrap();
/// assert_eq!(partial.call(args![2, 3]), Ok(Value::Int(6)));
/// ```
pub fn curry(arity: usize, function: Function) -> Function {
    curry_with(arity, function, Arguments::new())
}

/// Curries `function` at its own [`arity`].
///
/// # Errors
///
/// Returns [`Error::VariadicArity`](crate::Error::VariadicArity) when the
/// function is variadic and has no declared arity.
pub fn curry_auto(function: Function) -> Result<Function> {
    Ok(curry(arity(&function)?, function))
}

fn curry_with(remaining: usize, function: Function, carried: Arguments) -> Function {
    let name = function.name().to_string();
    Function::variadic(name, move |arguments: Arguments| {
        let supplied = arguments.len();
        let merged = carried.clone().merge(arguments);
        if supplied >= remaining {
            trace!(function = function.name(), supplied, "curried function saturated");
            function.call(merged)
        } else {
            let still_missing = remaining - supplied;
            trace!(
                function = function.name(),
                supplied,
                remaining = still_missing,
                "partial application"
            );
            Ok(Value::Function(curry_with(
                still_missing,
                function.clone(),
                merged,
            )))
        }
    })
    .with_arity(remaining)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::args;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn concat() -> Function {
        Function::new("concat", ["a", "b", "c"], |arguments| {
            Ok(Value::from(
                arguments
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(""),
            ))
        })
    }

    fn partial(value: Result<Value>) -> Function {
        match value {
            Ok(Value::Function(function)) => function,
            other => panic!("expected a partial application, got {other:?}"),
        }
    }

    #[rstest]
    fn saturated_in_one_call() {
        assert_eq!(curry(3, concat()).call(args![1, 2, 3]), Ok(Value::from("123")));
    }

    #[rstest]
    fn partial_application_declares_remaining_arity() {
        let first = partial(curry(3, concat()).call(args![1]));
        assert_eq!(arity(&first), Ok(2));
        let second = partial(first.call(args![2]));
        assert_eq!(arity(&second), Ok(1));
        assert_eq!(second.call(args![3]), Ok(Value::from("123")));
    }

    #[rstest]
    fn named_arguments_count_towards_arity() {
        let first = partial(curry(3, concat()).call(args![c = "z"]));
        assert_eq!(first.call(args!["x", "y"]), Ok(Value::from(r#""x""y""z""#)));
    }

    #[rstest]
    fn zero_arity_fires_on_first_call() {
        let constant = Function::new("constant", Vec::<String>::new(), |_| Ok(Value::Int(7)));
        assert_eq!(curry(0, constant).call(Arguments::new()), Ok(Value::Int(7)));
    }

    #[rstest]
    fn surplus_arguments_reach_the_base_function() {
        let count = Function::variadic("count", |arguments| Ok(Value::from(arguments.len())));
        assert_eq!(curry(2, count).call(args![1, 2, 3]), Ok(Value::Int(3)));
    }

    #[rstest]
    fn base_function_fires_once_per_saturation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let tracked = Function::new("tracked", ["a", "b"], move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        });
        let first = partial(curry(2, tracked).call(args![1]));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        first.call(args![2]).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn curry_auto_rejects_undeclared_variadic_functions() {
        let variadic = Function::variadic("variadic", |_| Ok(Value::Null));
        assert!(matches!(
            curry_auto(variadic),
            Err(Error::VariadicArity { .. })
        ));
    }
}
