//! Equality, ordering and conditional application.

use std::cmp::Ordering;

use crate::combinators::holds;
use crate::error::{Error, Result};
use crate::function::Function;
use crate::value::Value;

/// Structural equality.
pub fn equals(left: &Value, right: &Value) -> bool {
    left == right
}

/// Orders two values of comparable shapes.
///
/// Numbers compare numerically (integers against floats included), strings
/// and booleans naturally, and sequences lexicographically.
///
/// # Errors
///
/// Returns a type mismatch for mappings, functions, null, mixed shapes and
/// NaN.
#[allow(clippy::cast_precision_loss)]
pub fn compare(left: &Value, right: &Value) -> Result<Ordering> {
    let ordering = match (left, right) {
        (Value::Int(left), Value::Int(right)) => Some(left.cmp(right)),
        (Value::Float(left), Value::Float(right)) => left.partial_cmp(right),
        (Value::Int(left), Value::Float(right)) => (*left as f64).partial_cmp(right),
        (Value::Float(left), Value::Int(right)) => left.partial_cmp(&(*right as f64)),
        (Value::Str(left), Value::Str(right)) => Some(left.cmp(right)),
        (Value::Bool(left), Value::Bool(right)) => Some(left.cmp(right)),
        (Value::Seq(left), Value::Seq(right)) => {
            for (left, right) in left.iter().zip(right.iter()) {
                match compare(left, right)? {
                    Ordering::Equal => {}
                    unequal => return Ok(unequal),
                }
            }
            Some(left.len().cmp(&right.len()))
        }
        _ => None,
    };
    ordering.ok_or_else(|| {
        Error::mismatch(
            "compare",
            "two comparable values",
            if matches!(
                left,
                Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::Bool(_) | Value::Seq(_)
            ) {
                right.type_name()
            } else {
                left.type_name()
            },
        )
    })
}

/// `left < right`.
///
/// # Errors
///
/// See [`compare`].
pub fn lt(left: &Value, right: &Value) -> Result<bool> {
    Ok(compare(left, right)?.is_lt())
}

/// `left <= right`.
///
/// # Errors
///
/// See [`compare`].
pub fn lte(left: &Value, right: &Value) -> Result<bool> {
    Ok(compare(left, right)?.is_le())
}

/// `left > right`.
///
/// # Errors
///
/// See [`compare`].
pub fn gt(left: &Value, right: &Value) -> Result<bool> {
    Ok(compare(left, right)?.is_gt())
}

/// `left >= right`.
///
/// # Errors
///
/// See [`compare`].
pub fn gte(left: &Value, right: &Value) -> Result<bool> {
    Ok(compare(left, right)?.is_ge())
}

/// Applies `function` to `value` when `test` holds, otherwise returns
/// `value` unchanged.
///
/// # Errors
///
/// Returns any error raised by `test` or `function`.
pub fn when(test: &Function, function: &Function, value: Value) -> Result<Value> {
    if holds(test, &value)? {
        function.apply([value])
    } else {
        Ok(value)
    }
}
