//! Tests for the arity model and the currying engine.

use proptest::prelude::*;
use ramkit::{Arguments, Error, Function, Value, args, arity, curry, curry_auto};
use rstest::rstest;

fn sum3() -> Function {
    Function::new("sum3", ["a", "b", "c"], |arguments| {
        let mut total = 0_i64;
        for argument in &arguments[..3] {
            total = total.wrapping_add(argument.expect_int("sum3")?);
        }
        Ok(Value::Int(total))
    })
}

/// Records its arguments verbatim so that argument order can be observed.
fn collect(count: usize) -> Function {
    Function::variadic("collect", |arguments: Arguments| {
        Ok(Value::seq(arguments.positional().to_vec()))
    })
    .with_arity(count)
}

fn call_in_chunks(function: &Function, chunks: &[Vec<Value>]) -> Result<Value, Error> {
    let mut current = Value::Function(function.clone());
    for chunk in chunks {
        let callable = current.expect_function("chunk")?.clone();
        current = callable.call(chunk.iter().cloned().collect())?;
    }
    Ok(current)
}

fn split(values: &[Value], cuts: &[usize]) -> Vec<Vec<Value>> {
    let mut cuts: Vec<usize> = cuts
        .iter()
        .map(|cut| cut % values.len())
        .filter(|cut| *cut > 0)
        .collect();
    cuts.sort_unstable();
    cuts.dedup();

    let mut chunks = Vec::new();
    let mut start = 0;
    for cut in cuts {
        chunks.push(values[start..cut].to_vec());
        start = cut;
    }
    chunks.push(values[start..].to_vec());
    chunks
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
fn test_curry_one_then_two() {
    let curried = curry(3, sum3());
    let partial = curried.call(args![1]).unwrap();
    let partial = partial.expect_function("test").unwrap();

    assert_eq!(partial.call(args![2, 3]), Ok(Value::Int(6)));
}

#[rstest]
#[case::all_at_once(vec![vec![1, 2, 3]])]
#[case::one_by_one(vec![vec![1], vec![2], vec![3]])]
#[case::two_then_one(vec![vec![1, 2], vec![3]])]
fn test_curry_every_split_agrees(#[case] chunks: Vec<Vec<i64>>) {
    let chunks: Vec<Vec<Value>> = chunks
        .into_iter()
        .map(|chunk| chunk.into_iter().map(Value::from).collect())
        .collect();
    assert_eq!(call_in_chunks(&curry(3, sum3()), &chunks), Ok(Value::Int(6)));
}

#[rstest]
fn test_partial_application_declares_remaining_arity() {
    let curried = curry(3, sum3());
    assert_eq!(arity(&curried), Ok(3));

    let partial = curried.call(args![1]).unwrap();
    assert_eq!(arity(partial.expect_function("test").unwrap()), Ok(2));
}

#[rstest]
fn test_named_arguments_count_towards_arity() {
    let curried = curry(3, sum3());
    let partial = curried.call(args![c = 10]).unwrap();
    let partial = partial.expect_function("test").unwrap();

    assert_eq!(partial.call(args![1, 2]), Ok(Value::Int(13)));
}

#[rstest]
fn test_surplus_arguments_pass_through() {
    let curried = curry(2, collect(2));
    assert_eq!(curried.call(args![1, 2, 3]), Ok(ramkit::seq![1, 2, 3]));
}

#[rstest]
fn test_curry_auto_requires_known_arity() {
    assert!(curry_auto(sum3()).is_ok());
    assert_eq!(
        curry_auto(Function::variadic("raw", |_| Ok(Value::Null))).unwrap_err(),
        Error::VariadicArity {
            function: "raw".to_string()
        }
    );
}

#[rstest]
fn test_unknown_named_argument_is_rejected_on_saturation() {
    let curried = curry(1, sum3().with_arity(1));
    assert_eq!(
        curried.call(args![z = 1]),
        Err(Error::UnknownParameter {
            function: "sum3".to_string(),
            parameter: "z".to_string()
        })
    );
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Completeness: any split of N arguments yields the direct call result.
    #[test]
    fn prop_curry_completeness(
        values in prop::collection::vec(any::<i64>(), 1..6),
        cuts in prop::collection::vec(any::<usize>(), 0..5),
    ) {
        let values: Vec<Value> = values.into_iter().map(Value::from).collect();
        let function = collect(values.len());
        let direct = function.call(values.iter().cloned().collect());
        let chunks = split(&values, &cuts);

        prop_assert_eq!(call_in_chunks(&curry(values.len(), function), &chunks), direct);
    }

    /// Non-interference: two continuations of one partial application are independent.
    #[test]
    fn prop_curry_non_interference(
        first in any::<i64>(),
        left in any::<i64>(),
        right in any::<i64>(),
    ) {
        let partial = curry(2, collect(2)).call(args![first]).unwrap();
        let partial = partial.expect_function("partial").unwrap();

        let left_result = partial.call(args![left]).unwrap();
        let right_result = partial.call(args![right]).unwrap();

        prop_assert_eq!(left_result, ramkit::seq![first, left]);
        prop_assert_eq!(right_result, ramkit::seq![first, right]);
    }
}
