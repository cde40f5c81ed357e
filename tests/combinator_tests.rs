//! Integration tests for the polymorphic combinators.

#![cfg(feature = "combinators")]

use proptest::prelude::*;
use ramkit::combinators::{filter, group_by, map, pluck, reduce, reject, where_eq};
use ramkit::{Function, Key, Value, curry, pipe};
use ramkit::{args, map, seq};
use rstest::rstest;

fn parity() -> Function {
    Function::new("parity", ["value"], |arguments| {
        Ok(Value::Int(arguments[0].expect_int("parity")?.rem_euclid(2)))
    })
}

fn is_even() -> Function {
    Function::new("is_even", ["value"], |arguments| {
        Ok(Value::Bool(arguments[0].expect_int("is_even")? % 2 == 0))
    })
}

fn increment() -> Function {
    Function::new("increment", ["value"], |arguments| {
        Ok(Value::Int(arguments[0].expect_int("increment")?.wrapping_add(1)))
    })
}

#[rstest]
fn test_group_by_keeps_first_seen_order() {
    let grouped = group_by(&parity(), &seq![1, 2, 3, 4]).unwrap();

    assert_eq!(grouped, map! { 1 => seq![1, 3], 0 => seq![2, 4] });
    let keys: Vec<&Key> = grouped.as_mapping().unwrap().keys().collect();
    assert_eq!(keys, vec![&Key::Int(1), &Key::Int(0)]);
}

#[rstest]
fn test_curried_pipeline_over_records() {
    let users = seq![
        map! { "name" => "ada", "role" => "admin", "logins" => 3 },
        map! { "name" => "bob", "role" => "guest", "logins" => 1 },
        map! { "name" => "eve", "role" => "admin", "logins" => 5 },
    ];
    let is_admin = Function::new("is_admin", ["user"], |arguments| {
        Ok(Value::Bool(where_eq(&map! { "role" => "admin" }, &arguments[0])?))
    });
    let only_admins = Function::new("only_admins", ["users"], move |arguments| {
        filter(&is_admin, &arguments[0])
    });
    let names = Function::new("names", ["users"], |arguments| {
        pluck(&Key::from("name"), &arguments[0])
    });

    assert_eq!(pipe([only_admins, names]).apply([users]), Ok(seq!["ada", "eve"]));
}

#[rstest]
fn test_reduce_with_curried_accumulator() {
    let add = curry(
        2,
        Function::new("add", ["total", "value"], |arguments| {
            Ok(Value::Int(arguments[0].expect_int("add")? + arguments[1].expect_int("add")?))
        }),
    );
    assert_eq!(reduce(&add, Value::Int(0), &seq![1, 2, 3]), Ok(Value::Int(6)));

    let add_ten = add.call(args![10]).unwrap();
    let add_ten = add_ten.expect_function("test").unwrap();
    assert_eq!(map(add_ten, &seq![1, 2]), Ok(seq![11, 12]));
}

fn integer_mapping() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-h]".prop_map(Key::from), any::<i64>().prop_map(Value::from)), 0..8)
        .prop_map(Value::map)
}

fn integer_sequence() -> impl Strategy<Value = Value> {
    prop::collection::vec(any::<i64>().prop_map(Value::from), 0..8).prop_map(Value::seq)
}

fn keys_of(value: &Value) -> Vec<Key> {
    value
        .as_mapping()
        .map(|entries| entries.keys().cloned().collect())
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn prop_map_preserves_mapping_keys(data in integer_mapping()) {
        let mapped = map(&increment(), &data).unwrap();
        prop_assert!(mapped.is_mapping());
        prop_assert_eq!(keys_of(&mapped), keys_of(&data));
    }

    #[test]
    fn prop_filter_and_reject_partition_mapping_keys(data in integer_mapping()) {
        let kept = filter(&is_even(), &data).unwrap();
        let dropped = reject(&is_even(), &data).unwrap();
        prop_assert!(kept.is_mapping() && dropped.is_mapping());

        let original = keys_of(&data);
        let mut union: Vec<Key> = keys_of(&kept).into_iter().chain(keys_of(&dropped)).collect();
        union.sort();
        let mut expected = original;
        expected.sort();
        prop_assert_eq!(union, expected);
    }

    #[test]
    fn prop_sequences_stay_sequences(data in integer_sequence()) {
        let length = data.as_sequence().map_or(0, <[Value]>::len);
        let mapped = map(&increment(), &data).unwrap();
        let kept = filter(&is_even(), &data).unwrap();

        prop_assert!(mapped.is_sequence() && kept.is_sequence());
        prop_assert_eq!(mapped.as_sequence().map_or(0, <[Value]>::len), length);
        prop_assert!(kept.as_sequence().map_or(0, <[Value]>::len) <= length);
    }
}
