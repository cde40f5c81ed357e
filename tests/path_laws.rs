//! Property-based tests for the path engine.
//!
//! - Round trip: `get_path(p, set_path(p, v, root)) == Some(v)`
//! - Non-mutation: `set_path` leaves its input value-equal to before
//! - Scalars: reading through a scalar never fails

#![cfg(feature = "path")]

use proptest::prelude::*;
use ramkit::path::{Path, get_path, path_eq, set_path, update_path};
use ramkit::{Function, Key, Value, map, path, seq};
use rstest::rstest;

fn arbitrary_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        "[a-d]".prop_map(Key::from),
        (-3_i64..4).prop_map(Key::from),
    ]
}

fn arbitrary_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
    ]
}

fn arbitrary_value() -> impl Strategy<Value = Value> {
    arbitrary_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::seq),
            prop::collection::vec(("[a-d]".prop_map(Key::from), inner), 0..4).prop_map(Value::map),
        ]
    })
}

/// Nested mappings with scalar leaves, so every string path is writable.
fn arbitrary_mapping_tree() -> impl Strategy<Value = Value> {
    let leaf = arbitrary_scalar().boxed();
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::vec(("[a-d]".prop_map(Key::from), inner), 0..4).prop_map(Value::map)
    })
}

/// Paths made of string keys only, which every write accepts.
fn mapping_path() -> impl Strategy<Value = Path> {
    prop::collection::vec("[a-d]".prop_map(Key::from), 0..4).prop_map(Path::from)
}

proptest! {
    /// Mixed string and signed integer segments over mixed containers. Writes
    /// that address a sequence with a string or past its end are rejected and
    /// skipped here.
    #[test]
    fn prop_round_trip_through_sequences(
        location in prop::collection::vec(arbitrary_key(), 0..4).prop_map(Path::from),
        value in arbitrary_value(),
        root in arbitrary_value(),
    ) {
        let Ok(updated) = set_path(&location, value.clone(), &root) else {
            return Ok(());
        };
        prop_assert_eq!(get_path(&location, &updated), Some(value));
    }

    #[test]
    fn prop_round_trip_on_mappings(
        location in mapping_path(),
        value in arbitrary_value(),
        root in arbitrary_mapping_tree(),
    ) {
        let updated = set_path(&location, value.clone(), &root).unwrap();
        prop_assert_eq!(get_path(&location, &updated), Some(value));
    }

    #[test]
    fn prop_set_path_does_not_mutate(
        location in mapping_path(),
        value in arbitrary_value(),
        root in arbitrary_value(),
    ) {
        let before = root.clone();
        let _ = set_path(&location, value, &root);
        prop_assert_eq!(root, before);
    }

    #[test]
    fn prop_reads_never_fail(
        location in prop::collection::vec(arbitrary_key(), 0..5).prop_map(Path::from),
        root in arbitrary_value(),
    ) {
        let _ = get_path(&location, &root);
    }

    #[test]
    fn prop_update_with_identity_preserves_existing_values(
        location in mapping_path(),
        value in arbitrary_value(),
    ) {
        prop_assume!(!location.is_empty());
        let root = set_path(&location, value, &map! {}).unwrap();
        let updated = update_path(&location, &ramkit::identity(), &root).unwrap();
        prop_assert_eq!(updated, root);
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[rstest]
fn test_set_path_into_empty_mapping() {
    let root = map! {};
    let updated = set_path(&path!["a", "b"], Value::Int(5), &root).unwrap();

    assert_eq!(updated, map! { "a" => map! { "b" => 5 } });
    assert_eq!(root, map! {});
}

#[rstest]
#[case::replace(path!["items", 0], seq!["x", 2, 3])]
#[case::replace_from_end(path!["items", -1], seq![1, 2, "x"])]
#[case::append(path!["items", 3], seq![1, 2, 3, "x"])]
fn test_set_path_sequence_rules(#[case] location: Path, #[case] expected: Value) {
    let root = map! { "items" => seq![1, 2, 3] };
    let updated = set_path(&location, Value::from("x"), &root).unwrap();

    assert_eq!(get_path(&path!["items"], &updated), Some(expected));
    assert_eq!(get_path(&location, &updated), Some(Value::from("x")));
}

#[rstest]
fn test_get_path_missing_is_absent() {
    assert_eq!(get_path(&path!["x", "y"], &map! { "x" => map! { "z" => 1 } }), None);
}

#[rstest]
fn test_update_path_with_three_arguments() {
    let root = map! { "totals" => map! { "count" => 1 }, "items" => seq![1, 2, 3] };
    let count_items = Function::new("count_items", ["value", "parent", "root"], |arguments| {
        let items = arguments[2]
            .as_mapping()
            .and_then(|entries| entries.get(&Key::from("items")))
            .and_then(Value::as_sequence)
            .map_or(0, <[Value]>::len);
        Ok(Value::from(items))
    });

    let updated = update_path(&path!["totals", "count"], &count_items, &root).unwrap();
    assert!(path_eq(&path!["totals", "count"], &Value::Int(3), &updated));
    assert!(path_eq(&path!["totals", "count"], &Value::Int(1), &root));
}
