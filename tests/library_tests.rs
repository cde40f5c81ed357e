//! Tests for the named combinator registry.

#![cfg(feature = "combinators")]

use ramkit::{Error, Function, Library, Value, args, map, seq};
use rstest::rstest;

fn call_chain(library: &Library, name: &str, calls: Vec<Vec<Value>>) -> Result<Value, Error> {
    let mut calls = calls.into_iter();
    let first = calls.next().unwrap_or_default();
    let mut current = library.call(name, first.into())?;
    for arguments in calls {
        let function = current.expect_function("call_chain")?.clone();
        current = function.call(arguments.into())?;
    }
    Ok(current)
}

fn registered(name: &str) -> Value {
    Library::standard()
        .get(name)
        .cloned()
        .map_or(Value::Null, Value::from)
}

fn shout() -> Value {
    Function::new("shout", ["value"], |arguments| {
        Ok(Value::from(format!("{}!", arguments[0].as_str().unwrap_or_default())))
    })
    .into()
}

#[rstest]
#[case::prop_then_object(
    "prop",
    vec![vec![Value::from("a")], vec![map! { "a" => 1 }]],
    Value::Int(1)
)]
#[case::reduce_in_three_calls(
    "reduce",
    vec![vec![registered("concat")], vec![seq![]], vec![seq![seq![1], seq![2]]]],
    seq![1, 2]
)]
#[case::assoc_at_once(
    "assoc",
    vec![vec![Value::from("b"), Value::Int(2), map! { "a" => 1 }]],
    map! { "a" => 1, "b" => 2 }
)]
fn test_calls_by_name(#[case] name: &str, #[case] calls: Vec<Vec<Value>>, #[case] expected: Value) {
    let library = Library::standard();
    assert_eq!(call_chain(&library, name, calls), Ok(expected));
}

#[rstest]
fn test_map_over_mapping_by_name() {
    let library = Library::standard();
    assert_eq!(
        library.call("map", args![shout(), map! { "greeting" => "hi" }]),
        Ok(map! { "greeting" => "hi!" })
    );
}

#[rstest]
fn test_flip_by_name() {
    let library = Library::standard();
    let concat = library.get("concat").cloned().unwrap();
    assert_eq!(
        library.call("flip", args![concat, seq![1], seq![2]]),
        Ok(seq![2, 1])
    );
}

#[rstest]
fn test_pipe_by_name() {
    let library = Library::standard();
    let pipeline = library.call("pipe", args![seq![shout(), shout()]]).unwrap();
    let pipeline = pipeline.expect_function("test").unwrap();
    assert_eq!(pipeline.apply(["hey"]), Ok(Value::from("hey!!")));
}

#[cfg(feature = "path")]
#[rstest]
fn test_path_operations_by_name() {
    let library = Library::standard();
    let root = map! { "a" => map! { "b" => 1 } };

    let read_b = library.call("get_path", args![seq!["a", "b"]]).unwrap();
    let read_b = read_b.expect_function("test").unwrap();
    assert_eq!(read_b.call(args![root.clone()]), Ok(Value::Int(1)));

    assert_eq!(
        library.call("set_path", args![seq!["a", "c"], 2, root.clone()]),
        Ok(map! { "a" => map! { "b" => 1, "c" => 2 } })
    );
    assert_eq!(library.call("get_path", args![seq!["x"], root]), Ok(Value::Null));
}

#[cfg(feature = "diff")]
#[rstest]
fn test_diff_collections_by_name() {
    let library = Library::standard();
    let result = library
        .call(
            "diff_collections",
            args![seq![map! { "id" => 1, "v" => "a" }], seq![map! { "id" => 1, "v" => "b" }]],
        )
        .unwrap();
    assert_eq!(
        result,
        map! {
            "added" => seq![],
            "changed" => seq![map! {
                "from" => map! { "id" => 1, "v" => "a" },
                "to" => map! { "id" => 1, "v" => "b" },
            }],
            "removed" => seq![],
        }
    );
}

#[rstest]
fn test_registry_is_extensible() {
    let mut library = Library::new();
    let echo = Function::new("shout", ["value"], |arguments| Ok(arguments[0].clone()));
    library.insert("shout", echo);
    assert_eq!(library.names().collect::<Vec<_>>(), vec!["shout"]);
    assert_eq!(
        library.call("map", args![]),
        Err(Error::UnknownCombinator {
            name: "map".to_string()
        })
    );
}
