//! Property access and mapping combinators.
//!
//! Property access never fails: a missing key, an out-of-range index or a
//! value that has no properties at all all resolve to `None`. Writes are
//! copy-on-write and only accept mappings.

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::function::{Function, self_arity};
use crate::value::{Key, Mapping, ReferenceCounter, Value};

/// Resolves a possibly negative index against a length.
pub(crate) fn resolve_index(index: i64, length: usize) -> Option<usize> {
    let length = i64::try_from(length).ok()?;
    let resolved = if index < 0 { length + index } else { index };
    if (0..length).contains(&resolved) {
        usize::try_from(resolved).ok()
    } else {
        None
    }
}

/// Borrowing lookup used by property and path access.
pub(crate) fn lookup<'a>(key: &Key, object: &'a Value) -> Option<Cow<'a, Value>> {
    match object {
        Value::Map(entries) => entries.get(key).map(Cow::Borrowed),
        Value::Seq(items) => {
            let index = resolve_index(key.as_index()?, items.len())?;
            items.get(index).map(Cow::Borrowed)
        }
        Value::Str(string) => {
            let characters: Vec<char> = string.chars().collect();
            let index = resolve_index(key.as_index()?, characters.len())?;
            Some(Cow::Owned(Value::Str(characters[index].to_string())))
        }
        _ => None,
    }
}

/// Reads property `key` of `object`.
///
/// Mappings are looked up by key; sequences and strings by integer index,
/// negative indices counting from the end. Anything else has no properties.
///
/// # Examples
///
/// ```rust
/// use ramkit::combinators::prop;
/// use ramkit::{map, seq, Key, Value};
///
/// assert_eq!(prop(&Key::from("a"), &map! { "a" => 1 }), Some(Value::Int(1)));
/// assert_eq!(prop(&Key::from(-1), &seq![1, 2]), Some(Value::Int(2)));
/// assert_eq!(prop(&Key::from("a"), &Value::Int(3)), None);
/// ```
pub fn prop(key: &Key, object: &Value) -> Option<Value> {
    lookup(key, object).map(Cow::into_owned)
}

/// Returns `true` when property `key` of `object` equals `value`.
///
/// A missing property compares as [`Value::Null`].
pub fn prop_eq(key: &Key, value: &Value, object: &Value) -> bool {
    prop(key, object).unwrap_or_default() == *value
}

/// Negation of [`prop_eq`].
pub fn prop_ne(key: &Key, value: &Value, object: &Value) -> bool {
    !prop_eq(key, value, object)
}

/// Returns `true` when every predicate of `spec` holds for the matching
/// property of `object`. Missing properties reach the predicate as
/// [`Value::Null`].
///
/// # Errors
///
/// Returns a type mismatch when `spec` is not a mapping of functions.
///
/// # Examples
///
/// ```rust
/// use ramkit::combinators::where_;
/// use ramkit::{map, Function, Value};
///
/// let positive = Function::new("positive", ["value"], |arguments| {
///     Ok(Value::Bool(arguments[0].as_int().is_some_and(|number| number > 0)))
/// });
/// let spec = map! { "count" => positive };
/// assert_eq!(where_(&spec, &map! { "count" => 2 }), Ok(true));
/// assert_eq!(where_(&spec, &map! {}), Ok(false));
/// ```
pub fn where_(spec: &Value, object: &Value) -> Result<bool> {
    for (key, predicate) in spec.expect_mapping("where")? {
        let predicate = predicate.expect_function("where")?;
        let actual = prop(key, object).unwrap_or_default();
        if !predicate.apply([actual])?.is_truthy() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns `true` when every literal of `spec` equals the matching property
/// of `object`.
///
/// # Errors
///
/// Returns a type mismatch when `spec` is not a mapping.
pub fn where_eq(spec: &Value, object: &Value) -> Result<bool> {
    Ok(spec
        .expect_mapping("where_eq")?
        .iter()
        .all(|(key, expected)| prop_eq(key, expected, object)))
}

/// Maps over a mapping, calling `function` with `(value, key, object)`
/// truncated to the function's own arity.
///
/// # Errors
///
/// Returns a type mismatch when `object` is not a mapping, an arity error
/// when `function` is variadic without declared arity, and any error raised
/// by `function`.
pub fn map_obj_indexed(function: &Function, object: &Value) -> Result<Value> {
    let adapted = self_arity(function.clone())?;
    object
        .expect_mapping("map_obj_indexed")?
        .iter()
        .map(|(key, value)| {
            let result = adapted.apply([value.clone(), key.clone().into(), object.clone()])?;
            Ok((key.clone(), result))
        })
        .collect::<Result<Mapping>>()
        .map(Value::from)
}

fn keys_of(operation: &'static str, keys: &Value) -> Result<Vec<Key>> {
    keys.items(operation)?.iter().map(Key::try_from).collect()
}

/// Keeps the listed keys of `data`, in the order they are listed.
///
/// # Errors
///
/// Returns a type mismatch when `keys` is not a sequence of keys or `data`
/// is not a mapping.
pub fn pick(keys: &Value, data: &Value) -> Result<Value> {
    let entries = data.expect_mapping("pick")?;
    Ok(keys_of("pick", keys)?
        .into_iter()
        .filter_map(|key| entries.get(&key).map(|value| (key.clone(), value.clone())))
        .collect())
}

/// Drops the listed keys of `data`.
///
/// # Errors
///
/// See [`pick`].
pub fn omit(keys: &Value, data: &Value) -> Result<Value> {
    let omitted = keys_of("omit", keys)?;
    Ok(data
        .expect_mapping("omit")?
        .iter()
        .filter(|(key, _)| !omitted.contains(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect())
}

/// Merges two mappings; entries of `later` win.
///
/// # Errors
///
/// Returns a type mismatch when either argument is not a mapping.
pub fn merge(earlier: &Value, later: &Value) -> Result<Value> {
    let mut merged = earlier.expect_mapping("merge")?.clone();
    merged.extend(
        later
            .expect_mapping("merge")?
            .iter()
            .map(|(key, value)| (key.clone(), value.clone())),
    );
    Ok(merged.into())
}

/// Merges a sequence of mappings left to right.
///
/// # Errors
///
/// Returns a type mismatch when `mappings` is not a sequence of mappings.
pub fn merge_all(mappings: &Value) -> Result<Value> {
    mappings
        .items("merge_all")?
        .iter()
        .try_fold(Value::empty_map(), |merged, mapping| merge(&merged, mapping))
}

/// Returns a copy of `data` with `key` set to `value`.
///
/// Sibling entries are shared with `data`, which is left untouched.
///
/// # Errors
///
/// Returns a type mismatch when `data` is not a mapping.
pub fn assoc(key: Key, value: Value, data: &Value) -> Result<Value> {
    match data {
        Value::Map(entries) => {
            let mut entries = ReferenceCounter::clone(entries);
            ReferenceCounter::make_mut(&mut entries).insert(key, value);
            Ok(Value::Map(entries))
        }
        other => Err(Error::mismatch("assoc", "a mapping", other.type_name())),
    }
}

/// Pairs `keys` with `values` positionally.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] when `values` is shorter than `keys`,
/// and a type mismatch when either argument is not a sequence.
pub fn zip_obj(keys: &Value, values: &Value) -> Result<Value> {
    let keys = keys_of("zip_obj", keys)?;
    let values = values.items("zip_obj")?;
    keys.into_iter()
        .enumerate()
        .map(|(index, key)| {
            let value = values.get(index).cloned().ok_or(Error::IndexOutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                length: values.len(),
            })?;
            Ok((key, value))
        })
        .collect::<Result<Mapping>>()
        .map(Value::from)
}

/// Builds a single-entry mapping.
pub fn obj_of(key: Key, value: Value) -> Value {
    Value::map([(key, value)])
}

/// Returns the values of a mapping as a sequence.
///
/// # Errors
///
/// Returns a type mismatch when `data` is not a mapping.
pub fn values(data: &Value) -> Result<Value> {
    Ok(data.expect_mapping("values")?.values().cloned().collect())
}
