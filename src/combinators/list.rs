//! Collection combinators.
//!
//! `map`, `filter`, `reject` and `pluck` preserve the shape of their input:
//! a mapping yields a mapping with the same (or a subset of the) keys, a
//! sequence yields a sequence in the original order. The other operations
//! walk sequences only and report a type mismatch for mappings.

use indexmap::IndexMap;

use crate::combinators::holds;
use crate::combinators::object::prop;
use crate::error::Result;
use crate::function::Function;
use crate::value::{Container, Key, Mapping, Value};

/// Applies `function` to every value of `container`.
///
/// # Errors
///
/// Returns a type mismatch when `container` is not a container, and any
/// error raised by `function`.
pub fn map(function: &Function, container: &Value) -> Result<Value> {
    match container.container("map")? {
        Container::Mapping(entries) => entries
            .iter()
            .map(|(key, value)| Ok((key.clone(), function.apply([value.clone()])?)))
            .collect::<Result<Mapping>>()
            .map(Value::from),
        Container::Sequence(items) => items
            .iter()
            .map(|item| function.apply([item.clone()]))
            .collect::<Result<Vec<_>>>()
            .map(Value::from),
    }
}

fn retain(
    operation: &'static str,
    predicate: &Function,
    container: &Value,
    keep: bool,
) -> Result<Value> {
    match container.container(operation)? {
        Container::Mapping(entries) => {
            let mut retained = Mapping::new();
            for (key, value) in entries {
                if holds(predicate, value)? == keep {
                    retained.insert(key.clone(), value.clone());
                }
            }
            Ok(retained.into())
        }
        Container::Sequence(items) => {
            let mut retained = Vec::new();
            for item in items.iter() {
                if holds(predicate, item)? == keep {
                    retained.push(item.clone());
                }
            }
            Ok(retained.into())
        }
    }
}

/// Keeps the entries of `container` whose value satisfies `predicate`.
///
/// # Errors
///
/// See [`map`].
pub fn filter(predicate: &Function, container: &Value) -> Result<Value> {
    retain("filter", predicate, container, true)
}

/// Drops the entries of `container` whose value satisfies `predicate`.
///
/// # Errors
///
/// See [`map`].
pub fn reject(predicate: &Function, container: &Value) -> Result<Value> {
    retain("reject", predicate, container, false)
}

/// Left fold: calls `function(accumulator, item)` once per element.
///
/// # Errors
///
/// Returns a type mismatch for mappings and scalars, and any error raised by
/// `function`.
pub fn reduce(function: &Function, initial: Value, sequence: &Value) -> Result<Value> {
    sequence
        .items("reduce")?
        .iter()
        .try_fold(initial, |accumulator, item| {
            function.apply([accumulator, item.clone()])
        })
}

/// Returns the first element satisfying `predicate`, or `None`.
///
/// # Errors
///
/// See [`reduce`].
pub fn find(predicate: &Function, sequence: &Value) -> Result<Option<Value>> {
    for item in sequence.items("find")?.iter() {
        if holds(predicate, item)? {
            return Ok(Some(item.clone()));
        }
    }
    Ok(None)
}

/// Returns the index of the first element satisfying `predicate`, or `None`.
///
/// # Errors
///
/// See [`reduce`].
pub fn find_index(predicate: &Function, sequence: &Value) -> Result<Option<usize>> {
    for (index, item) in sequence.items("find_index")?.iter().enumerate() {
        if holds(predicate, item)? {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Returns the index of the first element equal to `item`, or `None`.
///
/// # Errors
///
/// See [`reduce`].
pub fn index_of(item: &Value, sequence: &Value) -> Result<Option<usize>> {
    Ok(sequence
        .items("index_of")?
        .iter()
        .position(|candidate| candidate == item))
}

fn key_of(function: &Function, item: &Value) -> Result<Key> {
    Key::try_from(function.apply([item.clone()])?)
}

/// Groups elements by `key_function`, keys in first-seen order.
///
/// # Errors
///
/// Returns [`Error::UnhashableKey`](crate::Error::UnhashableKey) when
/// `key_function` yields something that cannot be a key, plus the errors of
/// [`reduce`].
///
/// # Examples
///
/// ```rust
/// use ramkit::combinators::group_by;
/// use ramkit::{map, seq, Function, Value};
///
/// let parity = Function::new("parity", ["value"], |arguments| {
///     Ok(Value::Int(arguments[0].expect_int("parity")? % 2))
/// });
/// assert_eq!(
///     group_by(&parity, &seq![1, 2, 3, 4]),
///     Ok(map! { 1 => seq![1, 3], 0 => seq![2, 4] })
/// );
/// ```
pub fn group_by(key_function: &Function, sequence: &Value) -> Result<Value> {
    let mut groups: IndexMap<Key, Vec<Value>> = IndexMap::new();
    for item in sequence.items("group_by")?.iter() {
        groups
            .entry(key_of(key_function, item)?)
            .or_default()
            .push(item.clone());
    }
    Ok(groups
        .into_iter()
        .map(|(key, items)| (key, Value::from(items)))
        .collect())
}

/// Counts elements per `key_function` result, keys in first-seen order.
///
/// # Errors
///
/// See [`group_by`].
pub fn count_by(key_function: &Function, sequence: &Value) -> Result<Value> {
    let mut counts: IndexMap<Key, i64> = IndexMap::new();
    for item in sequence.items("count_by")?.iter() {
        *counts.entry(key_of(key_function, item)?).or_default() += 1;
    }
    Ok(counts
        .into_iter()
        .map(|(key, count)| (key, Value::Int(count)))
        .collect())
}

/// Indexes elements by `key_function`; later elements win on collision.
///
/// # Errors
///
/// See [`group_by`].
pub fn index_by(key_function: &Function, sequence: &Value) -> Result<Value> {
    let mut index = Mapping::new();
    for item in sequence.items("index_by")?.iter() {
        index.insert(key_of(key_function, item)?, item.clone());
    }
    Ok(index.into())
}

/// Keeps the first element for every distinct `key_function` result.
///
/// # Errors
///
/// See [`group_by`].
pub fn uniq_by(key_function: &Function, sequence: &Value) -> Result<Value> {
    let mut seen = Mapping::new();
    for item in sequence.items("uniq_by")?.iter() {
        seen.entry(key_of(key_function, item)?)
            .or_insert_with(|| item.clone());
    }
    Ok(seen.into_values().collect())
}

/// Returns `true` when every element satisfies `predicate`.
///
/// # Errors
///
/// See [`reduce`].
pub fn all(predicate: &Function, sequence: &Value) -> Result<bool> {
    for item in sequence.items("all")?.iter() {
        if !holds(predicate, item)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Returns `true` when some element satisfies `predicate`.
///
/// # Errors
///
/// See [`reduce`].
pub fn any(predicate: &Function, sequence: &Value) -> Result<bool> {
    Ok(find_index(predicate, sequence)?.is_some())
}

/// Returns `true` when no element satisfies `predicate`.
///
/// # Errors
///
/// See [`reduce`].
pub fn none(predicate: &Function, sequence: &Value) -> Result<bool> {
    Ok(!any(predicate, sequence)?)
}

/// Extracts property `key` from every value of `collection`.
///
/// Missing properties become [`Value::Null`]; the shape of `collection` is
/// preserved like [`map`].
///
/// # Errors
///
/// Returns a type mismatch when `collection` is not a container.
pub fn pluck(key: &Key, collection: &Value) -> Result<Value> {
    let extract = |item: &Value| prop(key, item).unwrap_or_default();
    Ok(match collection.container("pluck")? {
        Container::Mapping(entries) => entries
            .iter()
            .map(|(entry_key, value)| (entry_key.clone(), extract(value)))
            .collect(),
        Container::Sequence(items) => items.iter().map(extract).collect(),
    })
}

/// Tests membership: keys for mappings, substrings for strings, elements
/// for sequences.
///
/// # Errors
///
/// Returns a type mismatch when `collection` is not a container.
pub fn contains(item: &Value, collection: &Value) -> Result<bool> {
    if let (Value::Str(haystack), Value::Str(needle)) = (collection, item) {
        return Ok(haystack.contains(needle.as_str()));
    }
    Ok(match collection.container("contains")? {
        Container::Mapping(entries) => {
            Key::try_from(item).is_ok_and(|key| entries.contains_key(&key))
        }
        Container::Sequence(items) => items.contains(item),
    })
}

/// Returns the elements of `target` that do not appear in `excluded`.
///
/// # Errors
///
/// Returns a type mismatch when either argument is not a sequence.
pub fn without(excluded: &Value, target: &Value) -> Result<Value> {
    let excluded = excluded.items("without")?;
    Ok(target
        .items("without")?
        .iter()
        .filter(|item| !excluded.contains(item))
        .cloned()
        .collect())
}

/// Concatenates two sequences.
///
/// # Errors
///
/// Returns a type mismatch when either argument is not a sequence.
pub fn concat(first: &Value, second: &Value) -> Result<Value> {
    Ok(first
        .items("concat")?
        .iter()
        .chain(second.items("concat")?.iter())
        .cloned()
        .collect())
}
