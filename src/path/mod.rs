//! Deep-path access and non-destructive update.
//!
//! A [`Path`] is an ordered list of [`Key`]s leading from a root value to a
//! nested location. Reads are tolerant: [`get_path`] yields `None` as soon
//! as a segment is missing. Writes never touch their input: [`set_path`]
//! copies only the containers on the way to the leaf, synthesizing empty
//! mappings for missing intermediate nodes, and shares every other branch.
//!
//! # Laws
//!
//! - **Round trip**: `get_path(p, &set_path(p, v, root)?) == Some(v)`
//! - **Non-mutation**: `set_path(p, v, &root)` leaves `root` unchanged
//!
//! # Examples
//!
//! ```rust
//! use ramkit::path::{get_path, set_path};
//! use ramkit::{map, path, Value};
//!
//! let root = map! {};
//! let updated = set_path(&path!["a", "b"], Value::Int(5), &root).unwrap();
//!
//! assert_eq!(updated, map! { "a" => map! { "b" => 5 } });
//! assert_eq!(root, map! {});
//! assert_eq!(get_path(&path!["x", "y"], &map! { "x" => map! { "z" => 1 } }), None);
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::combinators::object::{lookup, merge, resolve_index};
use crate::error::{Error, Result};
use crate::function::{Arguments, Function, arity};
use crate::value::{Key, ReferenceCounter, Value};

/// An ordered list of keys locating a nested value. The empty path denotes
/// the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Key>,
}

impl Path {
    /// Returns the root path.
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Returns the segments.
    pub fn segments(&self) -> &[Key] {
        &self.segments
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the path without its last segment, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.segments.split_last().map(|(_, parent)| Self {
            segments: parent.to_vec(),
        })
    }

    /// Returns a new path with `key` appended.
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(key.into());
        Self { segments }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.segments.iter().map(ToString::to_string).collect();
        write!(formatter, "[{}]", rendered.join(", "))
    }
}

impl FromIterator<Key> for Path {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Key>> for Path {
    fn from(segments: Vec<Key>) -> Self {
        Self { segments }
    }
}

impl TryFrom<&Value> for Path {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        value.items("path")?.iter().map(Key::try_from).collect()
    }
}

impl From<Path> for Value {
    fn from(path: Path) -> Self {
        path.segments.into_iter().map(Self::from).collect()
    }
}

/// Builds a [`Path`] from expressions convertible into [`Key`].
///
/// ```rust
/// use ramkit::{path, Key};
///
/// let location = path!["users", 0, "name"];
/// assert_eq!(location.segments()[1], Key::Int(0));
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::path::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::path::Path::from(::std::vec![$($crate::Key::from($segment)),+])
    };
}

fn get_in<'a>(segments: &[Key], root: &'a Value) -> Option<Cow<'a, Value>> {
    let mut current = Cow::Borrowed(root);
    for segment in segments {
        current = match current {
            Cow::Borrowed(value) => lookup(segment, value)?,
            Cow::Owned(value) => Cow::Owned(lookup(segment, &value)?.into_owned()),
        };
    }
    Some(current)
}

/// Reads the value at `path`, or `None` when any segment is missing.
///
/// Segments are resolved with the tolerant property access of
/// [`prop`](crate::combinators::prop).
pub fn get_path(path: &Path, root: &Value) -> Option<Value> {
    get_in(path.segments(), root).map(Cow::into_owned)
}

/// Returns `true` when the value at `path` equals `value`. A missing value
/// compares as [`Value::Null`].
pub fn path_eq(path: &Path, value: &Value, root: &Value) -> bool {
    get_path(path, root).unwrap_or_default() == *value
}

/// Sets one segment of a container, copying it. Non-containers are replaced
/// by an empty mapping first.
fn assoc_segment(key: &Key, value: Value, root: &Value) -> Result<Value> {
    match root {
        Value::Map(entries) => {
            let mut entries = ReferenceCounter::clone(entries);
            ReferenceCounter::make_mut(&mut entries).insert(key.clone(), value);
            Ok(Value::Map(entries))
        }
        Value::Seq(items) => {
            let index = key.as_index().ok_or_else(|| {
                Error::mismatch(
                    "set_path",
                    "an integer index",
                    Value::from(key.clone()).type_name(),
                )
            })?;
            let mut items = ReferenceCounter::clone(items);
            let elements = ReferenceCounter::make_mut(&mut items);
            let length = elements.len();
            match resolve_index(index, length) {
                Some(position) => elements[position] = value,
                None if usize::try_from(index).is_ok_and(|position| position == length) => {
                    elements.push(value);
                }
                None => return Err(Error::IndexOutOfRange { index, length }),
            }
            Ok(Value::Seq(items))
        }
        _ => Ok(Value::map([(key.clone(), value)])),
    }
}

fn set_in(segments: &[Key], value: Value, root: &Value) -> Result<Value> {
    let Some((head, tail)) = segments.split_first() else {
        return Ok(value);
    };
    let child = if tail.is_empty() {
        value
    } else {
        let existing = lookup(head, root).unwrap_or_else(|| Cow::Owned(Value::empty_map()));
        set_in(tail, value, &existing)?
    };
    assoc_segment(head, child, root)
}

/// Returns a copy of `root` with `value` stored at `path`.
///
/// Missing intermediate nodes become mappings. On a sequence, an integer
/// segment replaces an existing element (negative indices count from the
/// end) or appends when it equals the length. An empty path yields `value`
/// itself.
///
/// # Errors
///
/// Returns [`Error::IndexOutOfRange`] for a sequence index past the end and
/// a type mismatch for a non-integer segment on a sequence.
pub fn set_path(path: &Path, value: Value, root: &Value) -> Result<Value> {
    set_in(path.segments(), value, root)
}

/// Replaces the value at `path` with the result of `function`.
///
/// `function` receives as many of `(value, parent, root)` as its arity
/// asks for: arity one gets the current value, arity two adds the parent
/// container (the root itself for paths of length one or zero), arity
/// three adds the root. Missing values are passed as [`Value::Null`].
///
/// # Errors
///
/// Returns an arity error for undeclared variadic functions, any error
/// raised by `function`, and the errors of [`set_path`].
///
/// # Examples
///
/// ```rust
/// use ramkit::path::update_path;
/// use ramkit::{map, path, Function, Value};
///
/// let increment = Function::new("increment", ["value"], |arguments| {
///     Ok(Value::Int(arguments[0].as_int().unwrap_or_default() + 1))
/// });
/// let root = map! { "stats" => map! { "visits" => 1 } };
/// assert_eq!(
///     update_path(&path!["stats", "visits"], &increment, &root),
///     Ok(map! { "stats" => map! { "visits" => 2 } })
/// );
/// ```
pub fn update_path(path: &Path, function: &Function, root: &Value) -> Result<Value> {
    let segments = path.segments();
    let current = get_in(segments, root).map(Cow::into_owned).unwrap_or_default();
    let parent = match segments.split_last() {
        Some((_, parent)) if !parent.is_empty() => {
            get_in(parent, root).map(Cow::into_owned).unwrap_or_default()
        }
        _ => root.clone(),
    };
    let arguments: Arguments = [current, parent, root.clone()]
        .into_iter()
        .take(arity(function)?)
        .collect();
    set_in(segments, function.call(arguments)?, root)
}

/// [`update_path`] on a single key.
///
/// # Errors
///
/// See [`update_path`].
pub fn update_in(key: Key, function: &Function, root: &Value) -> Result<Value> {
    update_path(&Path::from(vec![key]), function, root)
}

/// Merges `overrides` into the mapping stored under `key`; entries of
/// `overrides` win. A missing entry is treated as an empty mapping.
///
/// # Errors
///
/// Returns a type mismatch when the existing entry or `overrides` is not a
/// mapping, and the errors of [`set_path`].
pub fn merge_in(key: Key, overrides: &Value, root: &Value) -> Result<Value> {
    let existing = lookup(&key, root).unwrap_or_else(|| Cow::Owned(Value::empty_map()));
    let merged = merge(&existing, overrides)?;
    assoc_segment(&key, merged, root)
}
