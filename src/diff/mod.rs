//! Structural diffing of record collections and flat mappings.
//!
//! [`diff_collections`] correlates two snapshots of identity-bearing
//! records through their `id` field and classifies every record as added,
//! removed or changed. [`diff_dicts`] compares two flat mappings key by key
//! and reports one [`KeyChange`] per differing key.
//!
//! Both operations are pure: neither input is touched and unchanged
//! entries produce nothing.
//!
//! # Examples
//!
//! ```rust
//! use ramkit::diff::diff_collections;
//! use ramkit::{map, Value};
//!
//! let old = [map! { "id" => 1, "v" => "a" }];
//! let new = [map! { "id" => 1, "v" => "b" }, map! { "id" => 2, "v" => "c" }];
//! let diff = diff_collections(&old, &new).unwrap();
//!
//! assert!(diff.removed.is_empty());
//! assert_eq!(diff.added, vec![map! { "id" => 2, "v" => "c" }]);
//! assert_eq!(diff.changed[0].to, map! { "id" => 1, "v" => "b" });
//! ```

use std::fmt;

use indexmap::IndexMap;
use indexmap::IndexSet;

use crate::error::{Error, Result};
use crate::value::{Key, Mapping, Value};

/// The identity field used by [`diff_collections`].
pub const IDENTITY_FIELD: &str = "id";

/// An old and a new version of the same record.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// The record as found in the old collection.
    pub from: Value,
    /// The record as found in the new collection.
    pub to: Value,
}

impl From<Change> for Value {
    fn from(change: Change) -> Self {
        Self::map([
            (Key::from("from"), change.from),
            (Key::from("to"), change.to),
        ])
    }
}

/// The three-way classification produced by [`diff_collections`].
///
/// `removed` follows the order of the old collection; `added` and
/// `changed` follow the order of the new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionDiff {
    /// Records whose identity only appears in the new collection.
    pub added: Vec<Value>,
    /// Records whose identity only appears in the old collection.
    pub removed: Vec<Value>,
    /// Records present in both collections with unequal contents.
    pub changed: Vec<Change>,
}

impl CollectionDiff {
    /// Returns `true` when the two collections hold equal records.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl From<CollectionDiff> for Value {
    fn from(diff: CollectionDiff) -> Self {
        Self::map([
            (Key::from("added"), Self::seq(diff.added)),
            (
                Key::from("changed"),
                diff.changed.into_iter().map(Self::from).collect(),
            ),
            (Key::from("removed"), Self::seq(diff.removed)),
        ])
    }
}

fn identity_of(field: &Key, record: &Value, position: usize) -> Result<Key> {
    let identity = record
        .expect_mapping("diff_collections")?
        .get(field)
        .ok_or_else(|| Error::MissingIdentity {
            field: field.to_string(),
            position,
        })?;
    Key::try_from(identity)
}

/// Indexes each record by its identity; the first record wins on duplicates.
fn index_by_identity<'a>(field: &Key, records: &'a [Value]) -> Result<IndexMap<Key, &'a Value>> {
    let mut index = IndexMap::with_capacity(records.len());
    for (position, record) in records.iter().enumerate() {
        index
            .entry(identity_of(field, record, position)?)
            .or_insert(record);
    }
    Ok(index)
}

/// [`diff_collections`] with a caller-chosen identity field.
///
/// # Errors
///
/// Returns a type mismatch for records that are not mappings,
/// [`Error::MissingIdentity`] for records without the identity field and
/// [`Error::UnhashableKey`] for identities that cannot be keys.
pub fn diff_collections_by(field: &Key, old: &[Value], new: &[Value]) -> Result<CollectionDiff> {
    let previous = index_by_identity(field, old)?;
    let current = index_by_identity(field, new)?;

    let mut diff = CollectionDiff::default();
    for (position, record) in old.iter().enumerate() {
        if !current.contains_key(&identity_of(field, record, position)?) {
            diff.removed.push(record.clone());
        }
    }
    for (position, record) in new.iter().enumerate() {
        match previous.get(&identity_of(field, record, position)?) {
            None => diff.added.push(record.clone()),
            Some(before) if *before != record => diff.changed.push(Change {
                from: (*before).clone(),
                to: record.clone(),
            }),
            Some(_) => {}
        }
    }
    tracing::trace!(
        added = diff.added.len(),
        removed = diff.removed.len(),
        changed = diff.changed.len(),
        "collections diffed"
    );
    Ok(diff)
}

/// Diffs two snapshots of records identified by their `id` field.
///
/// # Errors
///
/// See [`diff_collections_by`].
pub fn diff_collections(old: &[Value], new: &[Value]) -> Result<CollectionDiff> {
    diff_collections_by(&Key::from(IDENTITY_FIELD), old, new)
}

/// One differing key between two mappings.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyChange {
    /// The key only exists in the second mapping.
    Added {
        /// The key.
        key: Key,
        /// Its value in the second mapping.
        value: Value,
    },
    /// The key only exists in the first mapping.
    Removed {
        /// The key.
        key: Key,
        /// Its value in the first mapping.
        value: Value,
    },
    /// The key exists in both mappings with unequal values.
    Changed {
        /// The key.
        key: Key,
        /// Its value in the first mapping.
        from: Value,
        /// Its value in the second mapping.
        to: Value,
    },
}

impl KeyChange {
    /// Returns the key this change is about.
    pub const fn key(&self) -> &Key {
        match self {
            Self::Added { key, .. } | Self::Removed { key, .. } | Self::Changed { key, .. } => key,
        }
    }
}

/// Renders strings bare and everything else like [`Value`]'s `Display`.
struct Plain<'a>(&'a Value);

impl fmt::Display for Plain<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Str(string) => formatter.write_str(string),
            other => write!(formatter, "{other}"),
        }
    }
}

impl fmt::Display for KeyChange {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { key, value } => {
                write!(formatter, "key \"{key}\" is new. New value: {}", Plain(value))
            }
            Self::Removed { key, value } => {
                write!(formatter, "key \"{key}\" was removed. Old value: {}", Plain(value))
            }
            Self::Changed { key, from, to } => write!(
                formatter,
                "key \"{key}\" was changed. Old value: {}; New value: {}",
                Plain(from),
                Plain(to)
            ),
        }
    }
}

impl From<KeyChange> for Value {
    fn from(change: KeyChange) -> Self {
        Self::Str(change.to_string())
    }
}

/// Compares two flat mappings key by key.
///
/// Keys are visited in the order of `a`'s keys followed by the keys only
/// found in `b`. Keys holding equal values in both produce no entry.
pub fn diff_dicts(a: &Mapping, b: &Mapping) -> Vec<KeyChange> {
    let keys: IndexSet<&Key> = a.keys().chain(b.keys()).collect();
    keys.into_iter()
        .filter_map(|key| match (a.get(key), b.get(key)) {
            (None, Some(value)) => Some(KeyChange::Added {
                key: key.clone(),
                value: value.clone(),
            }),
            (Some(value), None) => Some(KeyChange::Removed {
                key: key.clone(),
                value: value.clone(),
            }),
            (Some(from), Some(to)) if from != to => Some(KeyChange::Changed {
                key: key.clone(),
                from: from.clone(),
                to: to.clone(),
            }),
            _ => None,
        })
        .collect()
}
