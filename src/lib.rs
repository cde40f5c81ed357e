//! # ramkit
//!
//! Auto-curried combinators over dynamic mappings and sequences, with
//! immutable deep-path access and structural diffing.
//!
//! ## Overview
//!
//! Data lives in a dynamic [`Value`]: null, booleans, numbers, strings,
//! sequences, insertion-ordered mappings and first-class [`Function`]s.
//! On top of it the crate provides:
//!
//! - **Arity model and currying**: [`arity`], [`curry`], [`curry_auto`]
//! - **Combinators**: `map`, `filter`, `reduce`, `group_by`, `prop`, `where_`, ...
//!   dispatching on the mapping or sequence shape of their input
//! - **Path engine**: `get_path`, `set_path`, `update_path` with
//!   copy-on-write updates and creation of missing intermediate nodes
//! - **Diff engine**: `diff_collections` and `diff_dicts`
//! - **Library**: every combinator by name, curried, data last
//!
//! ## Feature Flags
//!
//! - `combinators`: the polymorphic combinators and the [`Library`] (default)
//! - `path`: the path engine (default)
//! - `diff`: the diff engine (default)
//! - `arc`: share values through `Arc` and require `Send + Sync` bodies
//! - `serde`: `Serialize`/`Deserialize` for [`Value`] and JSON conversion
//! - `full`: everything except `arc`
//!
//! ## Example
//!
//! ```rust
//! use ramkit::prelude::*;
//! use ramkit::{args, map, path};
//!
//! let library = Library::standard();
//! let root = map! {};
//! let updated = library
//!     .call("set_path", args![Value::from(path!["a", "b"]), 5, root.clone()])
//!     .unwrap();
//!
//! assert_eq!(updated, map! { "a" => map! { "b" => 5 } });
//! assert_eq!(root, map! {});
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the value model, the function model and every enabled
/// engine.
///
/// # Usage
///
/// ```rust
/// use ramkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::function::{
        Arguments, Function, always, arity, binary, curry, curry_auto, flip, identity, n_ary,
        partial, pipe, self_arity, unary,
    };
    pub use crate::value::{Container, Key, Mapping, Sequence, Value};

    #[cfg(feature = "combinators")]
    pub use crate::combinators::*;

    #[cfg(feature = "combinators")]
    pub use crate::library::Library;

    #[cfg(feature = "path")]
    pub use crate::path::{Path, get_path, merge_in, path_eq, set_path, update_in, update_path};

    #[cfg(feature = "diff")]
    pub use crate::diff::{
        Change, CollectionDiff, KeyChange, diff_collections, diff_collections_by, diff_dicts,
    };
}

pub mod error;
pub mod function;
pub mod value;

#[cfg(feature = "combinators")]
pub mod combinators;

#[cfg(feature = "combinators")]
pub mod library;

#[cfg(feature = "path")]
pub mod path;

#[cfg(feature = "diff")]
pub mod diff;

pub use error::{Error, Result};
pub use function::{
    Arguments, Function, Parameters, always, arity, binary, curry, curry_auto, flip, identity,
    n_ary, partial, pipe, self_arity, unary,
};
pub use value::{Container, FloatKey, Key, Mapping, Sequence, Value};

#[cfg(feature = "combinators")]
pub use library::Library;

#[cfg(feature = "path")]
pub use path::Path;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Value: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Function: Send, Sync);
