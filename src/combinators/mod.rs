//! Polymorphic combinators over mappings and sequences.
//!
//! Every operation here is a plain function over [`Value`](crate::Value)s
//! that dispatches on the [`Container`](crate::Container) shape of its
//! input. The curried forms of the same operations live in the
//! [`Library`](crate::Library).
//!
//! # Overview
//!
//! - [`list`]: `map`, `filter`, `reject`, `reduce`, `find`, `group_by`, quantifiers, ...
//! - [`object`]: tolerant property access, `where_`, `pick`, `merge`, `assoc`, ...
//! - [`relation`]: equality, ordering and `when`
//!
//! # Examples
//!
//! ```rust
//! use ramkit::combinators::{filter, map};
//! use ramkit::{map, seq, Function, Value};
//!
//! let double = Function::new("double", ["value"], |arguments| {
//!     Ok(Value::Int(arguments[0].expect_int("double")? * 2))
//! });
//! assert_eq!(map(&double, &seq![1, 2]), Ok(seq![2, 4]));
//! assert_eq!(map(&double, &map! { "a" => 1 }), Ok(map! { "a" => 2 }));
//!
//! let odd = Function::new("odd", ["value"], |arguments| {
//!     Ok(Value::Bool(arguments[0].expect_int("odd")? % 2 == 1))
//! });
//! assert_eq!(filter(&odd, &map! { "a" => 1, "b" => 2 }), Ok(map! { "a" => 1 }));
//! ```

pub mod list;
pub mod object;
pub mod relation;

pub use list::{
    all, any, concat, contains, count_by, filter, find, find_index, group_by, index_by, index_of,
    map, none, pluck, reduce, reject, uniq_by, without,
};
pub use object::{
    assoc, map_obj_indexed, merge, merge_all, obj_of, omit, pick, prop, prop_eq, prop_ne, values,
    where_, where_eq, zip_obj,
};
pub use relation::{compare, equals, gt, gte, lt, lte, when};

use crate::error::Result;
use crate::function::Function;
use crate::value::Value;

/// Calls `predicate` with `value` and reads the result's truthiness.
pub(crate) fn holds(predicate: &Function, value: &Value) -> Result<bool> {
    Ok(predicate.apply([value.clone()])?.is_truthy())
}
