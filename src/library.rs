//! The named combinator registry.
//!
//! A [`Library`] maps combinator names to curried [`Function`]s, with the
//! data argument last so that partial application yields reusable
//! transformations. This is the surface an expression evaluator consumes:
//! it resolves a name, then feeds it arguments one call at a time.
//!
//! # Examples
//!
//! ```rust
//! use ramkit::{args, map, seq, Library, Value};
//!
//! let library = Library::standard();
//! let pick_name = library.call("pick", args![seq!["name"]]).unwrap();
//! let pick_name = pick_name.expect_function("example").unwrap();
//!
//! assert_eq!(
//!     pick_name.call(args![map! { "name" => "ada", "age" => 36 }]),
//!     Ok(map! { "name" => "ada" })
//! );
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::combinators;
use crate::error::{Error, Result};
use crate::function::{
    Arguments, Function, ThreadSafety, always, arity, binary, curry, flip, identity, n_ary,
    partial, pipe, self_arity, unary,
};
use crate::value::{Key, Value};

#[cfg(feature = "diff")]
use crate::diff;
#[cfg(feature = "path")]
use crate::path::{self, Path};

/// A registry of named, curried combinators.
#[derive(Debug, Clone, Default)]
pub struct Library {
    combinators: IndexMap<&'static str, Function>,
}

fn count(value: &Value, operation: &'static str) -> Result<usize> {
    let requested = value.expect_int(operation)?;
    usize::try_from(requested)
        .map_err(|_| Error::mismatch(operation, "a non-negative integer", "a negative integer"))
}

impl Library {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every combinator of the crate.
    pub fn standard() -> Self {
        let mut library = Self::new();
        library.register_functions();
        library.register_lists();
        library.register_objects();
        library.register_relations();
        #[cfg(feature = "path")]
        library.register_paths();
        #[cfg(feature = "diff")]
        library.register_diffs();
        library
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: &'static str, function: Function) {
        self.combinators.insert(name, function);
    }

    /// Looks up a combinator.
    pub fn get(&self, name: &str) -> Option<&Function> {
        self.combinators.get(name)
    }

    /// Looks up a combinator and calls it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCombinator`] for unregistered names and any
    /// error raised by the call.
    pub fn call(&self, name: &str, arguments: Arguments) -> Result<Value> {
        let Some(function) = self.get(name) else {
            debug!(name, "unknown combinator");
            return Err(Error::UnknownCombinator {
                name: name.to_string(),
            });
        };
        function.call(arguments)
    }

    /// Returns the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.combinators.keys().copied()
    }

    /// Returns the number of registered combinators.
    pub fn len(&self) -> usize {
        self.combinators.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.combinators.is_empty()
    }

    fn define<const N: usize, F>(
        &mut self,
        name: &'static str,
        parameters: [&'static str; N],
        body: F,
    ) where
        F: Fn(&[Value]) -> Result<Value> + ThreadSafety + 'static,
    {
        self.insert(name, curry(N, Function::new(name, parameters, body)));
    }

    fn register_functions(&mut self) {
        self.define("curry", ["arity", "function"], |arguments| {
            let function = arguments[1].expect_function("curry")?;
            Ok(curry(count(&arguments[0], "curry")?, function.clone()).into())
        });
        self.define("arity", ["function"], |arguments| {
            Ok(arity(arguments[0].expect_function("arity")?)?.into())
        });
        self.define("n_ary", ["count", "function"], |arguments| {
            let function = arguments[1].expect_function("n_ary")?;
            Ok(n_ary(count(&arguments[0], "n_ary")?, function.clone()).into())
        });
        self.define("unary", ["function"], |arguments| {
            Ok(unary(arguments[0].expect_function("unary")?.clone()).into())
        });
        self.define("binary", ["function"], |arguments| {
            Ok(binary(arguments[0].expect_function("binary")?.clone()).into())
        });
        self.define("self_arity", ["function"], |arguments| {
            Ok(self_arity(arguments[0].expect_function("self_arity")?.clone())?.into())
        });
        self.define("partial", ["function", "arguments"], |arguments| {
            let function = arguments[0].expect_function("partial")?;
            let fixed: Arguments = arguments[1].items("partial")?.iter().cloned().collect();
            Ok(partial(function.clone(), fixed).into())
        });
        self.define("flip", ["function", "first", "second"], |arguments| {
            let function = arguments[0].expect_function("flip")?;
            flip(function.clone()).apply([arguments[1].clone(), arguments[2].clone()])
        });
        self.define("pipe", ["functions"], |arguments| {
            let functions = arguments[0]
                .items("pipe")?
                .iter()
                .map(|function| function.expect_function("pipe").cloned())
                .collect::<Result<Vec<_>>>()?;
            Ok(pipe(functions).into())
        });
        self.define("always", ["value"], |arguments| {
            Ok(always(arguments[0].clone()).into())
        });
        self.insert("identity", identity());
    }

    fn register_lists(&mut self) {
        self.define("map", ["function", "container"], |arguments| {
            combinators::map(arguments[0].expect_function("map")?, &arguments[1])
        });
        self.define("filter", ["predicate", "container"], |arguments| {
            combinators::filter(arguments[0].expect_function("filter")?, &arguments[1])
        });
        self.define("reject", ["predicate", "container"], |arguments| {
            combinators::reject(arguments[0].expect_function("reject")?, &arguments[1])
        });
        self.define("reduce", ["function", "initial", "sequence"], |arguments| {
            let function = arguments[0].expect_function("reduce")?;
            combinators::reduce(function, arguments[1].clone(), &arguments[2])
        });
        self.define("find", ["predicate", "sequence"], |arguments| {
            Ok(combinators::find(arguments[0].expect_function("find")?, &arguments[1])?.into())
        });
        self.define("find_index", ["predicate", "sequence"], |arguments| {
            let predicate = arguments[0].expect_function("find_index")?;
            Ok(combinators::find_index(predicate, &arguments[1])?.into())
        });
        self.define("index_of", ["item", "sequence"], |arguments| {
            Ok(combinators::index_of(&arguments[0], &arguments[1])?.into())
        });
        self.define("group_by", ["function", "sequence"], |arguments| {
            combinators::group_by(arguments[0].expect_function("group_by")?, &arguments[1])
        });
        self.define("count_by", ["function", "sequence"], |arguments| {
            combinators::count_by(arguments[0].expect_function("count_by")?, &arguments[1])
        });
        self.define("index_by", ["function", "sequence"], |arguments| {
            combinators::index_by(arguments[0].expect_function("index_by")?, &arguments[1])
        });
        self.define("uniq_by", ["function", "sequence"], |arguments| {
            combinators::uniq_by(arguments[0].expect_function("uniq_by")?, &arguments[1])
        });
        self.define("all", ["predicate", "sequence"], |arguments| {
            Ok(combinators::all(arguments[0].expect_function("all")?, &arguments[1])?.into())
        });
        self.define("any", ["predicate", "sequence"], |arguments| {
            Ok(combinators::any(arguments[0].expect_function("any")?, &arguments[1])?.into())
        });
        self.define("none", ["predicate", "sequence"], |arguments| {
            Ok(combinators::none(arguments[0].expect_function("none")?, &arguments[1])?.into())
        });
        self.define("pluck", ["key", "collection"], |arguments| {
            combinators::pluck(&Key::try_from(&arguments[0])?, &arguments[1])
        });
        self.define("contains", ["item", "collection"], |arguments| {
            Ok(combinators::contains(&arguments[0], &arguments[1])?.into())
        });
        self.define("without", ["excluded", "target"], |arguments| {
            combinators::without(&arguments[0], &arguments[1])
        });
        self.define("concat", ["first", "second"], |arguments| {
            combinators::concat(&arguments[0], &arguments[1])
        });
    }

    fn register_objects(&mut self) {
        self.define("prop", ["key", "object"], |arguments| {
            Ok(combinators::prop(&Key::try_from(&arguments[0])?, &arguments[1]).into())
        });
        self.define("prop_eq", ["key", "value", "object"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            Ok(combinators::prop_eq(&key, &arguments[1], &arguments[2]).into())
        });
        self.define("prop_ne", ["key", "value", "object"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            Ok(combinators::prop_ne(&key, &arguments[1], &arguments[2]).into())
        });
        self.define("where", ["spec", "object"], |arguments| {
            Ok(combinators::where_(&arguments[0], &arguments[1])?.into())
        });
        self.define("where_eq", ["spec", "object"], |arguments| {
            Ok(combinators::where_eq(&arguments[0], &arguments[1])?.into())
        });
        self.define("map_obj_indexed", ["function", "object"], |arguments| {
            let function = arguments[0].expect_function("map_obj_indexed")?;
            combinators::map_obj_indexed(function, &arguments[1])
        });
        self.define("pick", ["keys", "object"], |arguments| {
            combinators::pick(&arguments[0], &arguments[1])
        });
        self.define("omit", ["keys", "object"], |arguments| {
            combinators::omit(&arguments[0], &arguments[1])
        });
        self.define("merge", ["earlier", "later"], |arguments| {
            combinators::merge(&arguments[0], &arguments[1])
        });
        self.define("merge_all", ["mappings"], |arguments| {
            combinators::merge_all(&arguments[0])
        });
        self.define("assoc", ["key", "value", "object"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            combinators::assoc(key, arguments[1].clone(), &arguments[2])
        });
        self.define("zip_obj", ["keys", "values"], |arguments| {
            combinators::zip_obj(&arguments[0], &arguments[1])
        });
        self.define("obj_of", ["key", "value"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            Ok(combinators::obj_of(key, arguments[1].clone()))
        });
        self.define("values", ["object"], |arguments| {
            combinators::values(&arguments[0])
        });
    }

    fn register_relations(&mut self) {
        self.define("equals", ["left", "right"], |arguments| {
            Ok(combinators::equals(&arguments[0], &arguments[1]).into())
        });
        self.define("lt", ["left", "right"], |arguments| {
            Ok(combinators::lt(&arguments[0], &arguments[1])?.into())
        });
        self.define("lte", ["left", "right"], |arguments| {
            Ok(combinators::lte(&arguments[0], &arguments[1])?.into())
        });
        self.define("gt", ["left", "right"], |arguments| {
            Ok(combinators::gt(&arguments[0], &arguments[1])?.into())
        });
        self.define("gte", ["left", "right"], |arguments| {
            Ok(combinators::gte(&arguments[0], &arguments[1])?.into())
        });
        self.define("when", ["test", "function", "value"], |arguments| {
            let test = arguments[0].expect_function("when")?;
            let function = arguments[1].expect_function("when")?;
            combinators::when(test, function, arguments[2].clone())
        });
    }

    #[cfg(feature = "path")]
    fn register_paths(&mut self) {
        self.define("get_path", ["path", "root"], |arguments| {
            Ok(path::get_path(&Path::try_from(&arguments[0])?, &arguments[1]).into())
        });
        self.define("set_path", ["path", "value", "root"], |arguments| {
            let location = Path::try_from(&arguments[0])?;
            path::set_path(&location, arguments[1].clone(), &arguments[2])
        });
        self.define("update_path", ["path", "function", "root"], |arguments| {
            let location = Path::try_from(&arguments[0])?;
            let function = arguments[1].expect_function("update_path")?;
            path::update_path(&location, function, &arguments[2])
        });
        self.define("update_in", ["key", "function", "root"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            let function = arguments[1].expect_function("update_in")?;
            path::update_in(key, function, &arguments[2])
        });
        self.define("path_eq", ["path", "value", "root"], |arguments| {
            let location = Path::try_from(&arguments[0])?;
            Ok(path::path_eq(&location, &arguments[1], &arguments[2]).into())
        });
        self.define("merge_in", ["key", "overrides", "root"], |arguments| {
            let key = Key::try_from(&arguments[0])?;
            path::merge_in(key, &arguments[1], &arguments[2])
        });
    }

    #[cfg(feature = "diff")]
    fn register_diffs(&mut self) {
        self.insert(
            "diff_collections",
            Function::new("diff_collections", ["old", "new"], |arguments| {
                let old = arguments[0].items("diff_collections")?;
                let new = arguments[1].items("diff_collections")?;
                Ok(diff::diff_collections(&old, &new)?.into())
            }),
        );
        self.insert(
            "diff_dicts",
            Function::new("diff_dicts", ["a", "b"], |arguments| {
                let a = arguments[0].expect_mapping("diff_dicts")?;
                let b = arguments[1].expect_mapping("diff_dicts")?;
                Ok(diff::diff_dicts(a, b).into_iter().map(Value::from).collect())
            }),
        );
    }
}
