//! `propwatch` instruments an object graph so that every property read and
//! write, at any depth, is counted by path, without changing what the code
//! under observation sees.
//!
//! ```
//! use propwatch_object::{Realm, Value};
//!
//! let realm = Realm::new();
//! let target = realm.object().with("foo", realm.object().with("bar", 1));
//!
//! let root = propwatch::wrap(&target);
//! let foo = root.get("foo").unwrap();
//! assert_eq!(foo.get("bar").unwrap(), Value::from(1));
//!
//! let registry = root.registry();
//! assert_eq!(registry.counters("foo").unwrap().get(), 1);
//! assert_eq!(registry.counters("foo.bar").unwrap().total(), 1);
//! ```
//!
//! # How it works
//!
//! [`wrap`] returns a [`TrackedNode`]: a proxy over the target whose `get`
//! and `set` traps record into a [`Registry`] shared by the whole tree. When a
//! read returns an object (or function), the result is wrapped on the spot in
//! a new proxy one level deeper, so tracking follows the caller down the graph
//! lazily. Wrappers are never cached: reading the same property twice yields
//! two distinct proxies over the same object, both feeding the same registry.
//!
//! Inherited properties (methods from a prototype, for instance) are neither
//! counted nor wrapped unless [`WatchOptions::only_own_property`] is turned
//! off. Writes are always counted. Values behind immutable bindings
//! (non-writable and non-configurable) are returned unwrapped.
//!
//! The registry is reachable from any node through [`TrackedNode::registry`],
//! or by reading the reserved [`REGISTRY_KEY`] property and passing the
//! result to [`Registry::from_value`]. Writing to that key is always rejected.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}
#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use {debug, trace};

mod options;
pub use options::WatchOptions;

mod registry;
pub use registry::{Counters, Registry, RegistryItem};

mod intercept;
pub use intercept::REGISTRY_KEY;

mod node;
pub use node::TrackedNode;

use std::rc::Rc;

use propwatch_object::Object;

/// Start watching `target` with the default [`WatchOptions`].
///
/// Each call allocates a fresh, empty [`Registry`] for the returned tree.
pub fn wrap(target: &Object) -> TrackedNode {
    wrap_with_options(target, WatchOptions::default())
}

/// Start watching `target` with explicit options.
///
/// `options` also accepts a plain `bool`, read as
/// [`WatchOptions::only_own_property`].
pub fn wrap_with_options(target: &Object, options: impl Into<WatchOptions>) -> TrackedNode {
    let options = options.into();
    let registry = Registry::new();
    debug!(?options, "starting a new access registry");
    let context = Rc::new(intercept::WatchContext::new(registry, options));
    intercept::track(target.clone(), context, String::new())
}
