//! `propwatch-object` is a small, single-threaded object model in the style of
//! ECMAScript: objects with own properties, property descriptors, prototype
//! chains, callable native functions, and proxies.
//!
//! # Features
//!
//! - **Property descriptors**: data vs accessor, with `writable`, `enumerable`
//!   and `configurable` attributes
//! - **Prototype chains**: inherited properties resolve through `[[Prototype]]`
//! - **Proxies**: a [`ProxyHandler`] can intercept `get` and `set`; every other
//!   internal method forwards to the target
//! - **Intrinsics**: a [`Realm`] provides `Object.prototype`, `Array.prototype`
//!   and `Function.prototype` with a handful of built-in methods
//! - **JSON import**: build object graphs straight from `serde_json::Value`
//!
//! # Design
//!
//! [`Object`] is a reference-counted handle with interior mutability, so any
//! number of handles (including proxies) can observe the same underlying
//! object. Nothing here is `Send`.

#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]

mod error;
pub use error::ObjectError;

mod key;
pub use key::{PropertyKey, Symbol, WellKnownSymbol};

mod value;
pub use value::Value;

mod descriptor;
pub use descriptor::PropertyDescriptor;

mod object;
pub use object::{NativeFn, Object, ProxyHandler, WeakObject};

mod realm;
pub use realm::Realm;
