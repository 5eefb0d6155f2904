use core::any::Any;
use core::fmt;
use std::rc::Rc;

use propwatch_object::{Object, ObjectError, PropertyKey, Value};

use crate::intercept::Interceptor;
use crate::{Registry, WatchOptions};

/// A watched view of one object at a known path.
///
/// A node behaves like the object it wraps: reads and writes go through to the
/// target with their usual semantics, and are counted on the way. Reads that
/// produce objects or functions hand out new nodes one level deeper (as
/// [`Value`]s; use [`TrackedNode::from_value`] or [`TrackedNode::child`] to get
/// the node back).
///
/// Nodes are cheap handles. Two reads of the same property produce two
/// different nodes wrapping the same object and sharing the same registry.
#[derive(Clone)]
pub struct TrackedNode {
    proxy: Object,
    target: Object,
    interceptor: Rc<Interceptor>,
}

impl TrackedNode {
    pub(crate) fn new(proxy: Object, target: Object, interceptor: Rc<Interceptor>) -> Self {
        Self {
            proxy,
            target,
            interceptor,
        }
    }

    /// Recover the node behind a value handed out by a tracked read.
    ///
    /// Returns `None` for anything that is not a watched proxy: primitives,
    /// plain objects, and values returned raw (inherited or immutable ones).
    pub fn from_value(value: &Value) -> Option<TrackedNode> {
        let proxy = value.as_object()?;
        let handler: Rc<dyn Any> = proxy.proxy_handler()?;
        let interceptor = handler.downcast::<Interceptor>().ok()?;
        Some(TrackedNode {
            proxy: proxy.clone(),
            target: proxy.proxy_target()?,
            interceptor,
        })
    }

    /// Read `key`, counting the access.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value, ObjectError> {
        self.proxy.get(key)
    }

    /// Read `key` and return the nested node, if the read produced one.
    pub fn child(&self, key: impl Into<PropertyKey>) -> Result<Option<TrackedNode>, ObjectError> {
        Ok(TrackedNode::from_value(&self.get(key)?))
    }

    /// Write `key`, counting the access. Returns `Ok(false)` when the write is
    /// rejected by the target, or when `key` is [`REGISTRY_KEY`](crate::REGISTRY_KEY).
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<bool, ObjectError> {
        self.proxy.set(key, value)
    }

    /// Strict-mode write: a rejected write is a `TypeError`.
    pub fn put(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<(), ObjectError> {
        self.as_value().put(key, value)
    }

    /// Call the method `key` with this node as `this`.
    pub fn invoke(&self, key: impl Into<PropertyKey>, args: &[Value]) -> Result<Value, ObjectError> {
        self.as_value().invoke(key, args)
    }

    /// The registry shared by the whole tree this node belongs to.
    pub fn registry(&self) -> Registry {
        self.interceptor.context.registry.clone()
    }

    /// The path prefix of this node: `""` at the root, otherwise the path of
    /// the read that produced it followed by the level separator.
    pub fn path(&self) -> &str {
        &self.interceptor.path
    }

    /// The options this tree was wrapped with.
    pub fn options(&self) -> WatchOptions {
        self.interceptor.context.options
    }

    /// The unwatched object behind this node. Accesses through it are not counted.
    pub fn target(&self) -> &Object {
        &self.target
    }

    /// The node as an object handle, for passing to code that expects one.
    pub fn as_object(&self) -> &Object {
        &self.proxy
    }

    /// The node as a value.
    pub fn as_value(&self) -> Value {
        Value::Object(self.proxy.clone())
    }

    /// Convert into a value.
    pub fn into_value(self) -> Value {
        Value::Object(self.proxy)
    }
}

impl From<TrackedNode> for Value {
    fn from(node: TrackedNode) -> Self {
        node.into_value()
    }
}

impl fmt::Debug for TrackedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedNode")
            .field("path", &self.path())
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}
