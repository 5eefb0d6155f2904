//! The `get`/`set` traps and the factory that wraps nested values.

use std::rc::Rc;

use propwatch_object::{Object, ObjectError, PropertyKey, ProxyHandler, Value};
use propwatch_path::{build_path, child_prefix};

use crate::{Registry, TrackedNode, WatchOptions, debug, trace};

/// Reading this key on any tracked node returns the tree's registry (see
/// [`Registry::from_value`]); writing it is rejected. Neither is counted.
pub const REGISTRY_KEY: &str = "@@registry";

fn is_registry_key(key: &PropertyKey) -> bool {
    key.as_str() == Some(REGISTRY_KEY)
}

/// State shared by every node of one watched tree.
pub(crate) struct WatchContext {
    pub(crate) registry: Registry,
    /// Host object handed out for [`REGISTRY_KEY`] reads.
    registry_object: Object,
    pub(crate) options: WatchOptions,
}

impl WatchContext {
    pub(crate) fn new(registry: Registry, options: WatchOptions) -> Self {
        Self {
            registry_object: Object::host(registry.clone()),
            registry,
            options,
        }
    }
}

/// Proxy handler for one node: knows where in the tree it sits.
pub(crate) struct Interceptor {
    pub(crate) context: Rc<WatchContext>,
    /// `""` at the root, otherwise ends with the level separator.
    pub(crate) path: String,
}

impl ProxyHandler for Interceptor {
    fn get(&self, target: &Object, key: &PropertyKey, receiver: &Value) -> Result<Value, ObjectError> {
        if is_registry_key(key) {
            return Ok(Value::Object(self.context.registry_object.clone()));
        }

        let options = self.context.options;
        let is_own = target.has_own_property(key);
        let value = target.get_with_receiver(key, receiver)?;
        if options.only_own_property && !is_own {
            return Ok(value);
        }

        let path = build_path(&self.path, key, options.compact);
        self.context.registry.record_get(&path);
        trace!(%path, "read");

        let child = match value {
            Value::Object(child) => child,
            primitive => return Ok(primitive),
        };
        if target.get_own_property(key).is_some_and(|desc| desc.is_immutable()) {
            debug!(%path, "immutable binding, handing out the raw value");
            return Ok(Value::Object(child));
        }
        let node = track(child, self.context.clone(), child_prefix(&path));
        Ok(node.into_value())
    }

    fn set(
        &self,
        target: &Object,
        key: PropertyKey,
        value: Value,
        receiver: &Value,
    ) -> Result<bool, ObjectError> {
        if is_registry_key(&key) {
            debug!(path = %self.path, "rejected write to the registry key");
            return Ok(false);
        }

        let path = build_path(&self.path, &key, self.context.options.compact);
        self.context.registry.record_set(&path);
        trace!(%path, "write");

        target.set_with_receiver(key, value, receiver)
    }
}

/// Wrap `target` as a node at `path`, sharing `context` with the rest of the
/// tree. Called for the root and, lazily, for every composite value a read
/// hands out; the result is never cached.
pub(crate) fn track(target: Object, context: Rc<WatchContext>, path: String) -> TrackedNode {
    trace!(%path, "wrapping");
    let interceptor = Rc::new(Interceptor { context, path });
    let proxy = Object::proxy(target.clone(), interceptor.clone());
    TrackedNode::new(proxy, target, interceptor)
}
