//! Objects, arrays, functions, host objects and proxies.
//!
//! Every internal method here follows the ordinary-object algorithms:
//!
//! - `[[Get]]` walks the prototype chain and calls getters with the receiver
//!   as `this`.
//! - `[[Set]]` looks for a setter or a non-writable binding along the chain,
//!   and otherwise defines the value on the *receiver*.
//! - Proxies only intercept `[[Get]]` and `[[Set]]` (through [`ProxyHandler`]);
//!   everything else (own-property lookup, definition, prototype access,
//!   calls) goes straight to the proxy's target.
//!
//! No `RefCell` borrow is ever held across a call into user code (getters,
//! setters, native functions, proxy traps), so handlers are free to re-enter
//! the object model.

use core::any::Any;
use core::cell::RefCell;
use core::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::{ObjectError, PropertyDescriptor, PropertyKey, Value};

/// Maximum prototype chain depth followed by `[[Get]]` and `[[Set]]`.
const MAX_PROTOTYPE_CHAIN_DEPTH: usize = 1024;

/// Signature of a native function: `(this, arguments) -> result`.
pub type NativeFn = dyn Fn(&Value, &[Value]) -> Result<Value, ObjectError>;

/// Intercepts reads and writes on a proxy object.
///
/// Both traps default to the ordinary behaviour on the target, so an empty
/// `impl ProxyHandler for MyHandler {}` yields a fully transparent proxy.
pub trait ProxyHandler: Any {
    /// `[[Get]]` trap. `receiver` is the value the read started from
    /// (usually the proxy itself).
    fn get(&self, target: &Object, key: &PropertyKey, receiver: &Value) -> Result<Value, ObjectError> {
        target.get_with_receiver(key, receiver)
    }

    /// `[[Set]]` trap. Return `Ok(false)` to reject the write.
    fn set(
        &self,
        target: &Object,
        key: PropertyKey,
        value: Value,
        receiver: &Value,
    ) -> Result<bool, ObjectError> {
        target.set_with_receiver(key, value, receiver)
    }
}

enum ObjectKind {
    Ordinary,
    Array { length: u32, length_writable: bool },
    Function(Rc<NativeFn>),
    Host(Rc<dyn Any>),
    Proxy {
        target: Object,
        handler: Rc<dyn ProxyHandler>,
    },
}

struct ObjectData {
    kind: ObjectKind,
    prototype: Option<Object>,
    extensible: bool,
    properties: IndexMap<PropertyKey, PropertyDescriptor>,
}

/// A shared handle to an object.
///
/// Cloning the handle does not clone the object: all clones observe the same
/// properties. Equality is identity.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

/// A non-owning handle to an [`Object`], see [`Object::downgrade`].
#[derive(Clone)]
pub struct WeakObject(Weak<RefCell<ObjectData>>);

impl WeakObject {
    /// The object, if it is still alive.
    pub fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }
}

impl Object {
    fn with_kind(kind: ObjectKind, prototype: Option<Object>) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            kind,
            prototype,
            extensible: true,
            properties: IndexMap::new(),
        })))
    }

    /// A new ordinary object.
    pub fn ordinary(prototype: Option<Object>) -> Self {
        Self::with_kind(ObjectKind::Ordinary, prototype)
    }

    /// A new, empty array. Its `length` is an own, non-configurable data property.
    pub fn array(prototype: Option<Object>) -> Self {
        Self::with_kind(
            ObjectKind::Array {
                length: 0,
                length_writable: true,
            },
            prototype,
        )
    }

    /// A new native function.
    pub fn function<F>(prototype: Option<Object>, f: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Result<Value, ObjectError> + 'static,
    {
        Self::with_kind(ObjectKind::Function(Rc::new(f)), prototype)
    }

    /// A prototype-less object carrying an opaque Rust payload, recoverable
    /// with [`Object::host_data`].
    pub fn host<T: Any>(payload: T) -> Self {
        Self::with_kind(ObjectKind::Host(Rc::new(payload)), None)
    }

    /// A proxy over `target`: reads and writes go through `handler`.
    pub fn proxy(target: Object, handler: Rc<dyn ProxyHandler>) -> Self {
        Self::with_kind(ObjectKind::Proxy { target, handler }, None)
    }

    /// Builder-style: define `key` as a plain data property and return `self`.
    ///
    /// Definitions the object rejects (non-extensible, non-configurable
    /// conflict) are skipped.
    pub fn with(self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Self {
        self.define_own_property(key.into(), PropertyDescriptor::data(value));
        self
    }

    /// Do both handles refer to the same object?
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// A non-owning handle to this object.
    pub fn downgrade(&self) -> WeakObject {
        WeakObject(Rc::downgrade(&self.0))
    }

    fn proxy_parts(&self) -> Option<(Object, Rc<dyn ProxyHandler>)> {
        match &self.0.borrow().kind {
            ObjectKind::Proxy { target, handler } => Some((target.clone(), handler.clone())),
            _ => None,
        }
    }

    /// The target of a proxy, `None` for any other object.
    pub fn proxy_target(&self) -> Option<Object> {
        self.proxy_parts().map(|(target, _)| target)
    }

    /// The handler of a proxy, `None` for any other object.
    pub fn proxy_handler(&self) -> Option<Rc<dyn ProxyHandler>> {
        self.proxy_parts().map(|(_, handler)| handler)
    }

    /// The payload of a host object, if this is one and it holds a `T`.
    pub fn host_data<T: Any>(&self) -> Option<Rc<T>> {
        match &self.0.borrow().kind {
            ObjectKind::Host(payload) => payload.clone().downcast::<T>().ok(),
            _ => None,
        }
    }

    /// Is this object a function, or a proxy around one?
    pub fn is_callable(&self) -> bool {
        match self.proxy_target() {
            Some(target) => target.is_callable(),
            None => matches!(self.0.borrow().kind, ObjectKind::Function(_)),
        }
    }

    /// Is this object an array, or a proxy around one?
    pub fn is_array(&self) -> bool {
        match self.proxy_target() {
            Some(target) => target.is_array(),
            None => matches!(self.0.borrow().kind, ObjectKind::Array { .. }),
        }
    }

    /// The built-in class tag used by `Object.prototype.toString`.
    pub fn class_name(&self) -> &'static str {
        if self.is_array() {
            "Array"
        } else if self.is_callable() {
            "Function"
        } else {
            "Object"
        }
    }

    // -- [[GetPrototypeOf]] / [[SetPrototypeOf]] ------------------------------

    /// `[[GetPrototypeOf]]()`
    pub fn prototype(&self) -> Option<Object> {
        match self.proxy_target() {
            Some(target) => target.prototype(),
            None => self.0.borrow().prototype.clone(),
        }
    }

    /// `[[SetPrototypeOf]](proto)`. Returns `Ok(false)` if the object is not
    /// extensible and `proto` differs from the current prototype.
    pub fn set_prototype(&self, proto: Option<Object>) -> Result<bool, ObjectError> {
        if let Some(target) = self.proxy_target() {
            return target.set_prototype(proto);
        }
        let mut current = proto.clone();
        while let Some(p) = current {
            if p.ptr_eq(self) {
                return Err(ObjectError::PrototypeCycle);
            }
            current = p.prototype();
        }
        let mut data = self.0.borrow_mut();
        let unchanged = match (&data.prototype, &proto) {
            (Some(a), Some(b)) => a.ptr_eq(b),
            (None, None) => true,
            _ => false,
        };
        if !data.extensible && !unchanged {
            return Ok(false);
        }
        data.prototype = proto;
        Ok(true)
    }

    // -- [[IsExtensible]] / [[PreventExtensions]] ------------------------------

    /// `[[IsExtensible]]()`
    pub fn is_extensible(&self) -> bool {
        match self.proxy_target() {
            Some(target) => target.is_extensible(),
            None => self.0.borrow().extensible,
        }
    }

    /// `[[PreventExtensions]]()`
    pub fn prevent_extensions(&self) {
        match self.proxy_target() {
            Some(target) => target.prevent_extensions(),
            None => self.0.borrow_mut().extensible = false,
        }
    }

    /// `Object.freeze`: no new properties, every own property non-configurable,
    /// every data property non-writable.
    pub fn freeze(&self) {
        if let Some(target) = self.proxy_target() {
            return target.freeze();
        }
        let mut data = self.0.borrow_mut();
        data.extensible = false;
        if let ObjectKind::Array {
            length_writable, ..
        } = &mut data.kind
        {
            *length_writable = false;
        }
        for desc in data.properties.values_mut() {
            desc.freeze();
        }
    }

    // -- [[GetOwnProperty]] / [[DefineOwnProperty]] ------------------------------

    /// `[[GetOwnProperty]](key)`: the own descriptor for `key`, if any.
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        if let Some(target) = self.proxy_target() {
            return target.get_own_property(key);
        }
        let data = self.0.borrow();
        if let ObjectKind::Array {
            length,
            length_writable,
        } = data.kind
            && key.as_str() == Some("length")
        {
            return Some(
                PropertyDescriptor::data(length)
                    .writable(length_writable)
                    .enumerable(false)
                    .configurable(false),
            );
        }
        data.properties.get(key).cloned()
    }

    /// Is `key` an own (non-inherited) property?
    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.get_own_property(key).is_some()
    }

    /// `[[DefineOwnProperty]](key, desc)`.
    ///
    /// Returns `false` if the definition is rejected: a new property on a
    /// non-extensible object, an incompatible change to a non-configurable
    /// property, or an invalid array `length`.
    pub fn define_own_property(&self, key: PropertyKey, desc: PropertyDescriptor) -> bool {
        if let Some(target) = self.proxy_target() {
            return target.define_own_property(key, desc);
        }
        let mut data = self.0.borrow_mut();
        let data = &mut *data;

        if let ObjectKind::Array {
            length,
            length_writable,
        } = &mut data.kind
        {
            if key.as_str() == Some("length") {
                return define_array_length(length, length_writable, &mut data.properties, desc);
            }
            if let Some(index) = key.array_index()
                && index >= *length
            {
                if !*length_writable || (!data.extensible && !data.properties.contains_key(&key)) {
                    return false;
                }
                *length = index + 1;
            }
        }

        match data.properties.get(&key) {
            Some(current) if !current.permits_redefinition(&desc) => false,
            Some(_) => {
                data.properties.insert(key, desc);
                true
            }
            None if !data.extensible => false,
            None => {
                data.properties.insert(key, desc);
                true
            }
        }
    }

    /// `[[Delete]](key)`. Returns `false` for non-configurable properties.
    pub fn delete(&self, key: &PropertyKey) -> bool {
        if let Some(target) = self.proxy_target() {
            return target.delete(key);
        }
        match self.get_own_property(key) {
            None => true,
            Some(desc) if !desc.is_configurable() => false,
            Some(_) => {
                self.0.borrow_mut().properties.shift_remove(key);
                true
            }
        }
    }

    /// `[[OwnPropertyKeys]]()`: array indices in ascending order, then string
    /// keys in insertion order, then symbols in insertion order.
    pub fn own_keys(&self) -> Vec<PropertyKey> {
        if let Some(target) = self.proxy_target() {
            return target.own_keys();
        }
        let data = self.0.borrow();
        let mut indices: Vec<(u32, PropertyKey)> = Vec::new();
        let mut strings: Vec<PropertyKey> = Vec::new();
        let mut symbols: Vec<PropertyKey> = Vec::new();
        for key in data.properties.keys() {
            match (key.array_index(), key) {
                (Some(index), _) => indices.push((index, key.clone())),
                (None, PropertyKey::String(_)) => strings.push(key.clone()),
                (None, PropertyKey::Symbol(_)) => symbols.push(key.clone()),
            }
        }
        indices.sort_by_key(|(index, _)| *index);
        let mut keys: Vec<PropertyKey> = indices.into_iter().map(|(_, key)| key).collect();
        if matches!(data.kind, ObjectKind::Array { .. }) {
            keys.push(PropertyKey::from("length"));
        }
        keys.extend(strings);
        keys.extend(symbols);
        keys
    }

    /// `[[HasProperty]](key)`: own or inherited.
    pub fn has_property(&self, key: &PropertyKey) -> bool {
        let mut current = Some(self.clone());
        let mut depth = 0;
        while let Some(object) = current {
            if object.has_own_property(key) {
                return true;
            }
            depth += 1;
            if depth > MAX_PROTOTYPE_CHAIN_DEPTH {
                return false;
            }
            current = object.prototype();
        }
        false
    }

    // -- [[Get]] / [[Set]] ------------------------------------------------------

    /// `[[Get]](key, self)`
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value, ObjectError> {
        self.get_with_receiver(&key.into(), &Value::Object(self.clone()))
    }

    /// `[[Get]](key, receiver)`: ordinary property lookup; getters run with
    /// `receiver` as `this`. Proxies anywhere along the chain get their `get`
    /// trap called.
    pub fn get_with_receiver(&self, key: &PropertyKey, receiver: &Value) -> Result<Value, ObjectError> {
        let mut current = self.clone();
        for _ in 0..MAX_PROTOTYPE_CHAIN_DEPTH {
            if let Some((target, handler)) = current.proxy_parts() {
                return handler.get(&target, key, receiver);
            }
            match current.get_own_property(key) {
                Some(PropertyDescriptor::Data { value, .. }) => return Ok(value),
                Some(PropertyDescriptor::Accessor { get: Some(getter), .. }) => {
                    return getter.call(receiver, &[]);
                }
                Some(PropertyDescriptor::Accessor { get: None, .. }) => return Ok(Value::Undefined),
                None => match current.prototype() {
                    Some(proto) => current = proto,
                    None => return Ok(Value::Undefined),
                },
            }
        }
        Err(ObjectError::PrototypeChainTooDeep {
            max: MAX_PROTOTYPE_CHAIN_DEPTH,
        })
    }

    /// `[[Set]](key, value, self)`
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<bool, ObjectError> {
        self.set_with_receiver(key.into(), value.into(), &Value::Object(self.clone()))
    }

    /// `[[Set]](key, value, receiver)`: ordinary assignment.
    ///
    /// Setters found along the chain run with `receiver` as `this`; otherwise
    /// the value lands as an own data property of `receiver`. Returns
    /// `Ok(false)` when the write is rejected.
    pub fn set_with_receiver(
        &self,
        key: PropertyKey,
        value: Value,
        receiver: &Value,
    ) -> Result<bool, ObjectError> {
        let mut current = self.clone();
        let mut found = None;
        for depth in 0.. {
            if depth == MAX_PROTOTYPE_CHAIN_DEPTH {
                return Err(ObjectError::PrototypeChainTooDeep {
                    max: MAX_PROTOTYPE_CHAIN_DEPTH,
                });
            }
            if let Some((target, handler)) = current.proxy_parts() {
                return handler.set(&target, key, value, receiver);
            }
            if let Some(desc) = current.get_own_property(&key) {
                found = Some(desc);
                break;
            }
            match current.prototype() {
                Some(proto) => current = proto,
                None => break,
            }
        }

        match found {
            Some(PropertyDescriptor::Accessor { set: Some(setter), .. }) => {
                setter.call(receiver, &[value])?;
                Ok(true)
            }
            Some(PropertyDescriptor::Accessor { set: None, .. }) => Ok(false),
            Some(PropertyDescriptor::Data {
                writable: false, ..
            }) => Ok(false),
            _ => {
                let Value::Object(receiver) = receiver else {
                    return Ok(false);
                };
                match receiver.get_own_property(&key) {
                    Some(existing) if existing.is_accessor() || !existing.is_writable() => Ok(false),
                    Some(existing) => Ok(receiver.define_own_property(key, existing.with_value(value))),
                    None => Ok(receiver.define_own_property(key, PropertyDescriptor::data(value))),
                }
            }
        }
    }

    // -- [[Call]] ---------------------------------------------------------------

    /// `[[Call]](this, args)`. Calling a proxy calls its target.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
        if let Some(target) = self.proxy_target() {
            return target.call(this, args);
        }
        let function = match &self.0.borrow().kind {
            ObjectKind::Function(f) => f.clone(),
            _ => {
                return Err(ObjectError::NotCallable {
                    what: format!("[object {}]", self.class_name()),
                });
            }
        };
        function(this, args)
    }
}

fn define_array_length(
    length: &mut u32,
    length_writable: &mut bool,
    properties: &mut IndexMap<PropertyKey, PropertyDescriptor>,
    desc: PropertyDescriptor,
) -> bool {
    let PropertyDescriptor::Data {
        value,
        writable,
        enumerable: false,
        configurable: false,
    } = desc
    else {
        return false;
    };
    let Some(new_length) = value
        .as_number()
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n < f64::from(u32::MAX))
        .map(|n| n as u32)
    else {
        return false;
    };
    if new_length != *length {
        if !*length_writable {
            return false;
        }
        properties.retain(|key, _| key.array_index().is_none_or(|index| index < new_length));
        *length = new_length;
    }
    if !writable {
        *length_writable = false;
    }
    true
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(data) = self.0.try_borrow() else {
            return f.write_str("Object(<borrowed>)");
        };
        let kind = match data.kind {
            ObjectKind::Ordinary => "Object",
            ObjectKind::Array { .. } => "Array",
            ObjectKind::Function(_) => "Function",
            ObjectKind::Host(_) => "Host",
            ObjectKind::Proxy { .. } => "Proxy",
        };
        let keys: Vec<&PropertyKey> = data.properties.keys().collect();
        f.debug_struct(kind)
            .field("ptr", &Rc::as_ptr(&self.0))
            .field("keys", &keys)
            .finish()
    }
}
