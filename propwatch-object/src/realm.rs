//! Intrinsic prototypes and the constructors that use them.

use crate::{Object, ObjectError, PropertyDescriptor, PropertyKey, Value, WeakObject, WellKnownSymbol};

/// A set of intrinsic prototypes.
///
/// Objects created through the same realm share `Object.prototype`,
/// `Array.prototype` and `Function.prototype`, so inherited methods such as
/// `toString` or `map` resolve through the prototype chain and are *not*
/// own properties of the objects that use them.
#[derive(Clone)]
pub struct Realm {
    object_prototype: Object,
    function_prototype: Object,
    array_prototype: Object,
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Realm {
    /// Create a realm with freshly allocated intrinsics.
    pub fn new() -> Self {
        let object_prototype = Object::ordinary(None);
        let function_prototype = Object::ordinary(Some(object_prototype.clone()));
        let array_prototype = Object::array(Some(object_prototype.clone()));
        let realm = Realm {
            object_prototype,
            function_prototype,
            array_prototype,
        };

        realm.install_method(&realm.object_prototype, "toString", object_to_string);
        realm.install_method(&realm.object_prototype, "hasOwnProperty", object_has_own_property);

        let arrays = realm.array_prototype.downgrade();
        realm.install_method(&realm.array_prototype, "map", move |this, args| {
            array_map(&arrays, this, args)
        });
        realm.install_method(&realm.array_prototype, "forEach", array_for_each);
        realm.install_method(&realm.array_prototype, "push", array_push);
        realm.install_method(&realm.array_prototype, "join", array_join);

        realm
    }

    fn install_method<F>(&self, on: &Object, name: &str, f: F)
    where
        F: Fn(&Value, &[Value]) -> Result<Value, ObjectError> + 'static,
    {
        let method = self.function(name, f);
        on.define_own_property(
            PropertyKey::from(name),
            PropertyDescriptor::data(method).enumerable(false),
        );
    }

    /// `Object.prototype`
    pub fn object_prototype(&self) -> &Object {
        &self.object_prototype
    }

    /// `Function.prototype`
    pub fn function_prototype(&self) -> &Object {
        &self.function_prototype
    }

    /// `Array.prototype`
    pub fn array_prototype(&self) -> &Object {
        &self.array_prototype
    }

    /// A new empty object inheriting from `Object.prototype`.
    pub fn object(&self) -> Object {
        Object::ordinary(Some(self.object_prototype.clone()))
    }

    /// A new array inheriting from `Array.prototype`.
    pub fn array<I>(&self, items: I) -> Object
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let array = Object::array(Some(self.array_prototype.clone()));
        for (index, item) in items.into_iter().enumerate() {
            array.define_own_property(PropertyKey::from(index), PropertyDescriptor::data(item));
        }
        array
    }

    /// A new native function inheriting from `Function.prototype`, with an own
    /// (non-writable, configurable) `name`.
    pub fn function<F>(&self, name: &str, f: F) -> Object
    where
        F: Fn(&Value, &[Value]) -> Result<Value, ObjectError> + 'static,
    {
        let function = Object::function(Some(self.function_prototype.clone()), f);
        function.define_own_property(
            PropertyKey::from("name"),
            PropertyDescriptor::data(name)
                .writable(false)
                .enumerable(false),
        );
        function
    }

    /// Build an object graph from JSON. Objects and arrays become fresh
    /// objects of this realm; numbers become `f64`.
    pub fn from_json(&self, json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::from(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::Object(self.array(items.iter().map(|item| self.from_json(item))))
            }
            serde_json::Value::Object(entries) => {
                let object = self.object();
                for (key, value) in entries {
                    object.define_own_property(
                        PropertyKey::from(key.as_str()),
                        PropertyDescriptor::data(self.from_json(value)),
                    );
                }
                Value::Object(object)
            }
        }
    }
}

fn argument(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or_default()
}

fn this_object<'a>(this: &'a Value, method: &str) -> Result<&'a Object, ObjectError> {
    this.as_object()
        .ok_or_else(|| ObjectError::type_error(format!("{method} called on non-object")))
}

/// `ToLength(this.length)`, read through the receiver.
fn length_of(this: &Value) -> Result<usize, ObjectError> {
    let length = this.get("length")?.to_number();
    if length.is_nan() || length <= 0.0 {
        Ok(0)
    } else {
        Ok(length.min(u32::MAX as f64) as usize)
    }
}

fn callback_argument(args: &[Value], method: &str) -> Result<Value, ObjectError> {
    let callback = argument(args, 0);
    if callback.is_callable() {
        Ok(callback)
    } else {
        Err(ObjectError::NotCallable {
            what: format!("{callback} (callback of {method})"),
        })
    }
}

/// `Object.prototype.toString`
fn object_to_string(this: &Value, _args: &[Value]) -> Result<Value, ObjectError> {
    let builtin = match this {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Symbol(_) => "Symbol",
        Value::Object(o) => o.class_name(),
    };
    if this.is_nullish() {
        return Ok(Value::from(format!("[object {builtin}]")));
    }
    let tag = this.get(WellKnownSymbol::ToStringTag)?;
    let tag = tag.as_str().unwrap_or(builtin);
    Ok(Value::from(format!("[object {tag}]")))
}

/// `Object.prototype.hasOwnProperty`
fn object_has_own_property(this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
    let object = this_object(this, "hasOwnProperty")?;
    let key = argument(args, 0).to_property_key();
    Ok(Value::Bool(object.has_own_property(&key)))
}

/// `Array.prototype.map`
fn array_map(arrays: &WeakObject, this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
    let object = this_object(this, "Array.prototype.map")?;
    let length = length_of(this)?;
    let callback = callback_argument(args, "Array.prototype.map")?;
    let this_arg = argument(args, 1);

    let result = Object::array(arrays.upgrade());
    result.define_own_property(
        PropertyKey::from("length"),
        PropertyDescriptor::data(length)
            .enumerable(false)
            .configurable(false),
    );
    for index in 0..length {
        let key = PropertyKey::from(index);
        if !object.has_property(&key) {
            continue;
        }
        let element = this.get(key.clone())?;
        let mapped = callback.call(&this_arg, &[element, Value::from(index), this.clone()])?;
        result.define_own_property(key, PropertyDescriptor::data(mapped));
    }
    Ok(Value::Object(result))
}

/// `Array.prototype.forEach`
fn array_for_each(this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
    let object = this_object(this, "Array.prototype.forEach")?;
    let length = length_of(this)?;
    let callback = callback_argument(args, "Array.prototype.forEach")?;
    let this_arg = argument(args, 1);

    for index in 0..length {
        let key = PropertyKey::from(index);
        if !object.has_property(&key) {
            continue;
        }
        let element = this.get(key)?;
        callback.call(&this_arg, &[element, Value::from(index), this.clone()])?;
    }
    Ok(Value::Undefined)
}

/// `Array.prototype.push`
fn array_push(this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
    this_object(this, "Array.prototype.push")?;
    let mut length = length_of(this)?;
    for item in args {
        this.put(length, item.clone())?;
        length += 1;
    }
    this.put("length", length)?;
    Ok(Value::from(length))
}

/// `Array.prototype.join`
fn array_join(this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
    this_object(this, "Array.prototype.join")?;
    let length = length_of(this)?;
    let separator = match argument(args, 0) {
        Value::Undefined => ",".to_string(),
        other => other.to_display_string(),
    };

    let mut parts = Vec::new();
    for index in 0..length {
        let element = this.get(index)?;
        parts.push(if element.is_nullish() {
            String::new()
        } else {
            element.to_display_string()
        });
    }
    Ok(Value::from(parts.join(&separator)))
}
