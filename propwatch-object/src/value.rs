//! Dynamic values.

use core::fmt;
use std::rc::Rc;

use crate::{Object, ObjectError, PropertyKey, Symbol};

/// A dynamic value: a primitive or a reference to an [`Object`].
///
/// Objects compare by identity; everything else by value (numbers use `f64`
/// equality, so `NaN != NaN`).
#[derive(Clone, Default)]
pub enum Value {
    /// `undefined`
    #[default]
    Undefined,
    /// `null`
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// An immutable string.
    String(Rc<str>),
    /// A symbol.
    Symbol(Symbol),
    /// A reference to an object, array, function or proxy.
    Object(Object),
}

impl Value {
    /// `typeof` for this value.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Object(o) if o.is_callable() => "function",
            Value::Object(_) => "object",
        }
    }

    /// `undefined` or `null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Is this a structured object or a callable (anything held by reference)?
    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Is this a function (or a proxy around one)?
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Object(o) if o.is_callable())
    }

    /// The object this value refers to, if any.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// The string contents, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number, if this is one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Read a property, the way `value[key]` would.
    ///
    /// Reading from `undefined` or `null` is a `TypeError`. Strings expose
    /// `length`; every other primitive property reads as `undefined`.
    pub fn get(&self, key: impl Into<PropertyKey>) -> Result<Value, ObjectError> {
        let key = key.into();
        match self {
            Value::Object(o) => o.get_with_receiver(&key, self),
            Value::Undefined | Value::Null => Err(ObjectError::type_error(format!(
                "cannot read properties of {self} (reading '{key}')"
            ))),
            Value::String(s) if key.as_str() == Some("length") => {
                Ok(Value::from(s.encode_utf16().count()))
            }
            _ => Ok(Value::Undefined),
        }
    }

    /// Write a property, the way a sloppy-mode `value[key] = v` would.
    ///
    /// Returns `Ok(false)` when the write was rejected.
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<bool, ObjectError> {
        let key = key.into();
        match self {
            Value::Object(o) => o.set_with_receiver(key, value.into(), self),
            Value::Undefined | Value::Null => Err(ObjectError::type_error(format!(
                "cannot set properties of {self} (setting '{key}')"
            ))),
            _ => Ok(false),
        }
    }

    /// Write a property, the way a strict-mode `value[key] = v` would:
    /// a rejected write becomes a `TypeError`.
    pub fn put(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> Result<(), ObjectError> {
        let key = key.into();
        if self.set(key.clone(), value)? {
            Ok(())
        } else {
            Err(ObjectError::type_error(format!(
                "cannot assign to read only property '{key}' of {self}"
            )))
        }
    }

    /// Call this value as a function with the given `this`.
    pub fn call(&self, this: &Value, args: &[Value]) -> Result<Value, ObjectError> {
        match self {
            Value::Object(o) => o.call(this, args),
            _ => Err(ObjectError::NotCallable {
                what: self.to_display_string(),
            }),
        }
    }

    /// Read the method `key` from this value and call it with this value as `this`.
    pub fn invoke(&self, key: impl Into<PropertyKey>, args: &[Value]) -> Result<Value, ObjectError> {
        let key = key.into();
        let method = self.get(key.clone())?;
        if !method.is_callable() {
            return Err(ObjectError::NotCallable {
                what: format!("{self}.{key}"),
            });
        }
        method.call(self, args)
    }

    /// Convert to a property key, the way a computed member access would.
    pub fn to_property_key(&self) -> PropertyKey {
        match self {
            Value::String(s) => PropertyKey::String(s.clone()),
            Value::Symbol(s) => PropertyKey::Symbol(s.clone()),
            other => PropertyKey::from(other.to_display_string()),
        }
    }

    /// String conversion for display and `join`. Objects render as
    /// `[object <Class>]`.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.to_string(),
            Value::Symbol(s) => s.to_string(),
            Value::Object(o) => format!("[object {}]", o.class_name()),
        }
    }

    /// Numeric conversion used for lengths and indices.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::Symbol(_) | Value::Object(_) => f64::NAN,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => fmt::Debug::fmt(s, f),
            Value::Object(o) => fmt::Debug::fmt(o, f),
            other => f.write_str(&other.to_display_string()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Undefined
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(Rc::from(s))
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<&Object> for Value {
    fn from(o: &Object) -> Self {
        Value::Object(o.clone())
    }
}
