//! Property descriptors.

use crate::{Object, Value};

/// A property descriptor: the value or accessors of a property, plus its
/// attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyDescriptor {
    /// Data descriptor: has a `value` and a `writable` flag.
    Data {
        /// The stored value.
        value: Value,
        /// Can assignment change the value?
        writable: bool,
        /// Is the property listed during enumeration?
        enumerable: bool,
        /// Can the property be deleted or have its attributes changed?
        configurable: bool,
    },
    /// Accessor descriptor: has a getter and/or a setter.
    Accessor {
        /// Function called on read, with the receiver as `this`.
        get: Option<Object>,
        /// Function called on write, with the receiver as `this`.
        set: Option<Object>,
        /// Is the property listed during enumeration?
        enumerable: bool,
        /// Can the property be deleted or have its attributes changed?
        configurable: bool,
    },
}

impl PropertyDescriptor {
    /// A writable, enumerable, configurable data property.
    pub fn data(value: impl Into<Value>) -> Self {
        Self::Data {
            value: value.into(),
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// A non-writable, non-configurable (but enumerable) data property.
    pub fn frozen(value: impl Into<Value>) -> Self {
        Self::Data {
            value: value.into(),
            writable: false,
            enumerable: true,
            configurable: false,
        }
    }

    /// An enumerable, configurable accessor property.
    pub fn accessor(get: Option<Object>, set: Option<Object>) -> Self {
        Self::Accessor {
            get,
            set,
            enumerable: true,
            configurable: true,
        }
    }

    /// Builder-style: set the `writable` attribute (ignored for accessors).
    pub fn writable(mut self, flag: bool) -> Self {
        if let Self::Data { writable, .. } = &mut self {
            *writable = flag;
        }
        self
    }

    /// Builder-style: set the `enumerable` attribute.
    pub fn enumerable(mut self, flag: bool) -> Self {
        match &mut self {
            Self::Data { enumerable, .. } | Self::Accessor { enumerable, .. } => *enumerable = flag,
        }
        self
    }

    /// Builder-style: set the `configurable` attribute.
    pub fn configurable(mut self, flag: bool) -> Self {
        match &mut self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => {
                *configurable = flag
            }
        }
        self
    }

    /// Is this a data descriptor?
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// Is this an accessor descriptor?
    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    /// Is this a data descriptor with `writable: true`? Always `false` for accessors.
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { writable, .. } => *writable,
            Self::Accessor { .. } => false,
        }
    }

    /// Is this descriptor enumerable?
    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Data { enumerable, .. } | Self::Accessor { enumerable, .. } => *enumerable,
        }
    }

    /// Is this descriptor configurable?
    pub fn is_configurable(&self) -> bool {
        match self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => *configurable,
        }
    }

    /// Neither writable nor configurable: the binding can never change.
    pub fn is_immutable(&self) -> bool {
        !self.is_writable() && !self.is_configurable()
    }

    /// The value, if this is a data descriptor.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Replace the value of a data descriptor, keeping its attributes.
    pub(crate) fn with_value(mut self, new_value: Value) -> Self {
        if let Self::Data { value, .. } = &mut self {
            *value = new_value;
        }
        self
    }

    pub(crate) fn freeze(&mut self) {
        match self {
            Self::Data {
                writable,
                configurable,
                ..
            } => {
                *writable = false;
                *configurable = false;
            }
            Self::Accessor { configurable, .. } => *configurable = false,
        }
    }

    /// Would redefining a non-configurable property from `self` to `next` be allowed?
    pub(crate) fn permits_redefinition(&self, next: &PropertyDescriptor) -> bool {
        if self.is_configurable() {
            return true;
        }
        if next.is_configurable() || next.is_enumerable() != self.is_enumerable() {
            return false;
        }
        match (self, next) {
            (
                Self::Data {
                    value: current,
                    writable: false,
                    ..
                },
                Self::Data {
                    value: new,
                    writable: new_writable,
                    ..
                },
            ) => !new_writable && current == new,
            (Self::Data { .. }, Self::Data { .. }) => true,
            (
                Self::Accessor {
                    get: cur_get,
                    set: cur_set,
                    ..
                },
                Self::Accessor {
                    get: new_get,
                    set: new_set,
                    ..
                },
            ) => cur_get == new_get && cur_set == new_set,
            _ => false,
        }
    }
}
