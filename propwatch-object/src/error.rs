//! Errors raised by object model operations.

/// Error returned by operations on [`Object`](crate::Object) and [`Value`](crate::Value).
///
/// Ordinary rejections (writing a non-writable property, defining a property
/// on a non-extensible object) are reported as `Ok(false)` by the operation
/// itself. Only the cases a strict caller would see as an exception end up here.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ObjectError {
    /// The equivalent of a script-level `TypeError`.
    TypeError(String),

    /// A value that is not callable was called.
    NotCallable {
        /// Short description of the value that was called.
        what: String,
    },

    /// Setting a prototype would have created a cycle.
    PrototypeCycle,

    /// The prototype chain is deeper than the walker is willing to follow.
    PrototypeChainTooDeep {
        /// The configured maximum depth.
        max: usize,
    },
}

impl ObjectError {
    /// Shorthand for [`ObjectError::TypeError`].
    pub fn type_error(message: impl Into<String>) -> Self {
        ObjectError::TypeError(message.into())
    }
}

impl core::fmt::Display for ObjectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ObjectError::TypeError(message) => write!(f, "TypeError: {message}"),
            ObjectError::NotCallable { what } => write!(f, "TypeError: {what} is not a function"),
            ObjectError::PrototypeCycle => {
                write!(f, "TypeError: cyclic prototype chain is not allowed")
            }
            ObjectError::PrototypeChainTooDeep { max } => {
                write!(f, "TypeError: prototype chain exceeds {max} levels")
            }
        }
    }
}

impl core::error::Error for ObjectError {}
