use std::borrow::Cow;

use thiserror::Error;

/// A failure raised while reading or writing a single attribute of a node.
///
/// Returned by [`Introspect::invoke`] and by the field derivation of
/// [`Simplify`]. How much of a traversal it aborts is decided by the caller.
///
/// [`Introspect::invoke`]: crate::ops::Introspect::invoke
/// [`Simplify`]: crate::ops::Simplify
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AccessFault {
    message: Cow<'static, str>,
}

impl AccessFault {
    /// Creates a fault carrying `message`.
    #[inline]
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Fault for a method name the node does not provide.
    pub fn unknown_method(type_name: &str, method: &str) -> Self {
        Self::new(format!("`{type_name}` has no method `{method}`"))
    }

    /// Fault for a call with the wrong number of arguments.
    pub fn arity(method: &str, expected: usize, found: usize) -> Self {
        Self::new(format!(
            "`{method}` takes {expected} argument(s), {found} given"
        ))
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for AccessFault {
    #[inline]
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}
