use std::borrow::Cow;

use probe_reflect::AccessFault;
use probe_reflect::convert::ConversionError;
use thiserror::Error;

/// An error that aborts a read or write request.
///
/// Limits and cycles never produce an error, they degrade the output instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum WalkError {
    /// A path segment does not name a child of the value it was applied to.
    #[error("unknown path element `{element}`: {reason}")]
    UnknownPathElement {
        element: String,
        reason: Cow<'static, str>,
    },
    /// The target cannot be written.
    #[error("cannot write into `{type_name}`: {reason}")]
    UnsupportedWrite {
        type_name: String,
        reason: Cow<'static, str>,
    },
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// Reading or writing an attribute failed and the failure was escalated.
    #[error("cannot access attribute `{attribute}`: {fault}")]
    AttributeAccess {
        attribute: String,
        #[source]
        fault: AccessFault,
    },
    /// No handler accepted a node. The catch-all handler makes this unreachable
    /// for a well-formed chain.
    #[error("no handler found for `{type_name}`")]
    NoHandlerFound { type_name: String },
}

impl WalkError {
    #[inline]
    pub(crate) fn unknown(element: impl Into<String>, reason: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownPathElement {
            element: element.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn unsupported(
        type_name: impl Into<String>,
        reason: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::UnsupportedWrite {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    #[inline]
    pub(crate) fn attribute(attribute: impl Into<String>, fault: AccessFault) -> Self {
        Self::AttributeAccess {
            attribute: attribute.into(),
            fault,
        }
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::AccessFault;
    use probe_reflect::convert::convert;

    use super::WalkError;

    #[test]
    fn messages_name_the_culprit() {
        let err = WalkError::unknown("7", "index out of bounds");
        assert_eq!(err.to_string(), "unknown path element `7`: index out of bounds");

        let err = WalkError::attribute("size", AccessFault::new("disk gone"));
        assert_eq!(err.to_string(), "cannot access attribute `size`: disk gone");
    }

    #[test]
    fn conversion_error_is_wrapped() {
        let err: WalkError = convert("x", "i32").unwrap_err().into();
        assert!(matches!(err, WalkError::Conversion(ref inner) if inner.literal == "x"));
    }
}
