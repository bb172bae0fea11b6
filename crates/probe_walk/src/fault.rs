use probe_reflect::AccessFault;

use crate::{Tree, WalkError};

/// Decides what a failing attribute contributes to a materialized tree.
///
/// Called when an accessor fails during full materialization of an object.
/// Failures on an explicitly requested path are always errors.
pub trait FaultHandler: Send + Sync {
    /// Returns the substitute for `attribute`, or the error aborting the request.
    fn handle(&self, attribute: &str, fault: AccessFault) -> Result<Tree, WalkError>;
}

/// Substitutes a failing attribute with `ERROR: <message>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoringFaultHandler;

impl FaultHandler for IgnoringFaultHandler {
    fn handle(&self, attribute: &str, fault: AccessFault) -> Result<Tree, WalkError> {
        log::warn!("attribute `{attribute}` replaced by an error marker: {fault}");
        Ok(Tree::text(format!("ERROR: {fault}")))
    }
}

/// Turns a failing attribute into [`WalkError::AttributeAccess`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EscalatingFaultHandler;

impl FaultHandler for EscalatingFaultHandler {
    #[inline]
    fn handle(&self, attribute: &str, fault: AccessFault) -> Result<Tree, WalkError> {
        Err(WalkError::attribute(attribute, fault))
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::AccessFault;

    use super::{EscalatingFaultHandler, FaultHandler, IgnoringFaultHandler};
    use crate::{Tree, WalkError};

    #[test]
    fn ignoring_substitutes() {
        let tree = IgnoringFaultHandler
            .handle("size", AccessFault::new("gone"))
            .unwrap();
        assert_eq!(tree, Tree::text("ERROR: gone"));
    }

    #[test]
    fn escalating_fails() {
        let err = EscalatingFaultHandler
            .handle("size", AccessFault::new("gone"))
            .unwrap_err();
        assert!(matches!(err, WalkError::AttributeAccess { ref attribute, .. } if attribute == "size"));
    }
}
