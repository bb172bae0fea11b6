use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fault::{EscalatingFaultHandler, FaultHandler, IgnoringFaultHandler};

// -----------------------------------------------------------------------------
// Limits

/// Bounds applied to a single traversal.
///
/// `None` means unlimited. `Some(0)` is a real limit: a depth of zero expands
/// the root but none of its children, a collection size of zero yields empty
/// collections, an object count of zero degrades every complex value.
///
/// # Examples
///
/// ```
/// use probe_walk::Limits;
///
/// let ceiling = Limits::UNLIMITED.with_max_depth(5);
/// let requested = Limits::UNLIMITED.with_max_depth(10).with_max_objects(100);
///
/// let effective = ceiling.clamp(&requested);
/// assert_eq!(effective.max_depth, Some(5));
/// assert_eq!(effective.max_objects, Some(100));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum number of complex values open above a value for it to be expanded.
    pub max_depth: Option<usize>,
    /// Maximum number of elements read from a single collection.
    pub max_collection_size: Option<usize>,
    /// Maximum number of complex values opened over the whole traversal.
    pub max_objects: Option<usize>,
}

impl Limits {
    pub const UNLIMITED: Self = Self {
        max_depth: None,
        max_collection_size: None,
        max_objects: None,
    };

    #[inline]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    #[inline]
    pub const fn with_max_collection_size(mut self, max_collection_size: usize) -> Self {
        self.max_collection_size = Some(max_collection_size);
        self
    }

    #[inline]
    pub const fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.max_objects = Some(max_objects);
        self
    }

    /// Applies `requested` below `self`, which acts as the ceiling.
    ///
    /// A requested `None` keeps the ceiling, a requested bound can only lower it.
    pub fn clamp(&self, requested: &Limits) -> Limits {
        fn lower(ceiling: Option<usize>, requested: Option<usize>) -> Option<usize> {
            match (ceiling, requested) {
                (Some(c), Some(r)) => Some(c.min(r)),
                (c, None) => c,
                (None, r) => r,
            }
        }

        Limits {
            max_depth: lower(self.max_depth, requested.max_depth),
            max_collection_size: lower(self.max_collection_size, requested.max_collection_size),
            max_objects: lower(self.max_objects, requested.max_objects),
        }
    }
}

// -----------------------------------------------------------------------------
// FaultPolicy

/// Selects the default [`FaultHandler`] of a walker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Substitute failing attributes with an error string.
    #[default]
    Ignore,
    /// Abort the request on the first failing attribute.
    Escalate,
}

impl FaultPolicy {
    /// Returns the handler implementing this policy.
    pub fn handler(self) -> Arc<dyn FaultHandler> {
        match self {
            Self::Ignore => Arc::new(IgnoringFaultHandler),
            Self::Escalate => Arc::new(EscalatingFaultHandler),
        }
    }
}

// -----------------------------------------------------------------------------
// WalkerConfig

/// Construction-time configuration of a [`Walker`](crate::Walker).
///
/// Every field has a default, so partial documents deserialize.
///
/// ```
/// use probe_walk::{FaultPolicy, WalkerConfig};
///
/// let config: WalkerConfig = serde_json::from_str(
///     r#"{ "limits": { "max_depth": 8 }, "fault_policy": "escalate" }"#,
/// ).unwrap();
///
/// assert_eq!(config.limits.max_depth, Some(8));
/// assert_eq!(config.limits.max_objects, None);
/// assert_eq!(config.fault_policy, FaultPolicy::Escalate);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkerConfig {
    /// Ceiling for every traversal.
    pub limits: Limits,
    pub fault_policy: FaultPolicy,
}

// -----------------------------------------------------------------------------
// ExtractOptions

/// Per-call settings of an extraction.
#[derive(Clone, Default)]
pub struct ExtractOptions {
    limits: Limits,
    fault_handler: Option<Arc<dyn FaultHandler>>,
}

impl ExtractOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests limits for this call. They are clamped to the walker's ceiling.
    #[inline]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.limits.max_depth = Some(max_depth);
        self
    }

    #[inline]
    pub fn with_max_collection_size(mut self, max_collection_size: usize) -> Self {
        self.limits.max_collection_size = Some(max_collection_size);
        self
    }

    #[inline]
    pub fn with_max_objects(mut self, max_objects: usize) -> Self {
        self.limits.max_objects = Some(max_objects);
        self
    }

    /// Replaces the walker's fault handler for this call.
    #[inline]
    pub fn with_fault_handler(mut self, handler: Arc<dyn FaultHandler>) -> Self {
        self.fault_handler = Some(handler);
        self
    }

    #[inline]
    pub fn with_fault_policy(self, policy: FaultPolicy) -> Self {
        self.with_fault_handler(policy.handler())
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    #[inline]
    pub fn fault_handler(&self) -> Option<&Arc<dyn FaultHandler>> {
        self.fault_handler.as_ref()
    }
}

impl fmt::Debug for ExtractOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractOptions")
            .field("limits", &self.limits)
            .field("fault_handler", &self.fault_handler.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{FaultPolicy, Limits, WalkerConfig};

    #[test]
    fn clamp_never_raises_the_ceiling() {
        let ceiling = Limits {
            max_depth: Some(3),
            max_collection_size: None,
            max_objects: Some(0),
        };
        let requested = Limits {
            max_depth: Some(7),
            max_collection_size: Some(2),
            max_objects: None,
        };
        assert_eq!(
            ceiling.clamp(&requested),
            Limits {
                max_depth: Some(3),
                max_collection_size: Some(2),
                max_objects: Some(0),
            }
        );
        assert_eq!(ceiling.clamp(&Limits::UNLIMITED), ceiling);
        assert_eq!(Limits::UNLIMITED.clamp(&requested), requested);
    }

    #[test]
    fn config_loads_from_ron() {
        let config: WalkerConfig = ron::from_str(
            "(limits: (max_depth: Some(2), max_collection_size: Some(50)), fault_policy: ignore)",
        )
        .unwrap();
        assert_eq!(config.limits.max_depth, Some(2));
        assert_eq!(config.limits.max_collection_size, Some(50));
        assert_eq!(config.limits.max_objects, None);
        assert_eq!(config.fault_policy, FaultPolicy::Ignore);
    }

    #[test]
    fn empty_document_is_the_default() {
        let config: WalkerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WalkerConfig::default());
        assert_eq!(config.limits, Limits::UNLIMITED);
    }
}
