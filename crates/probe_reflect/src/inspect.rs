use std::any::Any;
use std::fmt;

use crate::ops::{Array, Introspect, List, Map, Record, Simplify, Table};

// -----------------------------------------------------------------------------
// InspectKind

/// The structural category a node is handled as.
///
/// See [`Inspect::kind`] for how a node with several capabilities is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectKind {
    Array,
    List,
    Map,
    Record,
    Table,
    Simple,
    Object,
    Opaque,
}

impl fmt::Display for InspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array => f.pad("Array"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Record => f.pad("Record"),
            Self::Table => f.pad("Table"),
            Self::Simple => f.pad("Simple"),
            Self::Object => f.pad("Object"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

// -----------------------------------------------------------------------------
// Inspect

/// The foundational trait for values that can be traversed by a walker.
///
/// A type declares what it *is* through capability accessors. Every accessor
/// defaults to `None`; a type overrides the ones it supports. A type may
/// expose several capabilities (a map that is also an introspectable object),
/// and the walker then picks the most specific one.
///
/// Implementations must be `Send + Sync`: the same graph is read by many
/// request threads. Containers that can be written to use interior mutability.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Inspect, InspectKind, Node};
///
/// struct Token;
///
/// impl Inspect for Token {
///     fn type_name(&self) -> &'static str {
///         "Token"
///     }
/// }
///
/// let node = Node::new(Token);
/// assert_eq!(node.kind(), InspectKind::Opaque);
/// assert_eq!(node.to_string(), "Token");
/// ```
pub trait Inspect: Any + Send + Sync {
    /// A readable name of the concrete type.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Writes the display-string of this value.
    ///
    /// Used when a value is degraded instead of traversed, so it must not
    /// recurse into children.
    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }

    #[inline]
    fn as_array(&self) -> Option<&dyn Array> {
        None
    }

    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        None
    }

    #[inline]
    fn as_map(&self) -> Option<&dyn Map> {
        None
    }

    #[inline]
    fn as_record(&self) -> Option<&dyn Record> {
        None
    }

    #[inline]
    fn as_table(&self) -> Option<&dyn Table> {
        None
    }

    #[inline]
    fn as_simple(&self) -> Option<&dyn Simplify> {
        None
    }

    #[inline]
    fn as_object(&self) -> Option<&dyn Introspect> {
        None
    }

    /// Returns the most specific capability of this value.
    ///
    /// The order is fixed: `Array`, `List`, `Map`, `Record`, `Table`,
    /// `Simple`, `Object`, and `Opaque` when nothing is provided.
    fn kind(&self) -> InspectKind {
        if self.as_array().is_some() {
            InspectKind::Array
        } else if self.as_list().is_some() {
            InspectKind::List
        } else if self.as_map().is_some() {
            InspectKind::Map
        } else if self.as_record().is_some() {
            InspectKind::Record
        } else if self.as_table().is_some() {
            InspectKind::Table
        } else if self.as_simple().is_some() {
            InspectKind::Simple
        } else if self.as_object().is_some() {
            InspectKind::Object
        } else {
            InspectKind::Opaque
        }
    }
}
