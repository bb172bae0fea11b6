use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::Inspect;

// -----------------------------------------------------------------------------
// Scalar

/// A typed leaf value.
///
/// Scalars are never shared and never take part in cycle detection.
///
/// # Examples
///
/// ```
/// use probe_reflect::Scalar;
///
/// let s = Scalar::Int(42);
/// assert_eq!(s.type_name(), "i32");
/// assert_eq!(s.to_string(), "42");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Text(String),
}

impl Scalar {
    /// Returns the canonical type name, as understood by [`convert`](crate::convert::convert).
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Byte(_) => "i8",
            Self::Short(_) => "i16",
            Self::Int(_) => "i32",
            Self::Long(_) => "i64",
            Self::Float(_) => "f32",
            Self::Double(_) => "f64",
            Self::Char(_) => "char",
            Self::Text(_) => "String",
        }
    }

    /// Returns the text if this is a [`Scalar::Text`].
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => fmt::Display::fmt(v, f),
            Self::Byte(v) => fmt::Display::fmt(v, f),
            Self::Short(v) => fmt::Display::fmt(v, f),
            Self::Int(v) => fmt::Display::fmt(v, f),
            Self::Long(v) => fmt::Display::fmt(v, f),
            Self::Float(v) => fmt::Display::fmt(v, f),
            Self::Double(v) => fmt::Display::fmt(v, f),
            Self::Char(v) => fmt::Display::fmt(v, f),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Byte(v) => serializer.serialize_i8(*v),
            Self::Short(v) => serializer.serialize_i16(*v),
            Self::Int(v) => serializer.serialize_i32(*v),
            Self::Long(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f32(*v),
            Self::Double(v) => serializer.serialize_f64(*v),
            Self::Char(v) => serializer.serialize_char(*v),
            Self::Text(v) => serializer.serialize_str(v),
        }
    }
}

// -----------------------------------------------------------------------------
// Node

/// Identity token of a [`Node`], derived from its allocation address.
///
/// Two handles have the same id exactly when they point to the same value;
/// structural equality never plays a role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// A shared handle to a complex value.
///
/// Cloning a `Node` clones the handle, not the value, so graphs built from
/// nodes may contain cycles.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Node, ops::DynamicList};
///
/// let a = Node::new(DynamicList::new());
/// let b = a.clone();
/// assert!(a.ptr_eq(&b));
/// assert!(a.downcast_ref::<DynamicList>().is_some());
/// ```
#[derive(Clone)]
pub struct Node(Arc<dyn Inspect>);

impl Node {
    /// Moves `value` into a new shared node.
    #[inline]
    pub fn new<T: Inspect>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wraps an existing shared value.
    #[inline]
    pub fn from_arc(inner: Arc<dyn Inspect>) -> Self {
        Self(inner)
    }

    /// Returns the identity token of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        NodeId(Arc::as_ptr(&self.0).cast::<()>() as usize)
    }

    /// Returns `true` if both handles point to the same value.
    #[inline]
    pub fn ptr_eq(&self, other: &Node) -> bool {
        self.id() == other.id()
    }

    /// Returns the inspectable value behind this handle.
    #[inline]
    pub fn inspect(&self) -> &dyn Inspect {
        &*self.0
    }

    /// Downcasts the value to type `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Inspect>(&self) -> Option<&T> {
        let any: &dyn Any = &*self.0;
        any.downcast_ref::<T>()
    }
}

impl Deref for Node {
    type Target = dyn Inspect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({}@{})", self.0.type_name(), self.id())
    }
}

impl fmt::Display for Node {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt_display(f)
    }
}

// -----------------------------------------------------------------------------
// Value

/// Any value of an inspected graph.
///
/// Equality compares scalars by value and nodes by identity.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, Scalar};
///
/// assert_eq!(Value::from(7), Value::Scalar(Scalar::Int(7)));
/// assert_eq!(Value::from("x").to_string(), "x");
/// assert_eq!(Value::Null.to_string(), "null");
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Scalar(Scalar),
    Node(Node),
}

impl Value {
    /// Moves `value` into a new node.
    #[inline]
    pub fn node<T: Inspect>(value: T) -> Self {
        Self::Node(Node::new(value))
    }

    /// Creates a text scalar.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    #[inline]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Returns the runtime type name: `"null"`, the scalar type or the node type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(scalar) => scalar.type_name(),
            Self::Node(node) => node.type_name(),
        }
    }

    /// Returns `true` if `self` is a node identical to `node`.
    #[inline]
    pub fn is_same_node(&self, node: &Node) -> bool {
        matches!(self, Self::Node(inner) if inner.ptr_eq(node))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Node(a), Self::Node(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            Self::Node(node) => fmt::Display::fmt(node, f),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::$variant(value))
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    String => Text,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.into()))
    }
}

impl From<Scalar> for Value {
    #[inline]
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Node> for Value {
    #[inline]
    fn from(value: Node) -> Self {
        Self::Node(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, Scalar, Value};
    use crate::ops::DynamicList;

    #[test]
    fn node_identity_is_not_structural() {
        let a = Node::new(DynamicList::new());
        let b = Node::new(DynamicList::new());
        assert!(!a.ptr_eq(&b));
        assert_ne!(Value::from(a.clone()), Value::from(b));
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert!(Value::from(a.clone()).is_same_node(&a));
    }

    #[test]
    fn scalar_serializes_with_its_wire_type() {
        assert_eq!(serde_json::to_string(&Scalar::Long(5)).unwrap(), "5");
        assert_eq!(serde_json::to_string(&Scalar::Bool(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&Scalar::Text("a".into())).unwrap(),
            "\"a\""
        );
    }

    #[test]
    fn option_maps_to_null() {
        assert!(Value::from(None::<i32>).is_null());
        assert_eq!(Value::from(Some(1_i64)).type_name(), "i64");
    }
}
