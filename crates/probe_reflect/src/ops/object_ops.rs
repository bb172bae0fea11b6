use std::borrow::Cow;
use std::fmt;
use std::sync::RwLock;

use probe_utils::sync::{read, write};

use crate::{AccessFault, Inspect, Value};

// -----------------------------------------------------------------------------
// MethodInfo

/// Describes one invocable method of an [`Introspect`] value.
///
/// Parameter types are declared by name, using the names understood by
/// [`convert`](crate::convert::convert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    name: Cow<'static, str>,
    params: Vec<&'static str>,
    is_static: bool,
}

impl MethodInfo {
    /// Creates an instance method.
    pub fn new(name: impl Into<Cow<'static, str>>, params: &[&'static str]) -> Self {
        Self {
            name: name.into(),
            params: params.to_vec(),
            is_static: false,
        }
    }

    /// Creates a zero-argument instance method.
    #[inline]
    pub fn accessor(name: impl Into<Cow<'static, str>>) -> Self {
        Self::new(name, &[])
    }

    /// Creates a one-argument instance method.
    #[inline]
    pub fn mutator(name: impl Into<Cow<'static, str>>, param: &'static str) -> Self {
        Self::new(name, &[param])
    }

    /// Marks the method as static (not bound to the value).
    #[inline]
    pub fn into_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn params(&self) -> &[&'static str] {
        &self.params
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }
}

// -----------------------------------------------------------------------------
// Introspect

/// A value whose attributes are reachable through named methods.
///
/// This is the catch-all capability. The walker only relies on method names,
/// arity and the static flag: zero-argument methods named `get_x`, `is_x` or
/// `has_x` are read as attribute `x`, and `set_x` with one parameter writes it.
///
/// # Examples
///
/// ```
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use probe_reflect::{AccessFault, Value, ops::{Introspect, MethodInfo}};
///
/// struct Counter(AtomicI64);
///
/// impl Introspect for Counter {
///     fn methods(&self) -> Vec<MethodInfo> {
///         vec![
///             MethodInfo::accessor("get_count"),
///             MethodInfo::mutator("set_count", "i64"),
///         ]
///     }
///
///     fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, AccessFault> {
///         match (method, args.as_slice()) {
///             ("get_count", []) => Ok(Value::from(self.0.load(Ordering::Relaxed))),
///             ("set_count", [Value::Scalar(probe_reflect::Scalar::Long(v))]) => {
///                 self.0.store(*v, Ordering::Relaxed);
///                 Ok(Value::Null)
///             }
///             _ => Err(AccessFault::unknown_method("Counter", method)),
///         }
///     }
/// }
///
/// let c = Counter(AtomicI64::new(3));
/// assert_eq!(c.invoke("get_count", vec![]).unwrap(), Value::from(3_i64));
/// ```
pub trait Introspect: Send + Sync {
    /// Lists the methods of this value.
    fn methods(&self) -> Vec<MethodInfo>;

    /// Invokes `method` with already converted arguments.
    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, AccessFault>;
}

// -----------------------------------------------------------------------------
// Dynamic Object

/// A dynamic object with named properties.
///
/// Every property `x` is exposed as an accessor (`is_x` for boolean values,
/// `get_x` otherwise). Scalar and null properties also get a `set_x`
/// mutator whose parameter type is the property's current type
/// (`String` for null). Node properties are read-only through methods but can
/// be replaced with [`DynamicObject::insert`], which is how cyclic graphs are
/// built.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Node, Value, ops::{DynamicObject, Introspect}};
///
/// let person = Node::new(DynamicObject::new("Person").with("name", "Ada").with("admin", true));
/// let object = person.downcast_ref::<DynamicObject>().unwrap();
///
/// // A self reference.
/// object.insert("me", person.clone());
///
/// let names: Vec<String> = object.methods().iter().map(|m| m.name().to_owned()).collect();
/// assert_eq!(names, ["get_name", "set_name", "is_admin", "set_admin", "get_me"]);
/// assert_eq!(object.invoke("get_name", vec![]).unwrap(), Value::from("Ada"));
/// ```
pub struct DynamicObject {
    type_name: &'static str,
    properties: RwLock<Vec<(String, Value)>>,
}

impl DynamicObject {
    #[inline]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            properties: RwLock::new(Vec::new()),
        }
    }

    /// Sets a property and returns `self`.
    #[inline]
    pub fn with(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a property, returning its previous value.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        let mut properties = write(&self.properties);
        match properties.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                properties.push((name, value));
                None
            }
        }
    }

    /// Returns the property `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        read(&self.properties)
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl Introspect for DynamicObject {
    fn methods(&self) -> Vec<MethodInfo> {
        let properties = read(&self.properties);
        let mut methods = Vec::with_capacity(properties.len() * 2);
        for (name, value) in properties.iter() {
            let accessor = match value.as_scalar() {
                Some(crate::Scalar::Bool(_)) => format!("is_{name}"),
                _ => format!("get_{name}"),
            };
            methods.push(MethodInfo::accessor(accessor));
            match value {
                Value::Null => methods.push(MethodInfo::mutator(format!("set_{name}"), "String")),
                Value::Scalar(scalar) => {
                    methods.push(MethodInfo::mutator(format!("set_{name}"), scalar.type_name()));
                }
                Value::Node(_) => {}
            }
        }
        methods
    }

    fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, AccessFault> {
        let getter = method
            .strip_prefix("get_")
            .or_else(|| method.strip_prefix("is_"));
        if let Some(name) = getter {
            if !args.is_empty() {
                return Err(AccessFault::arity(method, 0, args.len()));
            }
            return self
                .get(name)
                .ok_or_else(|| AccessFault::unknown_method(self.type_name, method));
        }

        if let Some(name) = method.strip_prefix("set_") {
            let mut properties = write(&self.properties);
            let Some((_, slot)) = properties.iter_mut().find(|(n, _)| n == name) else {
                return Err(AccessFault::unknown_method(self.type_name, method));
            };
            if slot.as_node().is_some() {
                return Err(AccessFault::unknown_method(self.type_name, method));
            }
            let [value] = <[Value; 1]>::try_from(args)
                .map_err(|args| AccessFault::arity(method, 1, args.len()))?;
            *slot = value;
            return Ok(Value::Null);
        }

        Err(AccessFault::unknown_method(self.type_name, method))
    }
}

impl Inspect for DynamicObject {
    #[inline]
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(properties={})", self.type_name, read(&self.properties).len())
    }

    #[inline]
    fn as_object(&self) -> Option<&dyn Introspect> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::DynamicObject;
    use crate::ops::Introspect;
    use crate::{Scalar, Value};

    #[test]
    fn mutator_declares_current_type() {
        let object = DynamicObject::new("Config")
            .with("port", 8080)
            .with("name", Value::Null);
        let methods = object.methods();

        let port = methods.iter().find(|m| m.name() == "set_port").unwrap();
        assert_eq!(port.params(), ["i32"]);
        let name = methods.iter().find(|m| m.name() == "set_name").unwrap();
        assert_eq!(name.params(), ["String"]);
    }

    #[test]
    fn invoke_checks_arity() {
        let object = DynamicObject::new("Config").with("port", 8080);
        assert!(object.invoke("get_port", vec![Value::Null]).is_err());
        assert!(object.invoke("set_port", vec![]).is_err());

        object
            .invoke("set_port", vec![Value::Scalar(Scalar::Int(9090))])
            .unwrap();
        assert_eq!(object.get("port"), Some(Value::from(9090)));
    }

    #[test]
    fn node_properties_have_no_mutator() {
        let object = DynamicObject::new("Holder").with("inner", Value::node(DynamicObject::new("Inner")));
        assert!(object.methods().iter().all(|m| m.name() != "set_inner"));
        assert!(object.invoke("set_inner", vec![Value::Null]).is_err());
    }
}
