use std::sync::Arc;

use probe_reflect::convert::convert;
use probe_reflect::ops::{Introspect, MethodInfo};
use probe_reflect::{Inspect, InspectKind, Node, Value};

use super::Handler;
use crate::{Context, Extracted, Path, SELF_MARKER, Tree, WalkError, Walker};

/// Method name prefixes marking an accessor.
const ACCESSOR_PREFIXES: [&str; 3] = ["get_", "is_", "has_"];

/// Accessor-shaped methods describing the value's type rather than its state.
const DENIED_ACCESSORS: [&str; 3] = ["get_class", "get_type_id", "get_type_name"];

const MUTATOR_PREFIX: &str = "set_";

/// Returns the attribute read by `method`, if it is an accessor.
///
/// An accessor is a non-static method without parameters named `get_x`,
/// `is_x` or `has_x`, reading attribute `x`.
///
/// ```
/// use probe_reflect::ops::MethodInfo;
/// use probe_walk::handler::attribute_name;
///
/// assert_eq!(attribute_name(&MethodInfo::accessor("get_size")), Some("size"));
/// assert_eq!(attribute_name(&MethodInfo::accessor("is_open")), Some("open"));
/// assert_eq!(attribute_name(&MethodInfo::accessor("get_class")), None);
/// assert_eq!(attribute_name(&MethodInfo::accessor("get_")), None);
/// assert_eq!(attribute_name(&MethodInfo::mutator("get_item", "i32")), None);
/// assert_eq!(attribute_name(&MethodInfo::accessor("get_size").into_static()), None);
/// ```
pub fn attribute_name(method: &MethodInfo) -> Option<&str> {
    if method.is_static() || !method.params().is_empty() {
        return None;
    }
    let name = method.name();
    if DENIED_ACCESSORS.iter().any(|denied| *denied == name) {
        return None;
    }
    ACCESSOR_PREFIXES
        .iter()
        .find_map(|prefix| name.strip_prefix(prefix))
        .filter(|attribute| !attribute.is_empty())
}

/// Lists `(attribute, accessor)` pairs, the first accessor of an attribute winning.
fn accessors(methods: &[MethodInfo]) -> Vec<(&str, &MethodInfo)> {
    let mut found: Vec<(&str, &MethodInfo)> = Vec::new();
    for method in methods {
        let Some(attribute) = attribute_name(method) else { continue };
        if found.iter().all(|(seen, _)| *seen != attribute) {
            found.push((attribute, method));
        }
    }
    found
}

/// Handles [`Introspect`] values and every node no other handler accepts.
///
/// Attributes are discovered from accessor methods (see [`attribute_name`]).
/// A node without accessors is emitted as its display string. An attribute
/// holding the object itself is emitted as [`SELF_MARKER`]. A failing
/// accessor is passed to the context's fault handler.
///
/// Writing attribute `x` calls the non-static one-parameter method `set_x`,
/// converting the literal to the declared parameter type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectHandler;

impl ObjectHandler {
    fn materialize(
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        object: &dyn Introspect,
    ) -> Result<Extracted, WalkError> {
        let methods = object.methods();
        let accessors = accessors(&methods);
        if accessors.is_empty() {
            return Ok(Extracted::Tree(Tree::text(node.to_string())));
        }

        let fault_handler = Arc::clone(ctx.fault_handler());
        let mut entries = Vec::with_capacity(accessors.len());
        for (attribute, method) in accessors {
            let tree = match object.invoke(method.name(), Vec::new()) {
                Ok(value) if value.is_same_node(node) => Tree::text(SELF_MARKER),
                Ok(value) => walker.descend(ctx, &value, &mut Path::new(), true)?.into_tree(),
                Err(fault) => fault_handler.handle(attribute, fault)?,
            };
            entries.push((attribute.to_owned(), tree));
        }
        Ok(Extracted::Tree(Tree::Mapping(entries)))
    }
}

impl Handler for ObjectHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Object
    }

    #[inline]
    fn accepts(&self, _node: &dyn Inspect) -> bool {
        true
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let Some(object) = node.as_object() else {
            return match path.pop() {
                Some(segment) => {
                    let reason = format!("`{}` has no attributes", node.type_name());
                    Err(WalkError::unknown(segment, reason))
                }
                None => Ok(Extracted::Tree(Tree::text(node.to_string()))),
            };
        };

        let Some(segment) = path.pop() else {
            return Self::materialize(walker, ctx, node, object);
        };

        let methods = object.methods();
        let Some((_, method)) = accessors(&methods)
            .into_iter()
            .find(|(attribute, _)| *attribute == segment)
        else {
            let reason = format!("no accessor on `{}`", node.type_name());
            return Err(WalkError::unknown(segment, reason));
        };

        let child = object
            .invoke(method.name(), Vec::new())
            .map_err(|fault| WalkError::attribute(segment.as_str(), fault))?;
        walker.descend(ctx, &child, path, materialize)
    }

    fn set(&self, node: &Node, key: &str, literal: &str) -> Result<Option<Value>, WalkError> {
        let Some(object) = node.as_object() else {
            return Err(WalkError::unsupported(node.type_name(), "no attributes to write"));
        };

        let methods = object.methods();
        let mutator_name = format!("{MUTATOR_PREFIX}{key}");
        let Some(mutator) = methods
            .iter()
            .find(|m| !m.is_static() && m.name() == mutator_name)
        else {
            return Err(WalkError::unsupported(
                node.type_name(),
                format!("no mutator `{mutator_name}`"),
            ));
        };
        let [param] = mutator.params() else {
            return Err(WalkError::unsupported(
                node.type_name(),
                format!("`{mutator_name}` must take exactly one parameter"),
            ));
        };

        let value = convert(literal, param)?;

        let previous = accessors(&methods)
            .into_iter()
            .find(|(attribute, _)| *attribute == key)
            .and_then(|(_, accessor)| match object.invoke(accessor.name(), Vec::new()) {
                Ok(previous) => Some(previous),
                Err(fault) => {
                    log::debug!("previous value of `{key}` unavailable: {fault}");
                    None
                }
            });

        object
            .invoke(&mutator_name, vec![value])
            .map_err(|fault| WalkError::attribute(key, fault))?;
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    use probe_reflect::ops::{DynamicObject, Introspect, MethodInfo};
    use probe_reflect::{AccessFault, Inspect, Node, Value};

    use super::ObjectHandler;
    use crate::handler::Handler;
    use crate::{
        EscalatingFaultHandler, ExtractOptions, FaultPolicy, Path, Tree, WalkError, Walker,
    };

    /// A sensor whose `reading` accessor always fails.
    struct Sensor {
        threshold: AtomicI32,
    }

    impl Introspect for Sensor {
        fn methods(&self) -> Vec<MethodInfo> {
            vec![
                MethodInfo::accessor("get_threshold"),
                MethodInfo::mutator("set_threshold", "int"),
                MethodInfo::accessor("get_reading"),
                MethodInfo::accessor("get_class"),
                MethodInfo::accessor("get_default").into_static(),
                MethodInfo::new("set_range", &["int", "int"]),
                MethodInfo::accessor("is_threshold"),
            ]
        }

        fn invoke(&self, method: &str, args: Vec<Value>) -> Result<Value, AccessFault> {
            match (method, args.as_slice()) {
                ("get_threshold", []) => Ok(Value::from(self.threshold.load(Ordering::Relaxed))),
                ("set_threshold", [Value::Scalar(probe_reflect::Scalar::Int(v))]) => {
                    self.threshold.store(*v, Ordering::Relaxed);
                    Ok(Value::Null)
                }
                ("get_reading", []) => Err(AccessFault::new("sensor offline")),
                _ => Err(AccessFault::unknown_method("Sensor", method)),
            }
        }
    }

    impl Inspect for Sensor {
        fn type_name(&self) -> &'static str {
            "Sensor"
        }

        fn as_object(&self) -> Option<&dyn Introspect> {
            Some(self)
        }
    }

    fn sensor() -> Node {
        Node::new(Sensor {
            threshold: AtomicI32::new(5),
        })
    }

    #[test]
    fn faults_are_substituted_by_default() {
        let out = Walker::default()
            .extract_tree(&Value::from(sensor()), Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(
            out,
            Tree::Mapping(vec![
                ("threshold".into(), Tree::from(5)),
                ("reading".into(), Tree::text("ERROR: sensor offline")),
            ])
        );
    }

    #[test]
    fn faults_escalate_on_request() {
        let options = ExtractOptions::default().with_fault_handler(Arc::new(EscalatingFaultHandler));
        let err = Walker::default()
            .extract_tree(&Value::from(sensor()), Path::new(), &options)
            .unwrap_err();
        assert!(matches!(err, WalkError::AttributeAccess { ref attribute, .. } if attribute == "reading"));

        let walker = Walker::new(crate::WalkerConfig {
            fault_policy: FaultPolicy::Escalate,
            ..Default::default()
        });
        assert!(walker
            .extract_tree(&Value::from(sensor()), Path::new(), &ExtractOptions::default())
            .is_err());
    }

    #[test]
    fn attribute_by_name() {
        let walker = Walker::default();
        let out = walker
            .extract_tree(&Value::from(sensor()), Path::parse("threshold"), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::from(5));

        let err = walker
            .extract_tree(&Value::from(sensor()), Path::parse("class"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::UnknownPathElement { .. }));

        let err = walker
            .extract_tree(&Value::from(sensor()), Path::parse("reading"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::AttributeAccess { .. }));
    }

    #[test]
    fn set_uses_the_mutator_parameter_type() {
        let node = sensor();
        let previous = ObjectHandler.set(&node, "threshold", "9").unwrap();
        assert_eq!(previous, Some(Value::from(5)));
        assert_eq!(
            node.as_object().unwrap().invoke("get_threshold", vec![]).unwrap(),
            Value::from(9)
        );

        assert!(matches!(
            ObjectHandler.set(&node, "threshold", "nine"),
            Err(WalkError::Conversion(_))
        ));
        assert!(matches!(
            ObjectHandler.set(&node, "range", "1"),
            Err(WalkError::UnsupportedWrite { .. })
        ));
        assert!(matches!(
            ObjectHandler.set(&node, "reading", "1"),
            Err(WalkError::UnsupportedWrite { .. })
        ));
    }

    #[test]
    fn opaque_nodes_fall_back_to_display() {
        struct Handle;
        impl Inspect for Handle {
            fn type_name(&self) -> &'static str {
                "Handle"
            }
        }

        let out = Walker::default()
            .extract_tree(&Value::node(Handle), Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::text("Handle"));

        let empty = Walker::default()
            .extract_tree(&Value::node(DynamicObject::new("Empty")), Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(empty, Tree::text("Empty(properties=0)"));
    }
}
