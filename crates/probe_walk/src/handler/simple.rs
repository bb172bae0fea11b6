use probe_reflect::{Inspect, InspectKind, Node};

use super::{Handler, capability};
use crate::{Context, Extracted, Path, Tree, WalkError, Walker};

/// Handles well-known types through their curated [`Simplify`] fields.
///
/// A field that fails to derive is left out of a materialized value, and is
/// an [`WalkError::AttributeAccess`] when addressed directly.
///
/// [`Simplify`]: probe_reflect::ops::Simplify
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleHandler;

impl Handler for SimpleHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Simple
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_simple().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let simple = capability(node.as_simple(), node)?;

        if let Some(segment) = path.pop() {
            return match simple.field(&segment) {
                Some(Ok(child)) => walker.descend(ctx, &child, path, materialize),
                Some(Err(fault)) => Err(WalkError::attribute(segment, fault)),
                None => {
                    let reason = format!("not a field of `{}`", node.type_name());
                    Err(WalkError::unknown(segment, reason))
                }
            };
        }

        let names = simple.field_names();
        let mut entries = Vec::with_capacity(names.len());
        for &name in names {
            match simple.field(name) {
                Some(Ok(child)) => {
                    let tree = walker.descend(ctx, &child, &mut Path::new(), true)?.into_tree();
                    entries.push((name.to_owned(), tree));
                }
                Some(Err(fault)) => {
                    log::debug!("field `{name}` of `{}` omitted: {fault}", node.type_name());
                }
                None => {}
            }
        }
        Ok(Extracted::Tree(Tree::Mapping(entries)))
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::impls::Element;
    use probe_reflect::ops::Simplify;
    use probe_reflect::{AccessFault, Inspect, Value};

    use crate::{ExtractOptions, Path, Tree, WalkError, Walker};

    struct Disk;

    impl Simplify for Disk {
        fn field_names(&self) -> &'static [&'static str] {
            &["name", "free"]
        }

        fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
            match name {
                "name" => Some(Ok(Value::from("sda"))),
                "free" => Some(Err(AccessFault::new("device busy"))),
                _ => None,
            }
        }
    }

    impl Inspect for Disk {
        fn type_name(&self) -> &'static str {
            "Disk"
        }

        fn as_simple(&self) -> Option<&dyn Simplify> {
            Some(self)
        }
    }

    #[test]
    fn failing_fields_are_omitted() {
        let out = Walker::default()
            .extract_tree(&Value::node(Disk), Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::Mapping(vec![("name".into(), Tree::from("sda"))]));
    }

    #[test]
    fn addressed_failure_is_an_error() {
        let walker = Walker::default();
        let err = walker
            .extract_tree(&Value::node(Disk), Path::parse("free"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::AttributeAccess { ref attribute, .. } if attribute == "free"));

        let err = walker
            .extract_tree(&Value::node(Disk), Path::parse("size"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::UnknownPathElement { .. }));
    }

    #[test]
    fn element_exposes_curated_fields() {
        let element = Element::new("server")
            .with_text("primary")
            .with_child(Element::new("port"));
        let out = Walker::default()
            .extract_tree(&Value::node(element), Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), ["name", "value", "has_children"]);
        assert_eq!(out.get("has_children"), Some(&Tree::from(true)));
    }
}
