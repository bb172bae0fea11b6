use probe_reflect::{Inspect, InspectKind, Node};

use super::{Handler, capability};
use crate::{Context, Extracted, Path, Tree, WalkError, Walker};

/// Handles read-only [`Record`](probe_reflect::ops::Record)s.
///
/// Every item is emitted under its name. Records have a fixed shape and are
/// not truncated.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordHandler;

impl Handler for RecordHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Record
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_record().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let record = capability(node.as_record(), node)?;

        if let Some(segment) = path.pop() {
            let Some(child) = record.get(&segment) else {
                let reason = format!("no item of `{}`", node.type_name());
                return Err(WalkError::unknown(segment, reason));
            };
            return walker.descend(ctx, &child, path, materialize);
        }

        let keys = record.keys();
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(child) = record.get(&key) else { continue };
            let tree = walker.descend(ctx, &child, &mut Path::new(), true)?.into_tree();
            entries.push((key, tree));
        }
        Ok(Extracted::Tree(Tree::Mapping(entries)))
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::ops::DynamicRecord;
    use probe_reflect::{Node, Value};

    use super::RecordHandler;
    use crate::handler::Handler;
    use crate::{ExtractOptions, Path, Tree, WalkError, Walker};

    fn usage() -> Value {
        Value::node(
            DynamicRecord::new("MemoryUsage")
                .with("used", 10_i64)
                .with("max", 40_i64)
                .with("committed", Value::Null),
        )
    }

    #[test]
    fn items_keep_their_order() {
        let out = Walker::default()
            .extract_tree(&usage(), Path::new(), &ExtractOptions::default().with_max_collection_size(1))
            .unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), ["used", "max", "committed"]);
        assert_eq!(out.get("committed"), Some(&Tree::Null));
    }

    #[test]
    fn item_by_name() {
        let walker = Walker::default();
        let out = walker
            .extract_tree(&usage(), Path::parse("max"), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::from(40_i64));

        let err = walker
            .extract_tree(&usage(), Path::parse("free"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::UnknownPathElement { ref element, .. } if element == "free"));
    }

    #[test]
    fn records_are_read_only() {
        let node = Node::new(DynamicRecord::new("MemoryUsage").with("used", 1_i64));
        assert!(matches!(
            RecordHandler.set(&node, "used", "2"),
            Err(WalkError::UnsupportedWrite { ref type_name, .. }) if type_name == "MemoryUsage"
        ));
    }
}
