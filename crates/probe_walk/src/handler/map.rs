use probe_reflect::convert::convert_like;
use probe_reflect::{Inspect, InspectKind, Node, Value};
use probe_utils::hash::HashSet;

use super::{Handler, capability};
use crate::{Context, Extracted, Path, Tree, WalkError, Walker};

/// Handles [`Map`](probe_reflect::ops::Map)s.
///
/// Keys are matched and emitted by their string form. When several keys share
/// a string form, only the first entry is emitted. Writing an existing key
/// converts the literal to the current value's type. Writing a missing key
/// inserts the literal as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapHandler;

impl Handler for MapHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Map
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_map().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let map = capability(node.as_map(), node)?;

        if let Some(segment) = path.pop() {
            let Some((_, child)) = map.get(&segment) else {
                return Err(WalkError::unknown(segment, "no such map key"));
            };
            return walker.descend(ctx, &child, path, materialize);
        }

        let limit = ctx.collection_limit();
        let mut seen: HashSet<String> = HashSet::default();
        let mut entries = Vec::with_capacity(map.len().min(limit));
        for (key, child) in map.entries() {
            if entries.len() >= limit {
                break;
            }
            let key = key.to_string();
            if !seen.insert(key.clone()) {
                log::debug!("duplicate key `{key}` of `{}` skipped", node.type_name());
                continue;
            }
            let tree = walker.descend(ctx, &child, &mut Path::new(), true)?.into_tree();
            entries.push((key, tree));
        }
        Ok(Extracted::Tree(Tree::Mapping(entries)))
    }

    fn set(&self, node: &Node, key: &str, literal: &str) -> Result<Option<Value>, WalkError> {
        let map = capability(node.as_map(), node)?;
        match map.get(key) {
            Some((original, old)) => {
                let value = convert_like(literal, &old)?;
                Ok(map.insert(original, value))
            }
            None => {
                let value = convert_like(literal, &Value::Null)?;
                Ok(map.insert(Value::text(key), value))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::ops::{DynamicMap, Map};
    use probe_reflect::{Inspect, Node, Value};

    use super::MapHandler;
    use crate::handler::Handler;
    use crate::{ExtractOptions, Path, Tree, WalkError, Walker};

    #[test]
    fn unknown_key_is_named() {
        let root = Value::node(DynamicMap::new().with("a", 1));
        let err = Walker::default()
            .extract_tree(&root, Path::parse("b"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::UnknownPathElement { ref element, .. } if element == "b"));
        assert!(err.to_string().contains("`b`"));
    }

    #[test]
    fn truncation_is_silent_and_ordered() {
        let root = Value::node(DynamicMap::from_iter([("z", 1), ("y", 2), ("x", 3)]));
        let out = Walker::default()
            .extract_tree(&root, Path::new(), &ExtractOptions::default().with_max_collection_size(2))
            .unwrap();
        assert_eq!(
            out,
            Tree::Mapping(vec![("z".into(), Tree::from(1)), ("y".into(), Tree::from(2))])
        );
    }

    #[test]
    fn non_text_keys_are_stringified() {
        let root = Value::node(DynamicMap::new().with(7_i64, "seven"));
        let walker = Walker::default();
        let out = walker
            .extract_tree(&root, Path::new(), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out.get("7"), Some(&Tree::from("seven")));

        let out = walker
            .extract_tree(&root, Path::parse("7"), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::from("seven"));
    }

    /// A map that keeps every inserted pair, even with equal string forms.
    struct Pairs(Vec<(Value, Value)>);

    impl Map for Pairs {
        fn len(&self) -> usize {
            self.0.len()
        }

        fn entries(&self) -> Vec<(Value, Value)> {
            self.0.clone()
        }

        fn insert(&self, _key: Value, _value: Value) -> Option<Value> {
            None
        }
    }

    impl Inspect for Pairs {
        fn type_name(&self) -> &'static str {
            "Pairs"
        }

        fn as_map(&self) -> Option<&dyn Map> {
            Some(self)
        }
    }

    #[test]
    fn colliding_keys_keep_the_first_entry() {
        let root = Value::node(Pairs(vec![
            (Value::from(1), Value::from("int")),
            (Value::from("1"), Value::from("text")),
            (Value::from(2), Value::from("two")),
            (Value::from(3), Value::from("three")),
        ]));

        let out = Walker::default()
            .extract_tree(&root, Path::new(), &ExtractOptions::default().with_max_collection_size(2))
            .unwrap();
        assert_eq!(
            out,
            Tree::Mapping(vec![
                ("1".into(), Tree::from("int")),
                ("2".into(), Tree::from("two")),
            ])
        );
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"1":"int","2":"two"}"#);
    }

    #[test]
    fn set_keeps_the_original_key() {
        let node = Node::new(DynamicMap::new().with(1_i32, 10_i64));
        let previous = MapHandler.set(&node, "1", "11").unwrap();
        assert_eq!(previous, Some(Value::from(10_i64)));

        let map = node.downcast_ref::<DynamicMap>().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.entries()[0], (Value::from(1_i32), Value::from(11_i64)));
    }

    #[test]
    fn set_inserts_missing_keys_as_text() {
        let node = Node::new(DynamicMap::new());
        assert_eq!(MapHandler.set(&node, "mode", "fast").unwrap(), None);

        let map = node.downcast_ref::<DynamicMap>().unwrap();
        assert_eq!(map.get("mode").map(|(_, v)| v), Some(Value::from("fast")));
    }
}
