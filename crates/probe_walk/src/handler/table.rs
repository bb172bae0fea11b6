use probe_reflect::{Inspect, InspectKind, Node, Value};

use super::{Handler, capability};
use crate::{Context, Extracted, Path, Tree, WalkError, Walker};

/// Handles read-only [`Table`](probe_reflect::ops::Table)s.
///
/// A table is materialized as nested mappings, one level per index column,
/// keyed by the string form of that column's value. The innermost level holds
/// the extracted row. Navigation consumes one segment per index column and
/// then continues into the selected row.
///
/// ```
/// use probe_reflect::{Value, ops::{DynamicRecord, DynamicTable}};
/// use probe_walk::{ExtractOptions, Path, Tree, Walker};
///
/// let table = Value::node(
///     DynamicTable::new("Threads", ["id"])
///         .with_row(DynamicRecord::new("Thread").with("id", 1).with("name", "main"))
///         .with_row(DynamicRecord::new("Thread").with("id", 2).with("name", "gc")),
/// );
///
/// let walker = Walker::default();
/// let all = walker.extract_tree(&table, Path::new(), &ExtractOptions::default()).unwrap();
/// assert_eq!(all.keys().collect::<Vec<_>>(), ["1", "2"]);
///
/// let name = walker.extract_tree(&table, Path::parse("2/name"), &ExtractOptions::default()).unwrap();
/// assert_eq!(name, Tree::from("gc"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TableHandler;

impl TableHandler {
    fn extract_level(
        walker: &Walker,
        ctx: &mut Context,
        index: &[String],
        rows: Vec<Node>,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let Some((column, inner)) = index.split_first() else {
            // Every index column is fixed, the index being unique leaves at most one row.
            return match rows.into_iter().next() {
                Some(row) => walker.descend(ctx, &Value::Node(row), path, materialize),
                None => Ok(Extracted::Tree(Tree::Null)),
            };
        };

        if let Some(segment) = path.pop() {
            let selected: Vec<Node> = rows
                .into_iter()
                .filter(|row| column_value(row, column) == segment)
                .collect();
            if selected.is_empty() {
                let reason = format!("no row with `{column}` equal to it");
                return Err(WalkError::unknown(segment, reason));
            }
            return Self::extract_level(walker, ctx, inner, selected, path, materialize);
        }

        let mut groups: Vec<(String, Vec<Node>)> = Vec::new();
        for row in rows {
            let key = column_value(&row, column);
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, group)) => group.push(row),
                None => groups.push((key, vec![row])),
            }
        }

        let limit = ctx.collection_limit();
        let mut entries = Vec::with_capacity(groups.len().min(limit));
        for (key, group) in groups.into_iter().take(limit) {
            let tree = Self::extract_level(walker, ctx, inner, group, &mut Path::new(), true)?;
            entries.push((key, tree.into_tree()));
        }
        Ok(Extracted::Tree(Tree::Mapping(entries)))
    }
}

/// The string form of `row`'s `column` item, `null` when absent.
fn column_value(row: &Node, column: &str) -> String {
    row.as_record()
        .and_then(|record| record.get(column))
        .unwrap_or_default()
        .to_string()
}

impl Handler for TableHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Table
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_table().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let table = capability(node.as_table(), node)?;
        let index = table.index_names();
        Self::extract_level(walker, ctx, &index, table.rows(), path, materialize)
    }
}

#[cfg(test)]
mod tests {
    use probe_reflect::Value;
    use probe_reflect::ops::{DynamicRecord, DynamicTable};

    use crate::{ExtractOptions, Path, Tree, WalkError, Walker};

    fn row(host: &str, port: i32, up: bool) -> DynamicRecord {
        DynamicRecord::new("Endpoint")
            .with("host", host)
            .with("port", port)
            .with("up", up)
    }

    fn endpoints() -> Value {
        Value::node(
            DynamicTable::new("Endpoints", ["host", "port"])
                .with_row(row("a", 80, true))
                .with_row(row("a", 443, false))
                .with_row(row("b", 80, true)),
        )
    }

    #[test]
    fn nests_one_level_per_index_column() {
        let out = Walker::default()
            .extract_tree(&endpoints(), Path::new(), &ExtractOptions::default())
            .unwrap();

        assert_eq!(out.keys().collect::<Vec<_>>(), ["a", "b"]);
        let a = out.get("a").unwrap();
        assert_eq!(a.keys().collect::<Vec<_>>(), ["80", "443"]);
        assert_eq!(a.get("443").and_then(|r| r.get("up")), Some(&Tree::from(false)));
    }

    #[test]
    fn path_consumes_index_then_row() {
        let walker = Walker::default();
        let out = walker
            .extract_tree(&endpoints(), Path::parse("b/80/up"), &ExtractOptions::default())
            .unwrap();
        assert_eq!(out, Tree::from(true));

        let partial = walker
            .extract_tree(&endpoints(), Path::parse("a"), &ExtractOptions::default())
            .unwrap();
        assert_eq!(partial.len(), 2);

        let err = walker
            .extract_tree(&endpoints(), Path::parse("c/80"), &ExtractOptions::default())
            .unwrap_err();
        assert!(matches!(err, WalkError::UnknownPathElement { ref element, .. } if element == "c"));
    }

    #[test]
    fn groups_are_truncated() {
        let out = Walker::default()
            .extract_tree(&endpoints(), Path::new(), &ExtractOptions::default().with_max_collection_size(1))
            .unwrap();
        assert_eq!(out.keys().collect::<Vec<_>>(), ["a"]);
        assert_eq!(out.get("a").map(Tree::len), Some(1));
    }
}
