use probe_reflect::convert::convert_like;
use probe_reflect::{Inspect, InspectKind, Node, Value};

use super::{Handler, capability, parse_index};
use crate::{Context, Extracted, Path, Tree, WalkError, Walker};

/// Shared behavior of index-addressed sequences.
fn extract_indexed(
    walker: &Walker,
    ctx: &mut Context,
    path: &mut Path,
    materialize: bool,
    len: usize,
    get: impl Fn(usize) -> Option<Value>,
) -> Result<Extracted, WalkError> {
    if let Some(segment) = path.pop() {
        let index = parse_index(&segment, len)?;
        let child = get(index)
            .ok_or_else(|| WalkError::unknown(segment, "element removed while reading"))?;
        return walker.descend(ctx, &child, path, materialize);
    }

    let count = len.min(ctx.collection_limit());
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        let Some(child) = get(index) else { break };
        items.push(walker.descend(ctx, &child, &mut Path::new(), true)?.into_tree());
    }
    Ok(Extracted::Tree(Tree::Sequence(items)))
}

fn set_indexed(
    key: &str,
    literal: &str,
    len: usize,
    get: impl Fn(usize) -> Option<Value>,
    replace: impl Fn(usize, Value) -> Option<Value>,
) -> Result<Option<Value>, WalkError> {
    let index = parse_index(key, len)?;
    let old = get(index).ok_or_else(|| WalkError::unknown(key, "element removed while writing"))?;
    let value = convert_like(literal, &old)?;
    replace(index, value)
        .map(Some)
        .ok_or_else(|| WalkError::unknown(key, "element removed while writing"))
}

// -----------------------------------------------------------------------------
// ArrayHandler

/// Handles fixed-size [`Array`](probe_reflect::ops::Array)s.
///
/// Elements are addressed by their decimal index. Writing replaces an element
/// with the literal converted to the element's current type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayHandler;

impl Handler for ArrayHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::Array
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_array().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let array = capability(node.as_array(), node)?;
        extract_indexed(walker, ctx, path, materialize, array.len(), |i| array.get(i))
    }

    fn set(&self, node: &Node, key: &str, literal: &str) -> Result<Option<Value>, WalkError> {
        let array = capability(node.as_array(), node)?;
        set_indexed(key, literal, array.len(), |i| array.get(i), |i, v| array.replace(i, v))
    }
}

// -----------------------------------------------------------------------------
// ListHandler

/// Handles growable [`List`](probe_reflect::ops::List)s.
///
/// Only existing elements can be written; an out of range index is an
/// unknown path element rather than an append.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListHandler;

impl Handler for ListHandler {
    #[inline]
    fn kind(&self) -> InspectKind {
        InspectKind::List
    }

    #[inline]
    fn accepts(&self, node: &dyn Inspect) -> bool {
        node.as_list().is_some()
    }

    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let list = capability(node.as_list(), node)?;
        extract_indexed(walker, ctx, path, materialize, list.len(), |i| list.get(i))
    }

    fn set(&self, node: &Node, key: &str, literal: &str) -> Result<Option<Value>, WalkError> {
        let list = capability(node.as_list(), node)?;
        set_indexed(key, literal, list.len(), |i| list.get(i), |i, v| list.replace(i, v))
    }
}
