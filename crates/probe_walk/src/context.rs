use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use probe_reflect::{Node, NodeId};
use probe_utils::hash::HashSet;

use crate::{FaultHandler, Limits};

// -----------------------------------------------------------------------------
// Context

/// Bookkeeping of one traversal.
///
/// A context is created per request and dropped with it. It holds the
/// effective limits, the nodes currently being expanded on the active branch,
/// and the number of complex values opened so far.
///
/// Nodes are registered through [`Context::enter`]; the returned [`Scope`]
/// removes them again when dropped, whether the expansion succeeded or not.
/// The visited set therefore only ever contains the ancestors of the value
/// being expanded, and shared references that are not cycles are expanded
/// each time they are met.
pub struct Context {
    limits: Limits,
    fault_handler: Arc<dyn FaultHandler>,
    visited: HashSet<NodeId>,
    depth: usize,
    objects: usize,
}

impl Context {
    pub fn new(limits: Limits, fault_handler: Arc<dyn FaultHandler>) -> Self {
        Self {
            limits,
            fault_handler,
            visited: HashSet::default(),
            depth: 0,
            objects: 0,
        }
    }

    #[inline]
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    #[inline]
    pub fn fault_handler(&self) -> &Arc<dyn FaultHandler> {
        &self.fault_handler
    }

    /// Number of complex values currently open.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of complex values opened since the traversal began.
    #[inline]
    pub fn objects(&self) -> usize {
        self.objects
    }

    /// Returns `true` if the current nesting is beyond `max_depth`.
    #[inline]
    pub fn depth_exceeded(&self) -> bool {
        self.limits.max_depth.is_some_and(|max| self.depth > max)
    }

    /// Returns `true` if no further complex value may be opened.
    #[inline]
    pub fn objects_exhausted(&self) -> bool {
        self.limits.max_objects.is_some_and(|max| self.objects >= max)
    }

    /// Maximum number of elements to read from one collection.
    #[inline]
    pub fn collection_limit(&self) -> usize {
        self.limits.max_collection_size.unwrap_or(usize::MAX)
    }

    /// Returns `true` if `node` is being expanded on the current branch.
    #[inline]
    pub fn is_visited(&self, node: &Node) -> bool {
        self.visited.contains(&node.id())
    }

    /// Opens `node`, marking it visited until the returned scope is dropped.
    ///
    /// A node reached again through an explicit path is opened once more; it
    /// stays visited until its outermost scope is dropped.
    pub fn enter(&mut self, node: &Node) -> Scope<'_> {
        let id = node.id();
        let first = self.visited.insert(id);
        self.depth += 1;
        self.objects += 1;
        Scope {
            context: self,
            id,
            first,
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("limits", &self.limits)
            .field("visited", &self.visited.len())
            .field("depth", &self.depth)
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Scope

/// An open node of a [`Context`].
///
/// Dereferences to the context, so nested values are traversed through the
/// scope of their parent.
pub struct Scope<'a> {
    context: &'a mut Context,
    id: NodeId,
    first: bool,
}

impl Deref for Scope<'_> {
    type Target = Context;

    #[inline]
    fn deref(&self) -> &Context {
        self.context
    }
}

impl DerefMut for Scope<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Context {
        self.context
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        if self.first {
            self.context.visited.remove(&self.id);
        }
        self.context.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use probe_reflect::Node;
    use probe_reflect::ops::DynamicList;

    use super::Context;
    use crate::{IgnoringFaultHandler, Limits};

    fn context(limits: Limits) -> Context {
        Context::new(limits, Arc::new(IgnoringFaultHandler))
    }

    #[test]
    fn scope_pops_on_drop() {
        let a = Node::new(DynamicList::new());
        let b = Node::new(DynamicList::new());
        let mut ctx = context(Limits::UNLIMITED);

        {
            let mut outer = ctx.enter(&a);
            assert!(outer.is_visited(&a));
            {
                let inner = outer.enter(&b);
                assert_eq!(inner.depth(), 2);
                assert!(inner.is_visited(&b));
            }
            assert!(!outer.is_visited(&b));
            assert_eq!(outer.depth(), 1);
        }

        assert!(!ctx.is_visited(&a));
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.objects(), 2);
    }

    #[test]
    fn reentered_node_stays_visited() {
        let a = Node::new(DynamicList::new());
        let mut ctx = context(Limits::UNLIMITED);

        {
            let mut outer = ctx.enter(&a);
            {
                let inner = outer.enter(&a);
                assert_eq!(inner.depth(), 2);
            }
            assert!(outer.is_visited(&a));
        }
        assert!(!ctx.is_visited(&a));
    }

    #[test]
    fn zero_limits_are_limits() {
        let node = Node::new(DynamicList::new());
        let mut ctx = context(Limits::UNLIMITED.with_max_depth(0).with_max_objects(0));
        assert!(!ctx.depth_exceeded());
        assert!(ctx.objects_exhausted());

        let scope = ctx.enter(&node);
        assert!(scope.depth_exceeded());
    }

    #[test]
    fn unlimited_never_trips() {
        let ctx = context(Limits::UNLIMITED);
        assert!(!ctx.depth_exceeded());
        assert!(!ctx.objects_exhausted());
        assert_eq!(ctx.collection_limit(), usize::MAX);
    }
}
