use std::fmt;
use std::sync::Arc;

use probe_reflect::{Inspect, InspectKind, Node, Value};

use crate::handler::{
    ArrayHandler, Handler, ListHandler, MapHandler, ObjectHandler, RecordHandler, SimpleHandler,
    TableHandler,
};
use crate::{
    Context, ExtractOptions, FaultHandler, OBJECT_LIMIT_MARKER, Path, Tree, WalkError,
    WalkerConfig, reference_marker,
};

// -----------------------------------------------------------------------------
// Extracted

/// The result of an extraction.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// The materialized value.
    Tree(Tree),
    /// The value reached by navigation, left as it is.
    Native(Value),
}

impl Extracted {
    /// Returns the tree, materializing a native leaf or the display-string of a native node.
    pub fn into_tree(self) -> Tree {
        match self {
            Self::Tree(tree) => tree,
            Self::Native(Value::Null) => Tree::Null,
            Self::Native(Value::Scalar(scalar)) => Tree::Scalar(scalar),
            Self::Native(Value::Node(node)) => Tree::text(node.to_string()),
        }
    }

    /// Returns the native value, if no materialization took place.
    #[inline]
    pub fn into_native(self) -> Option<Value> {
        match self {
            Self::Native(value) => Some(value),
            Self::Tree(_) => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Walker

/// Reads values into [`Tree`]s and writes single values back.
///
/// A walker is configured once and then shared: it holds no per-request
/// state. Each call creates its own [`Context`] and drops it before returning.
///
/// Nodes are dispatched to the first handler accepting them, in the order
/// reported by [`Walker::handler_kinds`]. Arrays are checked before the chain,
/// and the chain ends with the object handler, which accepts every node.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, ops::DynamicObject};
/// use probe_walk::{ExtractOptions, Path, Tree, Walker};
///
/// let root = Value::node(DynamicObject::new("Server").with("port", 8080).with("secure", true));
/// let tree = Walker::default()
///     .extract_tree(&root, Path::new(), &ExtractOptions::default())
///     .unwrap();
///
/// assert_eq!(tree.get("port"), Some(&Tree::from(8080)));
/// assert_eq!(tree.get("secure"), Some(&Tree::from(true)));
/// ```
pub struct Walker {
    config: WalkerConfig,
    fault_handler: Arc<dyn FaultHandler>,
    array: ArrayHandler,
    chain: Vec<Box<dyn Handler>>,
}

impl Walker {
    pub fn new(config: WalkerConfig) -> Self {
        let fault_handler = config.fault_policy.handler();
        Self {
            config,
            fault_handler,
            array: ArrayHandler,
            chain: vec![
                Box::new(ListHandler),
                Box::new(MapHandler),
                Box::new(RecordHandler),
                Box::new(TableHandler),
                Box::new(SimpleHandler),
                Box::new(ObjectHandler),
            ],
        }
    }

    #[inline]
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Lists the handlers in dispatch order.
    pub fn handler_kinds(&self) -> Vec<InspectKind> {
        core::iter::once(self.array.kind())
            .chain(self.chain.iter().map(|handler| handler.kind()))
            .collect()
    }

    /// Creates the context of one request.
    pub fn context(&self, options: &ExtractOptions) -> Context {
        let limits = self.config.limits.clamp(options.limits());
        let fault_handler = options
            .fault_handler()
            .cloned()
            .unwrap_or_else(|| Arc::clone(&self.fault_handler));
        Context::new(limits, fault_handler)
    }

    /// Extracts the value at `path` below `value`.
    ///
    /// With `materialize`, the target is converted into a [`Tree`]. Without it,
    /// the target is returned as [`Extracted::Native`].
    pub fn extract(
        &self,
        value: &Value,
        mut path: Path,
        materialize: bool,
        options: &ExtractOptions,
    ) -> Result<Extracted, WalkError> {
        let mut ctx = self.context(options);
        self.descend(&mut ctx, value, &mut path, materialize)
    }

    /// Extracts and materializes the value at `path` below `value`.
    #[inline]
    pub fn extract_tree(
        &self,
        value: &Value,
        path: Path,
        options: &ExtractOptions,
    ) -> Result<Tree, WalkError> {
        self.extract(value, path, true, options).map(Extracted::into_tree)
    }

    /// Extracts `value` within an existing traversal.
    ///
    /// This is the re-entry point used by handlers for every child they
    /// visit. Limits and cycle detection guard every node about to be
    /// materialized. A node selected by a path segment is always entered, so a
    /// path resolves to the location it names or fails, and reads and writes
    /// address the same value. Navigation consumes one segment per level and
    /// therefore terminates on cyclic graphs as well.
    pub fn descend(
        &self,
        ctx: &mut Context,
        value: &Value,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        let node = match value {
            Value::Node(node) => node,
            Value::Null | Value::Scalar(_) => return Self::leaf(ctx, value, path, materialize),
        };

        if path.is_empty() {
            if !materialize {
                return Ok(Extracted::Native(value.clone()));
            }
            if let Some(marker) = Self::guard(ctx, node) {
                return Ok(Extracted::Tree(Tree::text(marker)));
            }
        }

        let handler = self.handler_for(node.inspect())?;
        log::trace!("`{}` dispatched to the {} handler", node.type_name(), handler.kind());

        let mut scope = ctx.enter(node);
        handler.extract(self, &mut scope, node, path, materialize)
    }

    /// Returns the marker replacing `node` if it must not be materialized.
    fn guard(ctx: &Context, node: &Node) -> Option<String> {
        if ctx.depth_exceeded() {
            log::debug!("depth limit reached at `{}`", node.type_name());
            return Some(node.to_string());
        }
        if ctx.is_visited(node) {
            log::debug!("cycle through `{}` cut", node.type_name());
            return Some(reference_marker(node));
        }
        if ctx.objects_exhausted() {
            log::debug!("object limit reached at `{}`", node.type_name());
            return Some(OBJECT_LIMIT_MARKER.to_owned());
        }
        None
    }

    fn leaf(
        ctx: &Context,
        value: &Value,
        path: &Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError> {
        if let Some(segment) = path.peek() {
            return Err(WalkError::unknown(
                segment,
                format!("a `{}` value has no children", value.type_name()),
            ));
        }
        if !materialize {
            return Ok(Extracted::Native(value.clone()));
        }

        match value.as_scalar() {
            Some(scalar) if ctx.depth_exceeded() => {
                Ok(Extracted::Tree(Tree::text(scalar.to_string())))
            }
            Some(scalar) => Ok(Extracted::Tree(Tree::Scalar(scalar.clone()))),
            None => Ok(Extracted::Tree(Tree::Null)),
        }
    }

    /// Returns the first handler accepting `node`.
    pub(crate) fn handler_for(&self, node: &dyn Inspect) -> Result<&dyn Handler, WalkError> {
        if self.array.accepts(node) {
            return Ok(&self.array);
        }
        self.chain
            .iter()
            .map(|handler| &**handler)
            .find(|handler| handler.accepts(node))
            .ok_or_else(|| {
                log::warn!("no handler accepts `{}`", node.type_name());
                WalkError::NoHandlerFound {
                    type_name: node.type_name().to_owned(),
                }
            })
    }
}

impl Default for Walker {
    #[inline]
    fn default() -> Self {
        Self::new(WalkerConfig::default())
    }
}

impl fmt::Debug for Walker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Walker")
            .field("config", &self.config)
            .field("handlers", &self.handler_kinds())
            .finish()
    }
}
