//! Per-category read and write strategies.
//!
//! ## Menu
//!
//! A [`Walker`](crate::Walker) dispatches every node to the first handler
//! accepting it:
//!
//! - [`ArrayHandler`]: fixed-size arrays, addressed by index.
//! - [`ListHandler`]: growable sequences, addressed by index.
//! - [`MapHandler`]: maps, addressed by the string form of the key.
//! - [`RecordHandler`]: read-only records, addressed by item name.
//! - [`TableHandler`]: read-only tables, addressed by one segment per index column.
//! - [`SimpleHandler`]: curated fields of well-known types.
//! - [`ObjectHandler`]: accessor methods; accepts every node.
//!
//! Handlers are stateless. All request state lives in the [`Context`].

use probe_reflect::{Inspect, InspectKind, Node, Value};

use crate::{Context, Extracted, Path, WalkError, Walker};

// -----------------------------------------------------------------------------
// Modules

mod map;
mod object;
mod record;
mod sequence;
mod simple;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use map::MapHandler;
pub use object::{ObjectHandler, attribute_name};
pub use record::RecordHandler;
pub use sequence::{ArrayHandler, ListHandler};
pub use simple::SimpleHandler;
pub use table::TableHandler;

// -----------------------------------------------------------------------------
// Handler

/// Reads and writes one category of nodes.
pub trait Handler: Send + Sync {
    /// The category this handler serves.
    fn kind(&self) -> InspectKind;

    /// Returns `true` if this handler can process `node`.
    fn accepts(&self, node: &dyn Inspect) -> bool;

    /// Extracts `node`, which has already been entered in `ctx`.
    ///
    /// A non-empty `path` selects a child: the handler pops one segment and
    /// continues through [`Walker::descend`]. An empty path materializes the
    /// node, extracting each child through [`Walker::descend`] as well.
    fn extract(
        &self,
        walker: &Walker,
        ctx: &mut Context,
        node: &Node,
        path: &mut Path,
        materialize: bool,
    ) -> Result<Extracted, WalkError>;

    /// Writes the child `key` of `node` from `literal`, returning the previous value.
    fn set(&self, node: &Node, _key: &str, _literal: &str) -> Result<Option<Value>, WalkError> {
        Err(WalkError::unsupported(
            node.type_name(),
            format!("{} values are read-only", self.kind()),
        ))
    }
}

// -----------------------------------------------------------------------------
// Helpers

/// Returns the capability a handler accepted `node` for.
fn capability<'a, T: ?Sized>(found: Option<&'a T>, node: &Node) -> Result<&'a T, WalkError> {
    found.ok_or_else(|| {
        log::warn!("`{}` lost a capability during dispatch", node.type_name());
        WalkError::NoHandlerFound {
            type_name: node.type_name().to_owned(),
        }
    })
}

/// Parses an index segment addressing a sequence of `len` elements.
fn parse_index(segment: &str, len: usize) -> Result<usize, WalkError> {
    let index: usize = segment
        .parse()
        .map_err(|_| WalkError::unknown(segment, "not a valid index"))?;
    if index >= len {
        return Err(WalkError::unknown(
            segment,
            format!("index out of bounds for length {len}"),
        ));
    }
    Ok(index)
}
