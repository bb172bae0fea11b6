#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod config;
mod context;
mod error;
mod fault;
mod path;
mod set;
mod tree;
mod walker;

pub mod handler;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use config::{ExtractOptions, FaultPolicy, Limits, WalkerConfig};
pub use context::{Context, Scope};
pub use error::WalkError;
pub use fault::{EscalatingFaultHandler, FaultHandler, IgnoringFaultHandler};
pub use path::Path;
pub use set::SetOutcome;
pub use tree::Tree;
pub use walker::{Extracted, Walker};

/// Emitted for a node already being expanded on the current branch.
///
/// The full marker reads `[Reference <type>@<id>]`, see [`reference_marker`].
pub const REFERENCE_MARKER_PREFIX: &str = "[Reference ";

/// Emitted once the object limit of a traversal is reached.
pub const OBJECT_LIMIT_MARKER: &str = "[Object limit exceeded]";

/// Emitted for an attribute whose value is its owner.
pub const SELF_MARKER: &str = "[this]";

/// Returns the marker emitted for a cyclic reference to `node`.
pub fn reference_marker(node: &probe_reflect::Node) -> String {
    format!("{REFERENCE_MARKER_PREFIX}{}@{}]", node.type_name(), node.id())
}
