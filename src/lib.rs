#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use probe_reflect as reflect;
pub use probe_utils as utils;
pub use probe_walk as walk;

/// The types needed to inspect and modify a graph.
pub mod prelude {
    pub use probe_reflect::{Inspect, Node, Scalar, Value};
    pub use probe_walk::{ExtractOptions, Limits, Path, Tree, WalkError, Walker, WalkerConfig};
}
