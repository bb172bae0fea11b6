#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod fault;
mod inspect;
mod value;

pub mod convert;
pub mod impls;
pub mod ops;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use fault::AccessFault;
pub use inspect::{Inspect, InspectKind};
pub use value::{Node, NodeId, Scalar, Value};
