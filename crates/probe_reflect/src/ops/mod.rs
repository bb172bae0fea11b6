//! Provide capability interfaces and dynamic types for data operation.
//!
//! ## Menu
//!
//! ### Interface
//!
//! Each trait describes one structural capability a node can expose through
//! [`Inspect`](crate::Inspect). All of them take `&self`: writable containers
//! use interior mutability so that a shared graph can be updated in place.
//!
//! - [`Array`]: fixed-size, index-addressable (e.g. `[i32; 5]`).
//! - [`List`]: variable-size sequence (e.g. `Vec<i32>`).
//! - [`Map`]: associative collection with insertion ordered entries.
//! - [`Record`]: read-only fixed set of named items.
//! - [`Table`]: read-only rows of records, indexed by key columns.
//! - [`Simplify`]: a curated field set for a well-known complex type.
//! - [`Introspect`]: accessor/mutator methods discovered by naming convention.
//!
//! ### Dynamic Type
//!
//! Ready-made containers for building graphs at runtime:
//!
//! - [`DynamicArray`]: similar to `RwLock<Box<[Value]>>`.
//! - [`DynamicList`]: similar to `RwLock<Vec<Value>>`.
//! - [`DynamicMap`]: similar to `RwLock<Vec<(Value, Value)>>`, keys compared by their string form.
//! - [`DynamicRecord`]: an immutable, named list of items.
//! - [`DynamicTable`]: an immutable table of [`DynamicRecord`] rows.
//! - [`DynamicObject`]: named properties exposed through `get_`/`is_`/`set_` methods.

// -----------------------------------------------------------------------------
// Modules

mod array_ops;
mod list_ops;
mod map_ops;
mod object_ops;
mod record_ops;
mod simple_ops;
mod table_ops;

// -----------------------------------------------------------------------------
// Exports

pub use array_ops::{Array, DynamicArray};
pub use list_ops::{DynamicList, List};
pub use map_ops::{DynamicMap, Map, key_matches};
pub use object_ops::{DynamicObject, Introspect, MethodInfo};
pub use record_ops::{DynamicRecord, Record};
pub use simple_ops::Simplify;
pub use table_ops::{DynamicTable, Table};
