use std::fmt;

use crate::ops::DynamicRecord;
use crate::{Inspect, Node};

// -----------------------------------------------------------------------------
// Table

/// Read-only tabular data: rows of records identified by index columns.
///
/// The combination of the index columns' values is unique per row.
pub trait Table: Send + Sync {
    /// Names of the index columns, outermost first.
    fn index_names(&self) -> Vec<String>;

    /// All rows. Each row is expected to expose [`Record`](crate::ops::Record).
    fn rows(&self) -> Vec<Node>;
}

// -----------------------------------------------------------------------------
// Dynamic Table

/// An immutable table of [`DynamicRecord`] rows.
///
/// # Examples
///
/// ```
/// use probe_reflect::ops::{DynamicRecord, DynamicTable, Table};
///
/// let table = DynamicTable::new("Threads", ["id"])
///     .with_row(DynamicRecord::new("Thread").with("id", 1).with("name", "main"))
///     .with_row(DynamicRecord::new("Thread").with("id", 2).with("name", "worker"));
///
/// assert_eq!(table.index_names(), ["id"]);
/// assert_eq!(table.rows().len(), 2);
/// ```
pub struct DynamicTable {
    type_name: &'static str,
    index: Vec<String>,
    rows: Vec<Node>,
}

impl DynamicTable {
    pub fn new<I, S>(type_name: &'static str, index: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_name,
            index: index.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    #[inline]
    pub fn with_row(mut self, row: DynamicRecord) -> Self {
        self.rows.push(Node::new(row));
        self
    }
}

impl Table for DynamicTable {
    #[inline]
    fn index_names(&self) -> Vec<String> {
        self.index.clone()
    }

    #[inline]
    fn rows(&self) -> Vec<Node> {
        self.rows.clone()
    }
}

impl Inspect for DynamicTable {
    #[inline]
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(rows={})", self.type_name, self.rows.len())
    }

    #[inline]
    fn as_table(&self) -> Option<&dyn Table> {
        Some(self)
    }
}
