use std::fmt;

use crate::{Inspect, Value};

// -----------------------------------------------------------------------------
// Record

/// A read-only, fixed set of named items.
pub trait Record: Send + Sync {
    /// Returns the item names in their declared order.
    fn keys(&self) -> Vec<String>;

    /// Returns the item named `key`.
    fn get(&self, key: &str) -> Option<Value>;
}

// -----------------------------------------------------------------------------
// Dynamic Record

/// An immutable record with a type name and ordered items.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, ops::{DynamicRecord, Record}};
///
/// let usage = DynamicRecord::new("MemoryUsage")
///     .with("used", 128_i64)
///     .with("max", 512_i64);
///
/// assert_eq!(usage.keys(), ["used", "max"]);
/// assert_eq!(usage.get("max"), Some(Value::from(512_i64)));
/// ```
pub struct DynamicRecord {
    type_name: &'static str,
    items: Vec<(String, Value)>,
}

impl DynamicRecord {
    #[inline]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            items: Vec::new(),
        }
    }

    /// Appends an item, replacing an existing item of the same name.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.items.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.items.push((key, value)),
        }
        self
    }
}

impl Record for DynamicRecord {
    fn keys(&self) -> Vec<String> {
        self.items.iter().map(|(k, _)| k.clone()).collect()
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.items
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl Inspect for DynamicRecord {
    #[inline]
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(items={})", self.type_name, self.items.len())
    }

    #[inline]
    fn as_record(&self) -> Option<&dyn Record> {
        Some(self)
    }
}
