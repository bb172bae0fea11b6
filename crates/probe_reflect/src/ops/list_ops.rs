use std::fmt;
use std::sync::RwLock;

use probe_utils::sync::{read, write};

use crate::{Inspect, Value};

// -----------------------------------------------------------------------------
// List

/// A variable-length, index-addressable sequence.
pub trait List: Send + Sync {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<Value>;

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the list untouched if `index` is out of bounds.
    fn replace(&self, index: usize, value: Value) -> Option<Value>;

    /// Appends an element to the end of the list.
    fn push(&self, value: Value);

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// Dynamic List

/// A dynamic list of [`Value`]s.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, ops::{DynamicList, List}};
///
/// let list: DynamicList = ["a", "b"].into_iter().collect();
/// list.push(Value::from("c"));
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get(2), Some(Value::from("c")));
/// ```
#[derive(Default)]
pub struct DynamicList {
    values: RwLock<Vec<Value>>,
}

impl DynamicList {
    /// Creates an empty `DynamicList`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            values: RwLock::new(Vec::new()),
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for DynamicList {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

impl List for DynamicList {
    #[inline]
    fn len(&self) -> usize {
        read(&self.values).len()
    }

    #[inline]
    fn get(&self, index: usize) -> Option<Value> {
        read(&self.values).get(index).cloned()
    }

    fn replace(&self, index: usize, value: Value) -> Option<Value> {
        write(&self.values)
            .get_mut(index)
            .map(|slot| core::mem::replace(slot, value))
    }

    #[inline]
    fn push(&self, value: Value) {
        write(&self.values).push(value);
    }
}

impl Inspect for DynamicList {
    #[inline]
    fn type_name(&self) -> &'static str {
        "DynamicList"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicList(len={})", self.len())
    }

    #[inline]
    fn as_list(&self) -> Option<&dyn List> {
        Some(self)
    }
}
