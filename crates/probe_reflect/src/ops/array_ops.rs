use std::fmt;
use std::sync::RwLock;

use probe_utils::sync::{read, write};

use crate::{Inspect, Value};

// -----------------------------------------------------------------------------
// Array

/// A fixed-size, index-addressable sequence.
///
/// The length never changes; [`Array::replace`] swaps one element in place.
pub trait Array: Send + Sync {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns the element at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<Value>;

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// Returns `None` and leaves the array untouched if `index` is out of bounds.
    fn replace(&self, index: usize, value: Value) -> Option<Value>;

    /// Returns `true` if the array holds no element.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// -----------------------------------------------------------------------------
// Dynamic Array

/// A dynamic, fixed-size array of [`Value`]s.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, ops::{Array, DynamicArray}};
///
/// let array = DynamicArray::new([Value::from(1), Value::from(2)]);
/// assert_eq!(array.len(), 2);
///
/// let old = array.replace(1, Value::from(5));
/// assert_eq!(old, Some(Value::from(2)));
/// assert_eq!(array.replace(2, Value::from(0)), None);
/// ```
pub struct DynamicArray {
    values: RwLock<Box<[Value]>>,
}

impl DynamicArray {
    /// Creates an array holding `values`.
    #[inline]
    pub fn new(values: impl Into<Box<[Value]>>) -> Self {
        Self {
            values: RwLock::new(values.into()),
        }
    }
}

impl<V: Into<Value>> FromIterator<V> for DynamicArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect::<Box<[Value]>>())
    }
}

impl Array for DynamicArray {
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
}

impl Inspect for DynamicArray {
    #[inline]
    fn type_name(&self) -> &'static str {
        "DynamicArray"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicArray(len={})", self.len())
    }

    #[inline]
    fn as_array(&self) -> Option<&dyn Array> {
        Some(self)
    }
}
