use std::fmt;
use std::sync::RwLock;

use probe_utils::sync::{read, write};

use crate::{Inspect, Value};

// -----------------------------------------------------------------------------
// Map

/// A map-like collection addressed by the string form of its keys.
///
/// Keys may be any [`Value`]; lookups compare `key.to_string()` with the
/// requested key, which is how path segments address map entries.
pub trait Map: Send + Sync {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns a snapshot of all entries in insertion order.
    fn entries(&self) -> Vec<(Value, Value)>;

    /// Returns the entry whose stringified key equals `key`.
    ///
    /// The original key is returned with the value so a writer can reuse it.
    fn get(&self, key: &str) -> Option<(Value, Value)> {
        self.entries()
            .into_iter()
            .find(|(k, _)| key_matches(k, key))
    }

    /// Inserts an entry, replacing the one with the same stringified key.
    ///
    /// Returns the previous value, if any. A replaced entry keeps its position.
    fn insert(&self, key: Value, value: Value) -> Option<Value>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Returns `true` if the string form of `key` is `wanted`.
///
/// Text keys are compared without formatting.
pub fn key_matches(key: &Value, wanted: &str) -> bool {
    match key.as_scalar().and_then(|s| s.as_str()) {
        Some(text) => text == wanted,
        None => key.to_string() == wanted,
    }
}

// -----------------------------------------------------------------------------
// Dynamic Map

/// A dynamic, insertion ordered map.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, ops::{DynamicMap, Map}};
///
/// let map = DynamicMap::new();
/// map.insert(Value::from("a"), Value::from("1"));
/// map.insert(Value::from(2), Value::from("two"));
///
/// // Keys are addressed by their string form.
/// let (key, value) = map.get("2").unwrap();
/// assert_eq!(key, Value::from(2));
/// assert_eq!(value, Value::from("two"));
///
/// let old = map.insert(Value::from("a"), Value::from("3"));
/// assert_eq!(old, Some(Value::from("1")));
/// assert_eq!(map.len(), 2);
/// ```
#[derive(Default)]
pub struct DynamicMap {
    entries: RwLock<Vec<(Value, Value)>>,
}

impl DynamicMap {
    /// Creates an empty `DynamicMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Inserts an entry and returns `self`, for building maps in one expression.
    #[inline]
    pub fn with(self, key: impl Into<Value>, value: impl Into<Value>) -> Self {
        self.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for DynamicMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = Self::new();
        for (key, value) in iter {
            map.insert(key.into(), value.into());
        }
        map
    }
}

impl Map for DynamicMap {
    #[inline]
    fn len(&self) -> usize {
        read(&self.entries).len()
    }

    #[inline]
    fn entries(&self) -> Vec<(Value, Value)> {
        read(&self.entries).clone()
    }

    fn get(&self, key: &str) -> Option<(Value, Value)> {
        read(&self.entries)
            .iter()
            .find(|(k, _)| key_matches(k, key))
            .cloned()
    }

    fn insert(&self, key: Value, value: Value) -> Option<Value> {
        let wanted = key.to_string();
        let mut entries = write(&self.entries);
        match entries.iter_mut().find(|(k, _)| key_matches(k, &wanted)) {
            Some((_, old)) => Some(core::mem::replace(old, value)),
            None => {
                entries.push((key, value));
                None
            }
        }
    }
}

impl Inspect for DynamicMap {
    #[inline]
    fn type_name(&self) -> &'static str {
        "DynamicMap"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DynamicMap(len={})", self.len())
    }

    #[inline]
    fn as_map(&self) -> Option<&dyn Map> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{DynamicMap, Map, key_matches};
    use crate::Value;

    #[test]
    fn insertion_order_is_kept() {
        let map: DynamicMap = [("z", 1), ("a", 2), ("m", 3)].into_iter().collect();
        map.insert(Value::from("a"), Value::from(9));

        let keys: Vec<String> = map.entries().iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(map.get("a").map(|(_, v)| v), Some(Value::from(9)));
    }

    #[test]
    fn non_text_keys_match_their_display() {
        assert!(key_matches(&Value::from(true), "true"));
        assert!(key_matches(&Value::from(10_i64), "10"));
        assert!(!key_matches(&Value::from("10 "), "10"));
    }
}
