use std::fmt;

use probe_reflect::Scalar;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

/// The structured result of materializing a value.
///
/// A `Tree` contains nothing but nulls, typed scalars, sequences and
/// string-keyed mappings, so it can be encoded by any serde format.
/// Mapping entries keep the order in which they were extracted, and the
/// mappings built by a [`Walker`](crate::Walker) never repeat a key.
///
/// # Examples
///
/// ```
/// use probe_walk::Tree;
///
/// let tree = Tree::Mapping(vec![
///     ("name".into(), Tree::from("main")),
///     ("ids".into(), Tree::Sequence(vec![Tree::from(1), Tree::Null])),
/// ]);
///
/// assert_eq!(tree.get("name").and_then(Tree::as_str), Some("main"));
/// assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"name":"main","ids":[1,null]}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Tree {
    #[default]
    Null,
    Scalar(Scalar),
    Sequence(Vec<Tree>),
    Mapping(Vec<(String, Tree)>),
}

impl Tree {
    /// Creates a text leaf.
    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the text of a text leaf.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(scalar) => scalar.as_str(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Returns the entry `key` of a mapping.
    pub fn get(&self, key: &str) -> Option<&Tree> {
        match self {
            Self::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Returns the element `index` of a sequence.
    pub fn at(&self, index: usize) -> Option<&Tree> {
        match self {
            Self::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Number of elements of a sequence or entries of a mapping, `0` for leaves.
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Mapping(entries) => entries.len(),
            Self::Null | Self::Scalar(_) => 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the keys of a mapping.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let entries = match self {
            Self::Mapping(entries) => entries.as_slice(),
            _ => &[],
        };
        entries.iter().map(|(k, _)| k.as_str())
    }
}

impl fmt::Display for Tree {
    /// Writes a compact, JSON-like rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(Scalar::Text(text)) => write!(f, "{text:?}"),
            Self::Scalar(scalar) => fmt::Display::fmt(scalar, f),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(item, f)?;
                }
                f.write_str("]")
            }
            Self::Mapping(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

macro_rules! impl_from_leaf {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Tree {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Scalar(Scalar::from(value))
                }
            }
        )*
    };
}

impl_from_leaf!(bool, i8, i16, i32, i64, f32, f64, char, String);

impl From<&str> for Tree {
    #[inline]
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<Scalar> for Tree {
    #[inline]
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;

    fn sample() -> Tree {
        Tree::Mapping(vec![
            ("b".into(), Tree::from(2_i64)),
            ("a".into(), Tree::Sequence(vec![Tree::from(true), Tree::from("x")])),
            ("n".into(), Tree::Null),
        ])
    }

    #[test]
    fn mapping_keeps_extraction_order() {
        let tree = sample();
        assert_eq!(tree.keys().collect::<Vec<_>>(), ["b", "a", "n"]);
        assert_eq!(
            serde_json::to_string(&tree).unwrap(),
            r#"{"b":2,"a":[true,"x"],"n":null}"#
        );
    }

    #[test]
    fn accessors() {
        let tree = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("a").and_then(|a| a.at(1)), Some(&Tree::from("x")));
        assert!(tree.get("n").is_some_and(Tree::is_null));
        assert!(tree.get("missing").is_none());
        assert!(Tree::from(1).is_empty());
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(sample().to_string(), r#"{"b": 2, "a": [true, "x"], "n": null}"#);
    }
}
