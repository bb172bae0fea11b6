use std::sync::Arc;

use probe_reflect::Value;
use probe_reflect::convert::convert_like;

use crate::{Context, EscalatingFaultHandler, Extracted, Limits, Path, WalkError, Walker};

/// The result of [`Walker::set`].
#[derive(Debug, Clone, PartialEq)]
pub struct SetOutcome {
    /// The root after the write. A write below the root mutates it in place,
    /// so this is the root itself; writing the root yields its replacement.
    pub value: Value,
    /// The value before the write, `None` when there was none or it could not be read.
    pub previous: Option<Value>,
}

impl Walker {
    /// Writes `literal` to the location `path` below `root`.
    ///
    /// All segments but the last are navigated without limits. The handler
    /// of the value reached then writes the child named by the last segment,
    /// converting `literal` to the type of the target.
    ///
    /// An empty path addresses the root itself: no mutation takes place and
    /// the converted literal is returned as the new value.
    ///
    /// # Examples
    ///
    /// ```
    /// use probe_reflect::{Value, ops::DynamicMap};
    /// use probe_walk::{ExtractOptions, Path, Tree, Walker};
    ///
    /// let map = Value::node(DynamicMap::new().with("a", "1"));
    /// let walker = Walker::default();
    ///
    /// let outcome = walker.set(&map, Path::parse("a"), "2").unwrap();
    /// assert_eq!(outcome.previous, Some(Value::from("1")));
    ///
    /// let a = walker.extract_tree(&map, Path::parse("a"), &ExtractOptions::default()).unwrap();
    /// assert_eq!(a, Tree::from("2"));
    /// ```
    pub fn set(&self, root: &Value, path: Path, literal: &str) -> Result<SetOutcome, WalkError> {
        let Some((mut parent_path, key)) = path.split_last() else {
            let value = convert_like(literal, root)?;
            return Ok(SetOutcome {
                value,
                previous: Some(root.clone()),
            });
        };

        let mut ctx = Context::new(Limits::UNLIMITED, Arc::new(EscalatingFaultHandler));
        let parent = match self.descend(&mut ctx, root, &mut parent_path, false)? {
            Extracted::Native(parent) => parent,
            Extracted::Tree(_) => {
                return Err(WalkError::unsupported(
                    root.type_name(),
                    "the path does not lead to a single value",
                ));
            }
        };

        let Value::Node(node) = &parent else {
            return Err(WalkError::unknown(
                key,
                format!("a `{}` value has no children", parent.type_name()),
            ));
        };

        let handler = self.handler_for(node.inspect())?;
        log::trace!("writing `{key}` of `{}` through the {} handler", node.type_name(), handler.kind());
        let previous = handler.set(node, &key, literal)?;

        Ok(SetOutcome {
            value: root.clone(),
            previous,
        })
    }
}
