use std::fmt;

use crate::ops::Simplify;
use crate::{AccessFault, Inspect, Value};

/// A node of a markup document.
///
/// # Examples
///
/// ```
/// use probe_reflect::impls::Element;
///
/// let doc = Element::new("config")
///     .with_child(Element::new("port").with_text("8080"));
///
/// assert_eq!(doc.name(), "config");
/// assert!(doc.has_children());
/// assert_eq!(doc.children()[0].text(), Some("8080"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[inline]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

impl Simplify for Element {
    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        &["name", "value", "has_children"]
    }

    fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
        match name {
            "name" => Some(Ok(Value::from(self.name.as_str()))),
            "value" => Some(Ok(Value::from(self.text.clone()))),
            "has_children" => Some(Ok(Value::from(self.has_children()))),
            _ => None,
        }
    }
}

impl Inspect for Element {
    #[inline]
    fn type_name(&self) -> &'static str {
        "Element"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.name)
    }

    #[inline]
    fn as_simple(&self) -> Option<&dyn Simplify> {
        Some(self)
    }
}
