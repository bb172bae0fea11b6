use std::fmt;

use url::Url;

use crate::ops::Simplify;
use crate::{AccessFault, Inspect, Value};

impl Simplify for Url {
    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        &["url", "scheme", "host", "port", "path", "query"]
    }

    fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
        let value = match name {
            "url" => Ok(Value::from(self.as_str())),
            "scheme" => Ok(Value::from(self.scheme())),
            "host" => self
                .host_str()
                .map(Value::from)
                .ok_or_else(|| AccessFault::new("url has no host")),
            "port" => self
                .port_or_known_default()
                .map(|p| Value::from(i32::from(p)))
                .ok_or_else(|| AccessFault::new("url has no port")),
            "path" => Ok(Value::from(self.path())),
            "query" => self
                .query()
                .map(Value::from)
                .ok_or_else(|| AccessFault::new("url has no query")),
            _ => return None,
        };
        Some(value)
    }
}

impl Inspect for Url {
    #[inline]
    fn type_name(&self) -> &'static str {
        "Url"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }

    #[inline]
    fn as_simple(&self) -> Option<&dyn Simplify> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use url::Url;

    use crate::Value;
    use crate::ops::Simplify;

    #[test]
    fn known_default_port_is_reported() {
        let url = Url::parse("https://example.com/a/b?x=1").unwrap();
        assert_eq!(url.field("port").unwrap().unwrap(), Value::from(443));
        assert_eq!(url.field("path").unwrap().unwrap(), Value::from("/a/b"));
        assert_eq!(url.field("query").unwrap().unwrap(), Value::from("x=1"));
    }

    #[test]
    fn absent_parts_fail() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert!(url.field("host").unwrap().is_err());
        assert!(url.field("query").unwrap().is_err());
    }
}
