use std::fmt;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::ops::Simplify;
use crate::{AccessFault, Inspect, Value};

const FIELDS: &[&str] = &[
    "name",
    "parent",
    "absolute",
    "exists",
    "directory",
    "length",
    "modified",
    "canonical",
];

/// Narrows an unsigned measure to `i64`, clamping values that do not fit.
fn saturate<T>(field: &str, value: T) -> i64
where
    T: Copy + fmt::Display + TryInto<i64>,
{
    value.try_into().unwrap_or_else(|_| {
        log::debug!("path field `{field}` clamped: {value} exceeds i64");
        i64::MAX
    })
}

impl Simplify for PathBuf {
    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        FIELDS
    }

    fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
        let value = match name {
            "name" => self
                .file_name()
                .map(|n| Value::text(n.to_string_lossy()))
                .ok_or_else(|| AccessFault::new("path has no file name")),
            "parent" => self
                .parent()
                .map(|p| Value::text(p.to_string_lossy()))
                .ok_or_else(|| AccessFault::new("path has no parent")),
            "absolute" => Ok(Value::from(self.is_absolute())),
            "exists" => Ok(Value::from(self.exists())),
            "directory" => Ok(Value::from(self.is_dir())),
            "length" => self
                .metadata()
                .map(|m| Value::from(saturate("length", m.len())))
                .map_err(AccessFault::from),
            "modified" => self
                .metadata()
                .and_then(|m| m.modified())
                .map_err(AccessFault::from)
                .and_then(|time| {
                    time.duration_since(UNIX_EPOCH)
                        .map_err(|e| AccessFault::new(e.to_string()))
                })
                .map(|d| Value::from(saturate("modified", d.as_millis()))),
            "canonical" => self
                .canonicalize()
                .map(|p| Value::text(p.to_string_lossy()))
                .map_err(AccessFault::from),
            _ => return None,
        };
        Some(value)
    }
}

impl Inspect for PathBuf {
    #[inline]
    fn type_name(&self) -> &'static str {
        "PathBuf"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(), f)
    }

    #[inline]
    fn as_simple(&self) -> Option<&dyn Simplify> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::Value;
    use crate::ops::Simplify;

    #[test]
    fn existing_file_has_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.txt");
        std::fs::write(&file, b"hello").unwrap();

        let path = PathBuf::from(&file);
        for name in path.field_names() {
            assert!(path.field(name).unwrap().is_ok(), "field `{name}` failed");
        }
        assert_eq!(path.field("length").unwrap().unwrap(), Value::from(5_i64));
        assert_eq!(path.field("name").unwrap().unwrap(), Value::from("data.txt"));
    }

    #[test]
    fn oversized_measures_are_clamped() {
        assert_eq!(super::saturate("length", 7_u64), 7);
        assert_eq!(super::saturate("length", u64::MAX), i64::MAX);
        assert_eq!(super::saturate("modified", u128::MAX), i64::MAX);
    }

    #[test]
    fn missing_file_fails_per_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        assert!(path.field("canonical").unwrap().is_err());
        assert!(path.field("length").unwrap().is_err());
        assert_eq!(path.field("exists").unwrap().unwrap(), Value::from(false));
        assert!(path.field("owner").is_none());
    }
}
