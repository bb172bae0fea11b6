use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ops::Simplify;
use crate::{AccessFault, Inspect, Value};

impl Simplify for DateTime<Utc> {
    #[inline]
    fn field_names(&self) -> &'static [&'static str] {
        &["millis", "time"]
    }

    fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
        match name {
            "millis" => Some(Ok(Value::from(self.timestamp_millis()))),
            "time" => Some(Ok(Value::text(
                self.to_rfc3339_opts(SecondsFormat::Millis, true),
            ))),
            _ => None,
        }
    }
}

impl Inspect for DateTime<Utc> {
    #[inline]
    fn type_name(&self) -> &'static str {
        "DateTime<Utc>"
    }

    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    #[inline]
    fn as_simple(&self) -> Option<&dyn Simplify> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::ops::Simplify;
    use crate::{Node, Value};

    #[test]
    fn exposes_millis_and_time() {
        let time = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            time.field("millis").unwrap().unwrap(),
            Value::from(1_700_000_000_123_i64)
        );
        assert_eq!(
            time.field("time").unwrap().unwrap(),
            Value::from("2023-11-14T22:13:20.123Z")
        );
        assert_eq!(Node::new(time).to_string(), "2023-11-14T22:13:20.123Z");
    }
}
