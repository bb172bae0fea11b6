//! Convert string literals into typed scalars.
//!
//! Remote write requests carry their new value as text. [`convert`] parses
//! such a literal according to a declared type name, [`convert_like`] takes
//! the type from a value that is about to be replaced.
//!
//! Two literals are reserved and recognised before any parsing:
//!
//! - [`NULL_LITERAL`] (`[null]`) always yields [`Value::Null`].
//! - [`EMPTY_LITERAL`] (`""`) yields an empty string, and is only valid for a
//!   textual type. It tells an intentionally empty value apart from a missing one.
//!
//! # Type names
//!
//! | scalar   | accepted names                      |
//! |----------|-------------------------------------|
//! | `bool`   | `bool`, `boolean`                   |
//! | `i8`     | `i8`, `byte`                        |
//! | `i16`    | `i16`, `short`                      |
//! | `i32`    | `i32`, `int`, `integer`             |
//! | `i64`    | `i64`, `long`                       |
//! | `f32`    | `f32`, `float`                      |
//! | `f64`    | `f64`, `double`                     |
//! | `char`   | `char`                              |
//! | `String` | `String`, `string`, `str`, `text`   |
//!
//! # Examples
//!
//! ```
//! use probe_reflect::{Value, convert::{convert, EMPTY_LITERAL, NULL_LITERAL}};
//!
//! assert_eq!(convert("42", "int").unwrap(), Value::from(42));
//! assert_eq!(convert(EMPTY_LITERAL, "String").unwrap(), Value::from(""));
//! assert_eq!(convert(NULL_LITERAL, "long").unwrap(), Value::Null);
//! assert!(convert("x", "int").is_err());
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use probe_utils::hash::HashMap;
use thiserror::Error;

use crate::{Scalar, Value};

// -----------------------------------------------------------------------------
// Reserved literals

/// The literal standing for a null value, whatever the declared type.
pub const NULL_LITERAL: &str = "[null]";

/// The literal standing for an intentionally empty string.
pub const EMPTY_LITERAL: &str = "\"\"";

// -----------------------------------------------------------------------------
// Error

/// A literal could not be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{literal}` to type `{type_name}`: {reason}")]
pub struct ConversionError {
    pub literal: String,
    pub type_name: String,
    pub reason: Cow<'static, str>,
}

impl ConversionError {
    pub fn new(literal: &str, type_name: &str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            literal: literal.to_owned(),
            type_name: type_name.to_owned(),
            reason: reason.into(),
        }
    }
}

// -----------------------------------------------------------------------------
// Registry

type ParseFn = fn(&str) -> Result<Scalar, Cow<'static, str>>;

#[derive(Clone, Copy)]
struct ScalarParser {
    textual: bool,
    parse: ParseFn,
}

fn number<T>(literal: &str) -> Result<T, Cow<'static, str>>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    literal.parse::<T>().map_err(|e| Cow::Owned(e.to_string()))
}

fn parse_bool(literal: &str) -> Result<Scalar, Cow<'static, str>> {
    if literal.eq_ignore_ascii_case("true") {
        Ok(Scalar::Bool(true))
    } else if literal.eq_ignore_ascii_case("false") {
        Ok(Scalar::Bool(false))
    } else {
        Err(Cow::Borrowed("expected `true` or `false`"))
    }
}

fn parse_char(literal: &str) -> Result<Scalar, Cow<'static, str>> {
    let mut chars = literal.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Scalar::Char(c)),
        _ => Err(Cow::Borrowed("expected exactly one character")),
    }
}

static PARSERS: LazyLock<HashMap<&'static str, ScalarParser>> = LazyLock::new(|| {
    let table: [(&[&'static str], bool, ParseFn); 9] = [
        (&["bool", "boolean"], false, parse_bool),
        (&["i8", "byte"], false, |s| number(s).map(Scalar::Byte)),
        (&["i16", "short"], false, |s| number(s).map(Scalar::Short)),
        (&["i32", "int", "integer"], false, |s| number(s).map(Scalar::Int)),
        (&["i64", "long"], false, |s| number(s).map(Scalar::Long)),
        (&["f32", "float"], false, |s| number(s).map(Scalar::Float)),
        (&["f64", "double"], false, |s| number(s).map(Scalar::Double)),
        (&["char"], false, parse_char),
        (&["String", "string", "str", "text"], true, |s| {
            Ok(Scalar::Text(s.to_owned()))
        }),
    ];

    let mut parsers = HashMap::default();
    for (names, textual, parse) in table {
        for name in names {
            parsers.insert(*name, ScalarParser { textual, parse });
        }
    }
    parsers
});

/// Returns `true` if `type_name` is a registered scalar type.
#[inline]
pub fn is_known_type(type_name: &str) -> bool {
    PARSERS.contains_key(type_name)
}

// -----------------------------------------------------------------------------
// Conversion

/// Converts `literal` to a value of the declared type `type_name`.
pub fn convert(literal: &str, type_name: &str) -> Result<Value, ConversionError> {
    if literal == NULL_LITERAL {
        return Ok(Value::Null);
    }

    let Some(parser) = PARSERS.get(type_name) else {
        return Err(ConversionError::new(literal, type_name, "unknown type"));
    };

    if literal == EMPTY_LITERAL {
        return if parser.textual {
            Ok(Value::text(String::new()))
        } else {
            Err(ConversionError::new(
                literal,
                type_name,
                "the empty literal is only valid for text",
            ))
        };
    }

    (parser.parse)(literal)
        .map(Value::Scalar)
        .map_err(|reason| ConversionError::new(literal, type_name, reason))
}

/// Converts `literal` to the runtime type of `hint`.
///
/// A null hint carries no type, so the literal is kept as text.
/// A node hint cannot be produced from a literal and fails.
///
/// # Examples
///
/// ```
/// use probe_reflect::{Value, convert::convert_like};
///
/// assert_eq!(convert_like("7", &Value::from(1_i64)).unwrap(), Value::from(7_i64));
/// assert_eq!(convert_like("7", &Value::Null).unwrap(), Value::from("7"));
/// ```
pub fn convert_like(literal: &str, hint: &Value) -> Result<Value, ConversionError> {
    match hint {
        Value::Scalar(scalar) => convert(literal, scalar.type_name()),
        Value::Null => match literal {
            NULL_LITERAL => Ok(Value::Null),
            EMPTY_LITERAL => Ok(Value::text(String::new())),
            _ => Ok(Value::text(literal)),
        },
        Value::Node(node) => Err(ConversionError::new(
            literal,
            node.type_name(),
            "structured values cannot be written from a literal",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{EMPTY_LITERAL, NULL_LITERAL, convert, convert_like, is_known_type};
    use crate::ops::DynamicList;
    use crate::{Scalar, Value};

    #[test]
    fn aliases_share_a_parser() {
        for name in ["i32", "int", "integer"] {
            assert_eq!(convert("-5", name).unwrap(), Value::Scalar(Scalar::Int(-5)));
        }
        assert_eq!(convert("5", "long").unwrap(), Value::Scalar(Scalar::Long(5)));
        assert_eq!(convert("1.5", "double").unwrap(), Value::from(1.5_f64));
        assert_eq!(convert("x", "char").unwrap(), Value::from('x'));
        assert_eq!(convert("TRUE", "boolean").unwrap(), Value::from(true));
    }

    #[test]
    fn null_literal_ignores_the_type() {
        assert_eq!(convert(NULL_LITERAL, "int").unwrap(), Value::Null);
        assert_eq!(convert(NULL_LITERAL, "no-such-type").unwrap(), Value::Null);
    }

    #[test]
    fn empty_literal_needs_text() {
        assert_eq!(convert(EMPTY_LITERAL, "text").unwrap(), Value::from(""));
        let err = convert(EMPTY_LITERAL, "int").unwrap_err();
        assert_eq!(err.type_name, "int");
    }

    #[test]
    fn error_names_literal_and_type() {
        let err = convert("12x", "i64").unwrap_err();
        assert_eq!(err.literal, "12x");
        assert_eq!(err.type_name, "i64");
        assert!(err.to_string().contains("`12x`"));

        assert!(convert("1", "Duration").is_err());
        assert!(convert("yes", "bool").is_err());
        assert!(convert("300", "byte").is_err());
        assert!(convert("ab", "char").is_err());
    }

    #[test]
    fn hint_decides_the_type() {
        assert_eq!(
            convert_like("3", &Value::from(1_i16)).unwrap(),
            Value::Scalar(Scalar::Short(3))
        );
        assert!(convert_like("3", &Value::node(DynamicList::new())).is_err());
        assert_eq!(convert_like(NULL_LITERAL, &Value::Null).unwrap(), Value::Null);
    }

    #[test]
    fn registry_lists_canonical_names() {
        for scalar in [
            Scalar::Bool(true),
            Scalar::Byte(0),
            Scalar::Short(0),
            Scalar::Int(0),
            Scalar::Long(0),
            Scalar::Float(0.0),
            Scalar::Double(0.0),
            Scalar::Char('a'),
            Scalar::Text(String::new()),
        ] {
            assert!(is_known_type(scalar.type_name()));
        }
    }
}
