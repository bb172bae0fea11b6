use crate::{AccessFault, Value};

/// A curated view of a well-known complex type.
///
/// Instead of exposing every accessor, a simplified type names a small,
/// explicit set of fields. Deriving one field may fail without affecting the
/// others.
///
/// # Examples
///
/// ```
/// use probe_reflect::{AccessFault, Value, ops::Simplify};
///
/// struct Version(u16, u16);
///
/// impl Simplify for Version {
///     fn field_names(&self) -> &'static [&'static str] {
///         &["major", "minor"]
///     }
///
///     fn field(&self, name: &str) -> Option<Result<Value, AccessFault>> {
///         match name {
///             "major" => Some(Ok(Value::from(i32::from(self.0)))),
///             "minor" => Some(Ok(Value::from(i32::from(self.1)))),
///             _ => None,
///         }
///     }
/// }
///
/// let v = Version(1, 4);
/// assert_eq!(v.field("minor").unwrap().unwrap(), Value::from(4));
/// assert!(v.field("patch").is_none());
/// ```
pub trait Simplify: Send + Sync {
    /// The exposed field names, in output order.
    fn field_names(&self) -> &'static [&'static str];

    /// Derives one field.
    ///
    /// Returns `None` if `name` is not one of [`Simplify::field_names`].
    fn field(&self, name: &str) -> Option<Result<Value, AccessFault>>;
}
