//! [`Inspect`](crate::Inspect) implementations for well-known complex types.
//!
//! These types are simplified: they expose a small curated field set through
//! [`Simplify`](crate::ops::Simplify) rather than every accessor they have.
//!
//! - [`std::path::PathBuf`]: `name`, `parent`, `absolute`, `exists`, `directory`,
//!   `length`, `modified`, `canonical`.
//! - [`chrono::DateTime<Utc>`](chrono::DateTime): `millis`, `time`.
//! - [`url::Url`]: `url`, `scheme`, `host`, `port`, `path`, `query`.
//! - [`Element`]: `name`, `value`, `has_children`.

// -----------------------------------------------------------------------------
// Modules

mod element;
mod path;
mod time;
mod uri;

// -----------------------------------------------------------------------------
// Exports

pub use element::Element;
