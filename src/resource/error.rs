//! Configuration errors raised while declaring or compiling resources.

use thiserror::Error;

/// A malformed resource declaration. Always fatal: the route table is never
/// built from a forest that produced one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Resource declared with an empty name.
    #[error("resource name must not be empty")]
    EmptyName,

    /// Resource declared with an empty path segment.
    #[error("resource `{name}` has an empty path segment")]
    EmptyPathSegment { name: String },

    /// Path segment contains a character with meaning in path templates.
    #[error("resource `{name}` path segment `{segment}` must not contain `{found}`")]
    InvalidPathSegment {
        name: String,
        segment: String,
        found: char,
    },

    /// Nested resource declared without the field pointing at its parent.
    #[error("nested resource `{name}` is missing a parent field lookup")]
    MissingParentFieldLookup { name: String },

    /// Parent field lookup collides with a capture the router owns.
    #[error("nested resource `{name}` cannot use reserved capture `{lookup}` as parent field lookup")]
    ReservedParentFieldLookup { name: String, lookup: String },

    /// Two descriptors compile to the same route name.
    #[error("route name `{0}` is declared more than once")]
    DuplicateRouteName(String),

    /// A config entry names a handler nobody registered.
    #[error("resource `{name}` references unknown handler `{handler}`")]
    UnknownHandler { name: String, handler: String },
}
