//! Resource declarations.
//!
//! # Data Flow
//! ```text
//! Rust builders / [[resources]] config
//!     → descriptor.rs (validated Resource / NestedResource tree)
//!     → handler.rs (capability each resource is served by)
//!     → routing::compiler (flattened into route entries)
//! ```
//!
//! # Design Decisions
//! - Descriptors are immutable once built; a new forest means a new table
//! - Validation happens at construction, so the compiler never sees a
//!   malformed descriptor
//! - Handlers are shared trait objects, cloned into every route they serve

pub mod descriptor;
pub mod error;
pub mod handler;

#[cfg(test)]
pub(crate) mod testing;

pub use descriptor::{NestedResource, Resource};
pub use error::ConfigurationError;
pub use handler::{HandlerError, HandlerRef, HandlerRegistry, ResourceHandler};
