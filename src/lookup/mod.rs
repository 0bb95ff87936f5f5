//! Ancestor lookup chains and the filters they resolve to.
//!
//! # Data Flow
//! ```text
//! Route compilation:
//!     parent chain + parent_field_lookup
//!     → chain.rs (LookupChain::descend)
//!     → stored on every RouteEntry
//!
//! Request dispatch:
//!     PathParams captured by the matcher
//!     → resolver.rs (chain + kind → FilterSpec)
//!     → filter.rs (handed to the handler / store)
//! ```

pub mod chain;
pub mod filter;
pub mod resolver;

pub use chain::{FieldPath, LookupChain, LookupStep};
pub use filter::{Constraint, FilterSpec};
pub use resolver::{resolve, ResolveError};
