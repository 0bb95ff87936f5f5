//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup / reload):
//!     Resource forest
//!     → compiler.rs (depth-first expansion with accumulated scope)
//!     → strategy.rs (list/detail naming, intrinsic root routes)
//!     → router.rs (freeze as immutable RouteTable)
//!
//! Incoming Request (path)
//!     → router.rs (first entry whose template matches)
//!     → matcher.rs (segment walk, capture extraction)
//!     → Return: RouteMatch { entry, params } or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - No regex in the hot path
//! - Deterministic: same forest always compiles to the same table
//! - First match wins (declaration order)

pub mod compiler;
pub mod matcher;
pub mod root;
pub mod router;
pub mod strategy;
pub mod template;

pub use compiler::{compile, Compiler};
pub use matcher::Matcher;
pub use root::{ApiRoot, ApiRootLink};
pub use router::{
    build_route_table, ReverseError, RouteEntry, RouteKind, RouteMatch, RouteTable, RouteTarget,
};
pub use strategy::{DefaultRouter, RouterStrategy, SimpleRouter, DEFAULT_ROOT_VIEW_NAME};
pub use template::{PathParams, PathTemplate, Segment, FORMAT_CAPTURE, PK_CAPTURE};
