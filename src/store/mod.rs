//! In-memory persistence stand-in.
//!
//! # Data Flow
//! ```text
//! fixtures.json
//!     → fixtures.rs (parse, insert per collection)
//!     → memory.rs (collections + relations)
//!
//! Request:
//!     FilterSpec
//!     → handler.rs (CollectionHandler list / detail)
//!     → memory.rs (filter, walking relations for chained fields)
//! ```

pub mod fixtures;
pub mod handler;
pub mod memory;

pub use fixtures::{load_fixtures, seed};
pub use handler::{collection_handlers, declare_relations, register_resources, CollectionHandler};
pub use memory::{MemoryStore, Record, StoreError};
