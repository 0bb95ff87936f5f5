//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, every error collected)
//!     → ApiConfig (validated, immutable)
//!     → build.rs (descriptor forest → RouteTable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server rebuilds the table and swaps it atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod build;
pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use build::{build_resources, build_table};
pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ApiConfig, ObservabilityConfig, ResourceConfig, RouterConfig, ServerConfig, StrategyKind,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
