//! Nested resource routing library.
//!
//! Compiles a forest of resource descriptors into a flat, named route table
//! in which every nested route carries the lookup chain that scopes its
//! records to their ancestors, and serves that table over HTTP.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod resource;
pub mod routing;
pub mod store;

pub use config::schema::ApiConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use resource::{NestedResource, Resource, ResourceHandler};
pub use routing::{compile, RouteEntry, RouteTable};
