//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, live table)
//!     → request.rs (request ID for log correlation)
//!     → dispatch.rs (resolve path, call handler)
//!     → response.rs (errors as JSON `detail` bodies)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer, ReloadError};
