//! Error responses.
//!
//! # Design Decisions
//! - Every error body is `{"detail": "..."}`
//! - Not-found is uniform: a missing parent, a parent that does not own the
//!   record and a missing record all read the same

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::lookup::ResolveError;
use crate::resource::HandlerError;

/// Ways a dispatched request can fail.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found.")]
    NotFound,

    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    #[error("A server error occurred.")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<HandlerError> for ApiError {
    fn from(error: HandlerError) -> Self {
        match error {
            HandlerError::NotFound => Self::NotFound,
            HandlerError::Failed(reason) => Self::Internal(reason),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(error: ResolveError) -> Self {
        Self::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.to_string() }));
        match self {
            Self::MethodNotAllowed(_) => (
                status,
                [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
                body,
            )
                .into_response(),
            _ => (status, body).into_response(),
        }
    }
}
