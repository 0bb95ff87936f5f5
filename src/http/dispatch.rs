//! Request dispatch against the live route table.
//!
//! # Responsibilities
//! - Percent-decode the request path and resolve it to a route entry
//! - Reject methods other than GET and HEAD
//! - Serve the discovery document or call the resource handler
//! - Record metrics and log every outcome

use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::http::request::RequestIdExt;
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{RouteKind, RouteMatch, RouteTable, RouteTarget, FORMAT_CAPTURE};

/// The only representation served.
const JSON_FORMAT: &str = "json";

/// Catch-all handler mounted on every path.
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start = Instant::now();
    let table = state.table.load_full();
    let path = uri.path();
    let request_id = headers.request_id();

    // undecodable paths match nothing
    let decoded = urlencoding::decode(path).ok();

    let (route, outcome) = match decoded.as_deref().and_then(|p| table.resolve(p)) {
        Some(matched) => (
            matched.entry.route_name().to_owned(),
            respond(&table, &method, &matched),
        ),
        None => ("none".to_owned(), Err(ApiError::NotFound)),
    };

    let response = match outcome {
        Ok(response) => response,
        Err(error) => {
            if let ApiError::Internal(reason) = &error {
                tracing::error!(request_id, %route, path, %reason, "Dispatch failed");
            }
            error.into_response()
        }
    };

    let status = response.status().as_u16();
    metrics::record_request(&route, method.as_str(), status, start);
    tracing::debug!(request_id, %method, path, %route, status, "Request dispatched");
    response
}

fn respond(
    table: &RouteTable,
    method: &Method,
    matched: &RouteMatch<'_>,
) -> Result<Response, ApiError> {
    if *method != Method::GET && *method != Method::HEAD {
        return Err(ApiError::MethodNotAllowed(method.to_string()));
    }
    if matched
        .params
        .get(FORMAT_CAPTURE)
        .is_some_and(|format| format != JSON_FORMAT)
    {
        return Err(ApiError::NotFound);
    }

    let body = match matched.entry.target() {
        RouteTarget::ApiRoot(root) => root.render(table),
        RouteTarget::Resource { handler, kind } => {
            let filter = matched.entry.filter_for(&matched.params)?;
            tracing::trace!(%filter, ?kind, "Resolved filter");
            match kind {
                RouteKind::List => handler.list(&filter)?,
                RouteKind::Detail => handler.detail(&filter)?,
            }
        }
    };
    Ok(Json(body).into_response())
}
