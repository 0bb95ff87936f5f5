//! Shared fixtures for integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use nested_resources::config::parse_config;
use nested_resources::http::HttpServer;
use nested_resources::lifecycle::prepare;
use nested_resources::store::seed;

pub const DEVELOPERS: &str = r#"
    [[resources]]
    name = "developer"
    path_segment = "developers"
"#;

pub const DEVELOPERS_LANGUAGES: &str = r#"
    [[resources]]
    name = "developer"
    path_segment = "developers"

    [[resources.children]]
    name = "language"
    path_segment = "languages"
    parent_field_lookup = "author"
"#;

pub const DEVELOPERS_LANGUAGES_VERSIONS: &str = r#"
    [[resources]]
    name = "developer"
    path_segment = "developers"

    [[resources.children]]
    name = "language"
    path_segment = "languages"
    parent_field_lookup = "author"

    [[resources.children.children]]
    name = "version"
    path_segment = "versions"
    parent_field_lookup = "language"
"#;

/// Two developers, one language each, one version of Python.
pub fn fixtures() -> Value {
    json!({
        "developers": [
            {"pk": 1, "name": "Guido Rossum"},
            {"pk": 2, "name": "Larry Wall"}
        ],
        "languages": [
            {"pk": 1, "name": "Python", "author": 1},
            {"pk": 2, "name": "Perl", "author": 2}
        ],
        "versions": [
            {"pk": 1, "name": "2.7", "language": 1}
        ]
    })
}

/// Build a server for `toml`, seeding whichever fixture collections it
/// declares.
pub fn server(toml: &str) -> HttpServer {
    let app = prepare(parse_config(toml).expect("config parses")).expect("app prepares");

    let mut document = fixtures();
    if let Value::Object(collections) = &mut document {
        collections.retain(|name, _| app.store.has_collection(name));
    }
    seed(&app.store, &document).expect("fixtures load");

    HttpServer::new(app)
}

pub async fn request(router: &Router, method: Method, path: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub async fn get(router: &Router, path: &str) -> (StatusCode, Value) {
    request(router, Method::GET, path).await
}
