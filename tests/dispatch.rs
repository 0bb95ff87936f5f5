//! Request dispatch through the full middleware stack.

use axum::http::{Method, StatusCode};
use serde_json::json;

mod common;

use common::{get, request, server, DEVELOPERS, DEVELOPERS_LANGUAGES, DEVELOPERS_LANGUAGES_VERSIONS};

#[tokio::test]
async fn test_parent_detail() {
    let router = server(DEVELOPERS).router();
    let (status, body) = get(&router, "/developers/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"pk": 1, "name": "Guido Rossum"}));
}

#[tokio::test]
async fn test_non_existing_parent_detail() {
    let router = server(DEVELOPERS).router();
    let (status, body) = get(&router, "/developers/3/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not found."}));
}

#[tokio::test]
async fn test_child_detail() {
    let router = server(DEVELOPERS_LANGUAGES).router();
    let (status, body) = get(&router, "/developers/1/languages/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Python");
}

#[tokio::test]
async fn test_child_detail_with_wrong_parent() {
    let router = server(DEVELOPERS_LANGUAGES).router();
    let (status, _) = get(&router, "/developers/1/languages/2/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_child_detail_with_non_existing_parent() {
    let router = server(DEVELOPERS_LANGUAGES).router();
    let (status, _) = get(&router, "/developers/3/languages/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_existing_child_detail() {
    let router = server(DEVELOPERS_LANGUAGES).router();
    let (status, _) = get(&router, "/developers/1/languages/3/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grand_child_detail() {
    let router = server(DEVELOPERS_LANGUAGES_VERSIONS).router();
    let (status, body) = get(&router, "/developers/1/languages/1/versions/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "2.7");

    let (status, _) = get(&router, "/developers/2/languages/1/versions/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_grand_child_detail_with_wrong_parent() {
    let router = server(DEVELOPERS_LANGUAGES_VERSIONS).router();

    // Perl belongs to Larry, but version 1 belongs to Python.
    let (status, _) = get(&router, "/developers/2/languages/2/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&router, "/developers/2/languages/2/versions/1/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_percent_encoded_path() {
    let router = server(DEVELOPERS_LANGUAGES).router();

    let (status, body) = get(&router, "/developers/%31/languages/%31/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Python");

    let (status, _) = get(&router, "/%64evelopers/").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(&router, "/developers/%FF/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nested_list_is_scoped_to_parent() {
    let router = server(DEVELOPERS_LANGUAGES).router();

    let (status, body) = get(&router, "/developers/2/languages/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"pk": 2, "name": "Perl", "author": 2}]));

    let (status, body) = get(&router, "/developers/3/languages/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_api_root() {
    let router = server(DEVELOPERS_LANGUAGES).router();

    let (status, body) = get(&router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"developers": "/developers/"}));

    let (status, body) = get(&router, "/.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"developers": "/developers/"}));

    let (status, _) = get(&router, "/.xml").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path() {
    let router = server(DEVELOPERS).router();
    let (status, body) = get(&router, "/languages/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not found."}));
}

#[tokio::test]
async fn test_write_methods_not_allowed() {
    let router = server(DEVELOPERS).router();
    let (status, body) = request(&router, Method::POST, "/developers/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"detail": "Method \"POST\" not allowed."}));
}

#[tokio::test]
async fn test_head_is_served() {
    let router = server(DEVELOPERS).router();
    let (status, _) = request(&router, Method::HEAD, "/developers/1/").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let router = server(DEVELOPERS).router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/developers/")
                .header("x-request-id", "test-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "test-123");

    let response = server(DEVELOPERS)
        .router()
        .oneshot(Request::builder().uri("/developers/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
