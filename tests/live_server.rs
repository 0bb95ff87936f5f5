//! End-to-end tests against a bound listener.

use std::fs;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use nested_resources::config::{load_config, parse_config};
use nested_resources::http::HttpServer;
use nested_resources::lifecycle::{prepare, Shutdown};

mod common;

const CONFIG: &str = r#"
fixtures = "fixtures.json"

[server]
request_timeout_secs = 5

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

#[tokio::test]
async fn test_serves_config_file_with_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("api.toml");
    fs::write(&config_path, CONFIG).unwrap();
    fs::write(
        dir.path().join("fixtures.json"),
        serde_json::to_string(&common::fixtures()).unwrap(),
    )
    .unwrap();

    let app = prepare(load_config(&config_path).unwrap()).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(HttpServer::new(app).run(
        listener,
        Some(update_rx),
        shutdown.subscribe(),
    ));

    let client = reqwest::Client::new();
    let base = format!("http://{addr}");

    let res = client
        .get(format!("{base}/developers/1/languages/1/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Python");

    let res = client
        .get(format!("{base}/developers/1/languages/1/versions/1/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = client
        .get(format!("{base}/developers/2/languages/1/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    // Reload with a simple router: the API root disappears.
    let mut updated = parse_config(CONFIG).unwrap();
    updated.router.strategy = nested_resources::config::StrategyKind::Simple;
    update_tx.send(updated).unwrap();

    let mut root_status = 200;
    for _ in 0..50 {
        root_status = client.get(format!("{base}/")).send().await.unwrap().status().as_u16();
        if root_status == 404 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(root_status, 404);

    // Records survive the reload.
    let res = client
        .get(format!("{base}/developers/"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(2));
    assert_eq!(body[1], json!({"pk": 2, "name": "Larry Wall"}));

    drop(client);
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
}
