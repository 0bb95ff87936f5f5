//! API root discovery view.

use serde_json::{Map, Value};

use crate::routing::router::RouteTable;
use crate::routing::template::PathParams;

/// One entry of the discovery document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRootLink {
    /// Key in the rendered document, the resource's path segment.
    pub key: String,
    /// List route whose URL the key points at.
    pub route_name: String,
}

/// Maps each top-level resource to its list URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRoot {
    links: Vec<ApiRootLink>,
}

impl ApiRoot {
    pub fn new(links: Vec<ApiRootLink>) -> Self {
        Self { links }
    }

    pub fn links(&self) -> &[ApiRootLink] {
        &self.links
    }

    /// Render `{"developers": "/developers/", ...}` against `table`. Links
    /// that no longer reverse are left out.
    pub fn render(&self, table: &RouteTable) -> Value {
        let mut document = Map::new();
        for link in &self.links {
            match table.reverse(&link.route_name, &PathParams::new()) {
                Ok(url) => {
                    document.insert(link.key.clone(), Value::String(url));
                }
                Err(error) => {
                    tracing::debug!(route = %link.route_name, %error, "Skipping root link");
                }
            }
        }
        Value::Object(document)
    }
}
