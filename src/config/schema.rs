//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API
//! server. All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::{DefaultRouter, RouterStrategy, SimpleRouter, DEFAULT_ROOT_VIEW_NAME};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Listener and request settings.
    pub server: ServerConfig,

    /// Route naming convention.
    pub router: RouterConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    /// JSON fixtures seeding the in-memory store. Relative paths are
    /// resolved against the config file's directory.
    pub fixtures: Option<PathBuf>,

    /// Top-level resources, each with nested children.
    pub resources: Vec<ResourceConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Which [`RouterStrategy`] compiles the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// List/detail routes plus the API root.
    #[default]
    Default,
    /// List/detail routes only.
    Simple,
}

/// Router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    pub strategy: StrategyKind,

    /// Whether non-root paths end with `/`.
    pub trailing_slash: bool,

    /// Route name of the API root view (default strategy only).
    pub root_view_name: String,

    /// Emit duplicate route names as ambiguous entries instead of failing.
    pub allow_duplicate_names: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::Default,
            trailing_slash: true,
            root_view_name: DEFAULT_ROOT_VIEW_NAME.to_string(),
            allow_duplicate_names: false,
        }
    }
}

impl RouterConfig {
    /// Instantiate the configured strategy.
    pub fn build_strategy(&self) -> Box<dyn RouterStrategy> {
        match self.strategy {
            StrategyKind::Default => Box::new(
                DefaultRouter::new()
                    .with_trailing_slash(self.trailing_slash)
                    .with_root_view_name(self.root_view_name.clone()),
            ),
            StrategyKind::Simple => {
                Box::new(SimpleRouter::new().with_trailing_slash(self.trailing_slash))
            }
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// One resource declaration, possibly nested.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ResourceConfig {
    /// Route name stem (`<name>-list`, `<name>-detail`).
    pub name: String,

    /// URL segment of the collection.
    pub path_segment: String,

    /// Registered handler key. Defaults to the path segment.
    #[serde(default)]
    pub handler: Option<String>,

    /// Field referencing the parent; required below the top level.
    #[serde(default)]
    pub parent_field_lookup: Option<String>,

    #[serde(default)]
    pub children: Vec<ResourceConfig>,
}

impl ResourceConfig {
    pub fn handler_key(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.path_segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: ApiConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:8000");
        assert_eq!(config.router.strategy, StrategyKind::Default);
        assert!(config.router.trailing_slash);
        assert_eq!(config.router.root_view_name, "api-root");
        assert!(config.resources.is_empty());
    }

    #[test]
    fn test_nested_resources_parse() {
        let config: ApiConfig = toml::from_str(
            r#"
            [router]
            strategy = "simple"
            trailing_slash = false

            [[resources]]
            name = "developer"
            path_segment = "developers"

            [[resources.children]]
            name = "language"
            path_segment = "languages"
            handler = "langs"
            parent_field_lookup = "author"
            "#,
        )
        .unwrap();

        assert_eq!(config.router.strategy, StrategyKind::Simple);
        let developer = &config.resources[0];
        assert_eq!(developer.handler_key(), "developers");
        assert_eq!(developer.children[0].handler_key(), "langs");
        assert_eq!(
            developer.children[0].parent_field_lookup.as_deref(),
            Some("author")
        );
    }

    #[test]
    fn test_build_strategy() {
        let mut router = RouterConfig::default();
        assert_eq!(router.build_strategy().intrinsic_routes(&[]).len(), 2);

        router.strategy = StrategyKind::Simple;
        assert!(router.build_strategy().intrinsic_routes(&[]).is_empty());
    }
}
