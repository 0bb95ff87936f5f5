//! Startup orchestration.
//!
//! # Responsibilities
//! - Declare store collections and relations from the resource tree
//! - Seed fixtures
//! - Register handlers and compile the route table
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Steps run in order: store, fixtures, handlers, table
//! - The listener is bound by the caller, after everything here succeeded

use std::sync::Arc;

use thiserror::Error;

use crate::config::{build_table, ApiConfig};
use crate::resource::{ConfigurationError, HandlerRegistry};
use crate::routing::RouteTable;
use crate::store::{load_fixtures, register_resources, MemoryStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("fixtures: {0}")]
    Store(#[from] StoreError),

    #[error("routes: {0}")]
    Routes(#[from] ConfigurationError),
}

/// Everything the server needs, built from one config.
#[derive(Debug)]
pub struct Application {
    pub config: ApiConfig,
    pub store: Arc<MemoryStore>,
    pub registry: HandlerRegistry,
    pub table: RouteTable,
}

/// Build the store, handlers and route table `config` describes.
pub fn prepare(config: ApiConfig) -> Result<Application, StartupError> {
    let store = Arc::new(MemoryStore::new());
    let registry = register_resources(&store, &config.resources);

    if let Some(path) = &config.fixtures {
        load_fixtures(&store, path)?;
    }

    let table = build_table(&config, &registry)?;

    Ok(Application {
        config,
        store,
        registry,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_prepare_without_fixtures() {
        let config = parse_config(
            r#"
            [[resources]]
            name = "developer"
            path_segment = "developers"
            "#,
        )
        .unwrap();

        let app = prepare(config).unwrap();
        assert_eq!(app.table.len(), 4);
        assert_eq!(app.registry.len(), 1);
        assert_eq!(app.store.count("developers"), 0);
    }

    #[test]
    fn test_prepare_fails_on_missing_fixtures() {
        let mut config = ApiConfig::default();
        config.fixtures = Some("/nonexistent/fixtures.json".into());
        assert!(matches!(prepare(config), Err(StartupError::Store(_))));
    }
}
