//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all dispatch route
//! - Wire up middleware (request ID, timeout, tracing)
//! - Hold the live route table and swap it on reload
//! - Serve until shutdown is broadcast

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{routing::any, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{build_table, validate_config, ApiConfig, ServerConfig, ValidationError};
use crate::http::dispatch::dispatch;
use crate::lifecycle::Application;
use crate::observability::metrics;
use crate::resource::ConfigurationError;
use crate::routing::RouteTable;
use crate::store::{collection_handlers, declare_relations, MemoryStore};

/// Why a reloaded config was not applied.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error("invalid config: {}", join(.0))]
    Invalid(Vec<ValidationError>),

    #[error(transparent)]
    Routes(#[from] ConfigurationError),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ArcSwap<RouteTable>>,
}

/// HTTP server for the compiled resource API.
pub struct HttpServer {
    router: Router,
    config: ApiConfig,
    table: Arc<ArcSwap<RouteTable>>,
    store: Arc<MemoryStore>,
}

impl HttpServer {
    /// Create a server around a prepared application.
    pub fn new(app: Application) -> Self {
        metrics::record_table_size(app.table.len());
        let table = Arc::new(ArcSwap::from_pointee(app.table));
        let state = AppState {
            table: table.clone(),
        };
        let router = Self::build_router(&app.config.server, state);

        Self {
            router,
            config: app.config,
            table,
            store: app.store,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(dispatch))
            .route("/{*path}", any(dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving the server without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The table requests are currently dispatched against.
    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Rebuild the table from `config` and swap it in. On error the current
    /// table and the store's relations stay as they were.
    ///
    /// Collections and relations the new resources need are added to the
    /// store once the table is built; existing records are kept. Server
    /// settings are not reloaded.
    pub fn reload(&self, config: &ApiConfig) -> Result<usize, ReloadError> {
        let table = match self.prepare_reload(config) {
            Ok(table) => table,
            Err(error) => {
                metrics::record_reload("rejected");
                return Err(error);
            }
        };

        declare_relations(&self.store, &config.resources);
        let routes = table.len();
        self.table.store(Arc::new(table));
        metrics::record_reload("applied");
        metrics::record_table_size(routes);
        tracing::info!(routes, "Route table swapped");
        Ok(routes)
    }

    fn prepare_reload(&self, config: &ApiConfig) -> Result<RouteTable, ReloadError> {
        validate_config(config).map_err(ReloadError::Invalid)?;
        let registry = collection_handlers(&self.store, &config.resources);
        Ok(build_table(config, &registry)?)
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Configs arriving on `updates` are applied with [`HttpServer::reload`].
    pub async fn run(
        self,
        listener: TcpListener,
        updates: Option<mpsc::UnboundedReceiver<ApiConfig>>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, routes = self.table.load().len(), "HTTP server starting");

        let app = self.router();
        let server = Arc::new(self);

        let reloader = updates.map(|mut updates| {
            let server = server.clone();
            tokio::spawn(async move {
                while let Some(config) = updates.recv().await {
                    if let Err(error) = server.reload(&config) {
                        tracing::error!(%error, "Reload rejected, keeping current routes");
                    }
                }
            })
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        if let Some(reloader) = reloader {
            reloader.abort();
        }
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
