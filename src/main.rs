//! Nested resource API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     config.toml ──▶ loader + validation ──▶ startup
//!                                               │
//!                          ┌────────────────────┼───────────────────┐
//!                          ▼                    ▼                   ▼
//!                     MemoryStore       HandlerRegistry      route compiler
//!                   (fixtures seeded)   (one per collection)  (RouteTable)
//!                                                                   │
//!     Client Request ──▶ http server ──▶ dispatch ──▶ resolve ◀─────┘
//!                                           │
//!                                           ▼
//!                               lookup chain → FilterSpec → handler
//! ```
//!
//! With `--watch`, edits to the config file rebuild the table and swap it in
//! without dropping connections.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use nested_resources::config::{load_config, ConfigWatcher};
use nested_resources::http::HttpServer;
use nested_resources::lifecycle::{prepare, Shutdown};
use nested_resources::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "nested-resources")]
#[command(about = "Serve a nested resource API described by a config file", long_about = None)]
struct Args {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "nested-resources.toml")]
    config: PathBuf,

    /// Reload routes when the config file changes.
    #[arg(short, long)]
    watch: bool,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    logging::init(&config.observability.log_level);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        "nested-resources starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let app = prepare(config)?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    // The watcher stops when its handle drops, so keep it for the whole run.
    let (_watcher, updates) = if args.watch {
        let (watcher, updates) = ConfigWatcher::new(&args.config);
        (Some(watcher.run()?), Some(updates))
    } else {
        (None, None)
    };

    let server = HttpServer::new(app);
    server.run(listener, updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
