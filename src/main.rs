mod accounts {
    pub mod keygen;
    pub mod manager;
    pub mod password;
}

mod core {
    pub mod config;
    pub mod error;
    pub mod extract;
    pub mod routes;
    pub mod state;
    pub mod tracing_init;
}

mod handlers {
    pub mod dashboard;
    pub mod fallback;
    pub mod health;
    pub mod login;
    pub mod orkut;
    pub mod protected;
    pub mod register;
    pub mod tiktok;
}

mod models {
    pub mod responses;
    pub mod user;
}

mod security {
    pub mod apikey_gate;
}

mod stores {
    pub mod user_store;
}

mod upstream {
    pub mod client;
}

mod utils {
    pub mod auth;
}

use crate::core::config::Config;
use crate::core::state::AppState;
use crate::stores::user_store::UserStore;
use crate::upstream::client::UpstreamClient;
use anyhow::{Context, Result};
use axum::serve;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from("config.toml")
    };

    // Load and validate configuration
    let config = Config::from_file(&config_path).context(format!(
        "Failed to load configuration from '{}'. \
        If this is your first run, copy config.example.toml to config.toml and adjust the values.",
        config_path.display()
    ))?;

    // Initialize tracing/logging
    core::tracing_init::init_tracing(&config.logging);

    // Build Tokio runtime with configured number of threads
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.num_threads)
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    runtime.block_on(async_main(config, config_path))
}

async fn async_main(config: Config, config_path: PathBuf) -> Result<()> {
    info!(
        config_path = %config_path.display(),
        port = config.server.port,
        num_threads = config.server.num_threads,
        database = %config.storage.database_path.display(),
        log_level = %config.logging.level,
        log_format = %config.logging.format,
        "keygate starting"
    );

    // Open the user store once; handlers receive this handle and never
    // touch the artifact path themselves.
    let store = UserStore::open(config.storage.database_path.clone())
        .context("Failed to open user store")?;

    let db = store.load().context("Failed to read user store")?;
    info!(users = db.users.len(), "user store loaded");

    let upstream =
        UpstreamClient::new(&config.upstream).context("Failed to create upstream client")?;

    let state = AppState::new(config.clone(), store, upstream);

    // Build the router with middleware
    let app = core::routes::build_router(Arc::new(state)).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
        ),
    );

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind TCP listener to {}", addr))?;

    info!(address = %addr, "keygate startup complete, listening");

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down gracefully");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
