//! # hivekeepd: the hivekeep daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`hivekeep.toml` plus `HIVEKEEP_*` env vars)
//! - Install the `tracing` subscriber
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct one store per record kind and inject them into the services
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use hivekeep_adapter_http_axum::state::AppState;
use hivekeep_adapter_storage_sqlite_sqlx::{
    Config as DatabaseConfig, SqliteHiveSectionStore, SqliteHiveStore,
    SqliteProductCategoryStore, SqliteProductStore,
};
use hivekeep_app::ports::StaticUser;
use hivekeep_domain::id::UserId;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = DatabaseConfig {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    // Stores
    let hives = SqliteHiveStore::new(pool.clone());
    let sections = SqliteHiveSectionStore::new(pool.clone());
    let categories = SqliteProductCategoryStore::new(pool.clone());
    let products = SqliteProductStore::new(pool);

    // HTTP
    let user = StaticUser(UserId::new(config.audit.user_id));
    let state = AppState::new(hives, sections, categories, products, user);
    let app = hivekeep_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(address = %bind_addr, user_id = config.audit.user_id, "hivekeepd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hivekeepd stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "unable to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "unable to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
