//! # PartsDesk Server
//!
//! HTTP JSON API for the shop's back office.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Server Startup                                   │
//! │                                                                         │
//! │  .env (optional) ─► ServerConfig::load() ─► tracing                     │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                    Database::new (migrations) or MemoryStore::new      │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                    ensure default login ─► serve :PORT until signal    │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                                           store.close()                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use partsdesk_db::{Database, MemoryStore, Store};
use partsdesk_server::{app, AppState, ServerConfig, StoreBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside development
    let dotenv = dotenvy::dotenv();

    let config = ServerConfig::load().context("Failed to load configuration")?;
    init_tracing(config.log_json);

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "Loaded .env");
    }

    info!(
        port = config.port,
        store = ?config.store,
        policy = %config.stock_policy,
        "Configuration loaded"
    );

    let store: Arc<dyn Store> = match config.store {
        StoreBackend::Sqlite => {
            let db = Database::new(config.db_config())
                .await
                .context("Failed to open database")?;
            info!(path = %config.db_path.display(), "Database ready");
            Arc::new(db)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; nothing will be persisted");
            Arc::new(MemoryStore::new())
        }
    };

    let state = AppState::new(store.clone(), config.stock_policy, &config.admin_user);
    state
        .credentials
        .ensure_default(&config.admin_password)
        .await
        .context("Failed to create default login")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "PartsDesk server listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    store.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug logs
/// - `RUST_LOG=partsdesk=trace` - Show trace for partsdesk crates only
/// - Default: `info,partsdesk=debug,sqlx=warn`
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,partsdesk=debug,sqlx=warn,tower_http=debug"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
