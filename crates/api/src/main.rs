use std::net::SocketAddr;

use axum::Router;
use risuspubl_core::store::memory::MemoryStore;
use risuspubl_db::PgStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use risuspubl_api::config::ServerConfig;
use risuspubl_api::router::build_app_router;
use risuspubl_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "risuspubl_api=debug,risuspubl_core=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let app = match config.database_url.clone() {
        Some(database_url) => {
            let pool = risuspubl_db::create_pool(&database_url, config.db_max_connections).await?;
            tracing::info!("Database connection pool created");

            risuspubl_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            risuspubl_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            build_app_router(AppState::new(PgStore::new(pool), config.clone()))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, keeping data in memory");
            build_app_router(AppState::new(MemoryStore::new(), config.clone()))
        }
    };

    serve(app, &config).await
}

async fn serve(app: Router, config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
