//! Server binary: load config, open the shared database connection, serve until signalled.

use artisan_gateway::{app, AppState, Config, PgArtisanStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("artisan_gateway=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // No degraded mode: without a database the process exits for the supervisor to restart.
    let store = match PgArtisanStore::connect(&config.db).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "database connection failed");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = config.db.host.as_deref().unwrap_or("default"),
        database = config.db.database.as_deref().unwrap_or("default"),
        "connected to PostgreSQL"
    );

    let router = app(AppState::new(store.clone()), config.body_limit);
    let listener = TcpListener::bind(config.listen_addr()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped, closing database connection");
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().await?,
        Err(_) => tracing::warn!("database connection still shared at shutdown; dropping it"),
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
