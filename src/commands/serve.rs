//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, InMemoryRateLimiter, Persistence, RateLimiter, RedisRateLimiter};
use crate::services::Services;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    tracing::info!("Starting server...");

    let db = Database::connect(&config).await?;
    let rate_limiter = rate_limiter(&config).await?;

    let services = Services::from_unit_of_work(
        Arc::new(Persistence::new(db.get_connection())),
        config.clone(),
    );
    let addr = config.server_addr();
    let app = create_router(AppState::new(&services, rate_limiter, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Redis when configured, the in-process counter otherwise
async fn rate_limiter(config: &Config) -> AppResult<Arc<dyn RateLimiter>> {
    match &config.redis_url {
        Some(url) => {
            let limiter = RedisRateLimiter::connect(url)
                .await
                .map_err(|e| AppError::internal(format!("Redis connection failed: {}", e)))?;
            Ok(Arc::new(limiter))
        }
        None => {
            tracing::info!("REDIS_URL not set, rate limiting in process memory");
            Ok(Arc::new(InMemoryRateLimiter::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
