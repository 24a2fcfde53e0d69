//! # Restaurant API
//!
//! gRPC server for the restaurant-and-catalog service.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Restaurant API Server                            │
//! │                                                                         │
//! │  Order / Admin ───► gRPC (50052) ───► Services ───► Domain ───► SQLite │
//! │  services                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use restaurant_api::config::ServiceConfig;
use restaurant_api::proto::{
    health_service_server::HealthServiceServer, product_service_server::ProductServiceServer,
    restaurant_auth_service_server::RestaurantAuthServiceServer,
    restaurant_service_server::RestaurantServiceServer,
};
use restaurant_api::services::{
    auth_service::RestaurantAuthServiceImpl, health_service::HealthServiceImpl,
    product_service::ProductServiceImpl, restaurant_service::RestaurantServiceImpl,
};
use restaurant_api::AppState;
use restaurant_db::{Database, DbConfig};
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Load configuration
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Restaurant API server...");
    info!(
        port = config.grpc_port,
        database = %config.database_path,
        env = %config.app_env,
        "Configuration loaded"
    );

    // Open database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("Failed to open database")?;
    info!("Database ready");

    // Create shared state
    let state = Arc::new(
        AppState::new(Arc::new(db.clone()), &config)
            .context("Failed to initialise credentials")?,
    );

    // Build gRPC services
    let auth_service = RestaurantAuthServiceServer::new(RestaurantAuthServiceImpl::new(state.clone()));
    let restaurant_service = RestaurantServiceServer::new(RestaurantServiceImpl::new(state.clone()));
    let product_service = ProductServiceServer::new(ProductServiceImpl::new(state.clone()));
    let health_service = HealthServiceServer::new(HealthServiceImpl::new(state.clone()));

    // Build server address
    let addr: SocketAddr = format!("0.0.0.0:{}", config.grpc_port).parse()?;
    info!(%addr, timeout_secs = config.request_timeout_secs, "Starting gRPC server");

    // Start server; an expired deadline drops the in-flight handler future
    Server::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .add_service(auth_service)
        .add_service(restaurant_service)
        .add_service(product_service)
        .add_service(health_service)
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
