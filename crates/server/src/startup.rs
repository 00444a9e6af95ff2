use std::{net::SocketAddr, path::PathBuf};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, ServerConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use models::{Car, Motorcycle};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::controller::{car_controller, motorcycle_controller};
use crate::errors::StartupError;
use crate::routes;
use service::{
    runtime::{self, Backend},
    services::{car_service, motorcycle_service},
};

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_from_env();
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address {}:{}: {e}", server.host, server.port)))
}

/// Open the configured backend; postgres is migrated before use.
pub async fn open_backend(cfg: &AppConfig) -> Result<Backend, StartupError> {
    match cfg.storage.backend {
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Runtime(format!("database connection failed: {e}")))?;
            migration::Migrator::up(&db, None)
                .await
                .map_err(|e| StartupError::Runtime(format!("migrations failed: {e}")))?;
            Ok(Backend::Postgres(db))
        }
        StorageBackend::File => {
            runtime::ensure_env(&cfg.storage.data_dir).await?;
            Ok(Backend::File(PathBuf::from(&cfg.storage.data_dir)))
        }
        StorageBackend::Memory => {
            warn!("memory backend selected; documents are lost on shutdown");
            Ok(Backend::Memory)
        }
    }
}

/// Wire stores, services and controllers of both collections into a router
pub async fn build_app(backend: &Backend) -> Result<Router, StartupError> {
    let cars = car_service(backend.open::<Car>().await?);
    let motorcycles = motorcycle_service(backend.open::<Motorcycle>().await?);
    Ok(routes::build_router(car_controller(cars), motorcycle_controller(motorcycles), build_cors()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let backend = open_backend(&cfg).await?;
    let app = build_app(&backend).await?;

    // Bind and serve
    let addr = bind_addr(&cfg.server)?;
    info!(%addr, backend = backend.name(), "starting vehicle shop server");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}
