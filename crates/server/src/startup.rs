use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend, StorageConfig};
use service::student::{
    repo::{InMemoryStudentRepository, JsonFileStudentRepository},
    StudentRepository,
};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the repository backend named in the storage config.
pub async fn build_repository(cfg: &StorageConfig) -> Result<Arc<dyn StudentRepository>, StartupError> {
    match cfg.backend {
        StorageBackend::Memory => {
            info!(backend = "memory", "student repository ready");
            Ok(Arc::new(InMemoryStudentRepository::new()))
        }
        StorageBackend::Json => {
            common::env::ensure_data_dir(&cfg.path).await?;
            let repo = JsonFileStudentRepository::open(&cfg.path).await?;
            info!(backend = "json", path = %cfg.path, "student repository ready");
            Ok(Arc::new(repo))
        }
    }
}

/// Router wired to the configured backend
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let repo = build_repository(&cfg.storage).await?;
    Ok(routes::build_router(AppState::new(repo), build_cors()))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "student registry listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn json_backend_creates_data_file() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("registry_{}", uuid::Uuid::new_v4()));
        let path = dir.join("students.json");
        let cfg = StorageConfig { backend: StorageBackend::Json, path: path.to_string_lossy().into_owned() };

        let repo = build_repository(&cfg).await?;
        assert!(repo.find_all().await?.is_empty());
        assert!(tokio::fs::metadata(&path).await.is_ok());

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }

    #[test]
    fn bad_host_is_invalid_config() {
        let mut cfg = AppConfig::default();
        cfg.server.host = "not a host".into();
        assert!(matches!(bind_addr(&cfg), Err(StartupError::InvalidConfig(_))));
    }
}
