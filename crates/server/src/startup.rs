use std::{path::Path, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use migration::MigratorTrait;
use service::todo::{
    repo::seaorm::SeaOrmTodoRepository,
    repository::{memory::InMemoryTodoRepository, TodoRepository},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

/// The React client is served from another origin.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Use `config.toml` (or `CONFIG_PATH`) when present, environment variables otherwise.
/// `.env` is read first so either path sees its values.
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(format!("{path}: {e}")))
    } else {
        info!(%path, "config file not found, using environment");
        AppConfig::from_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
    }
}

/// Pick the storage backend and wrap it in the shared state.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repo: Arc<dyn TodoRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory storage; items are lost on restart");
            Arc::new(InMemoryTodoRepository::new())
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            if cfg.database.run_migrations {
                migration::Migrator::up(&db, None)
                    .await
                    .map_err(|e| StartupError::Database(e.to_string()))?;
                info!("migrations applied");
            }
            Arc::new(SeaOrmTodoRepository::new(db))
        }
    };
    Ok(ServerState::new(repo))
}

pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let state = build_state(cfg).await?;
    Ok(routes::build_router(build_cors(), state))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by process kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app from an already loaded config and serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, backend = ?cfg.storage.backend, "todo server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test owns the process env for CONFIG_PATH and STORAGE
    #[test]
    fn env_config_honours_and_validates_storage() {
        std::env::set_var("CONFIG_PATH", "does-not-exist.toml");
        std::env::set_var("SERVER_PORT", "9191");

        std::env::set_var("STORAGE", "memory");
        let cfg = load_config().unwrap();
        assert_eq!(cfg.storage.backend, StorageBackend::Memory);
        assert_eq!(cfg.server.port, 9191);
        assert!(cfg.server.worker_threads.is_some());

        std::env::set_var("STORAGE", "floppy-disk");
        let err = load_config().unwrap_err();
        assert!(matches!(err, StartupError::InvalidConfig(ref m) if m.contains("floppy-disk")), "{err}");

        std::env::remove_var("STORAGE");
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("CONFIG_PATH");
    }
}
