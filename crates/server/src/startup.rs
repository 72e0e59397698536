use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use configs::{AppConfig, CorsConfig, ServerConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Configured origins with any method and header; no origins means the
/// permissive policy used for local development.
pub fn build_cors(cfg: &CorsConfig) -> Result<CorsLayer, StartupError> {
    if cfg.allowed_origins.is_empty() {
        warn!("no cors.allowed_origins configured; allowing every origin");
        return Ok(CorsLayer::very_permissive());
    }
    let origins = cfg
        .allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o.trim_end_matches('/'))
                .map_err(|e| StartupError::InvalidConfig(format!("cors origin {o:?}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

fn load_bind_addr(cfg: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.host, cfg.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("server address {}:{}: {e}", cfg.host, cfg.port)))
}

/// Connect and bring the schema up to date before any traffic is served.
pub async fn prepare_database(cfg: &configs::DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(cfg))
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    info!("database schema up to date");
    Ok(db)
}

/// Router with state and CORS, ready to serve.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = prepare_database(&cfg.database).await?;
    let cors = build_cors(&cfg.cors)?;
    Ok(routes::build_router(ServerState::from_db(db), cors))
}

/// Serve with an already loaded configuration.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = load_bind_addr(&cfg.server)?;
    info!(%addr, "starting hourstack server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origin_list_is_permissive() {
        assert!(build_cors(&CorsConfig::default()).is_ok());
    }

    #[test]
    fn listed_origins_are_accepted() {
        let cfg = CorsConfig {
            allowed_origins: vec!["https://hourstack.example.com/".into(), "http://localhost:5173".into()],
        };
        assert!(build_cors(&cfg).is_ok());
    }

    #[test]
    fn unprintable_origin_is_rejected() {
        let cfg = CorsConfig { allowed_origins: vec!["http://bad\norigin".into()] };
        assert!(matches!(build_cors(&cfg), Err(StartupError::InvalidConfig(_))));
    }

    #[test]
    fn bind_addr_from_server_config() {
        let cfg = ServerConfig { host: "0.0.0.0".into(), port: 5000, worker_threads: None };
        assert_eq!(load_bind_addr(&cfg).unwrap(), "0.0.0.0:5000".parse::<SocketAddr>().unwrap());

        let bad = ServerConfig { host: "not a host".into(), port: 5000, worker_threads: None };
        assert!(load_bind_addr(&bad).is_err());
    }

    #[tokio::test]
    async fn prepare_database_migrates_sqlite() {
        let mut cfg = configs::DatabaseConfig::default();
        cfg.url = "sqlite::memory:".into();
        cfg.max_connections = 1;
        cfg.min_connections = 1;
        let db = prepare_database(&cfg).await.unwrap();
        assert!(service::db::time_entry_service::list_time_entries(&db).await.unwrap().is_empty());
    }
}
