use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use service::auth::{AuthConfig, FirebaseIdentityVerifier, IdentityVerifier, SessionTokens, StaticIdentityVerifier};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Identity verifier for this environment; without an API key every login is rejected.
pub fn build_verifier(cfg: &AppConfig) -> Result<Arc<dyn IdentityVerifier>, StartupError> {
    match cfg.identity.api_key.as_deref() {
        Some(key) => {
            let v = FirebaseIdentityVerifier::new(cfg.identity.endpoint.clone(), key)
                .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
            Ok(Arc::new(v))
        }
        None if cfg.is_production() => Err(StartupError::InvalidConfig(
            "identity.api_key (FIREBASE_API_KEY) is required in production".into(),
        )),
        None => {
            warn!("FIREBASE_API_KEY not set; logins will be rejected");
            Ok(Arc::new(StaticIdentityVerifier::new()))
        }
    }
}

pub fn build_state(db: sea_orm::DatabaseConnection, cfg: &AppConfig, verifier: Arc<dyn IdentityVerifier>) -> ServerState {
    let tokens = SessionTokens::new(&cfg.auth.jwt_secret, cfg.token_ttl());
    let auth_cfg = AuthConfig {
        admin_emails: cfg.auth.admin_emails.iter().map(|e| e.trim().to_lowercase()).collect(),
    };
    ServerState::new(db, verifier, tokens, auth_cfg)
}

async fn shutdown_signal() {
    // 收到 Ctrl+C 后停止接收新连接，等待在途请求完成
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}

/// Public entry: connect, migrate, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await.map_err(anyhow::Error::from)?;
    info!("database migrations applied");

    let verifier = build_verifier(&cfg)?;
    let state = build_state(db, &cfg, verifier);
    let app: Router = routes::build_router(state, build_cors());

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, environment = %cfg.environment, "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
