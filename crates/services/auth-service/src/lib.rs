//! Auth Service Library
//!
//! Issues and revokes OAuth2 bearer tokens over HTTP, manages users of a
//! domain, and answers token verification for the other services over gRPC.

pub mod config;
pub mod grpc;
pub mod http;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use models::Database;
use web::{health_routes, BoxError, Cache, HealthState, RateLimit};

use crate::config::AuthServiceConfig;
use crate::grpc::AuthGrpcService;
use crate::http::{create_router, AppState};
use crate::repository::{ClientStore, TokenStore, UserStore};
use crate::service::{AuthService, Authenticator, UserManager, UserService};

/// Run the auth service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16, grpc_port: u16) -> Result<(), BoxError> {
    let config = AuthServiceConfig::from_env()?;
    run_server_with_config(host, port, grpc_port, config).await
}

/// Serve HTTP and gRPC side by side; either failing stops both.
async fn run_server_with_config(
    host: &str,
    port: u16,
    grpc_port: u16,
    config: AuthServiceConfig,
) -> Result<(), BoxError> {
    // The accounts schema lives here, so this service applies migrations
    let db = Database::connect(&config.base.database_url).await?;
    let db_conn = db.get_connection();
    let cache = Arc::new(Cache::connect(&config.base.redis_url).await?);

    let auth: Arc<dyn AuthService> = Arc::new(Authenticator::new(
        Arc::new(UserStore::new(db_conn.clone())),
        Arc::new(ClientStore::new(db_conn.clone())),
        Arc::new(TokenStore::new(db_conn.clone())),
        config.base.secret_key.clone(),
    ));
    let users: Arc<dyn UserService> = Arc::new(UserManager::new(Arc::new(UserStore::new(
        db_conn.clone(),
    ))));

    let token_rate_limit = RateLimit::new(
        cache.clone(),
        config.token_rate_limit_requests,
        config.token_rate_limit_window_seconds,
    );
    let state = AppState::new(auth.clone(), users, Some(token_rate_limit));
    let router = create_router(state).merge(health_routes(HealthState {
        db: db_conn,
        cache: Some(cache),
    }));

    let grpc_addr: SocketAddr = format!("{}:{}", host, grpc_port).parse()?;
    let grpc = async move {
        info!("Auth service gRPC listening on {}", grpc_addr);
        Server::builder()
            .add_service(proto::AuthServiceServer::new(AuthGrpcService::new(auth)))
            .serve(grpc_addr)
            .await
            .map_err(BoxError::from)
    };

    tokio::try_join!(web::serve(router, "Auth service", host, port), grpc)?;
    Ok(())
}
