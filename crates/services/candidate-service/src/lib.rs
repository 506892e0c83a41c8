//! Candidate Service Library
//!
//! Candidate CRUD scoped to the caller's domain, plus the cached
//! reference tables (countries, labels, languages and so on).

pub mod config;
pub mod handlers;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use tracing::warn;

use models::Database;
use web::{health_routes, AuthClient, BoxError, Cache, HealthState, TokenVerifier};

use crate::config::CandidateServiceConfig;
use crate::repository::{CandidateStore, LookupStore};
use crate::routes::create_router;
use crate::service::CandidateManager;
use crate::state::AppState;

/// Run the candidate service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let config = CandidateServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

async fn run_server_with_config(
    host: &str,
    port: u16,
    config: CandidateServiceConfig,
) -> Result<(), BoxError> {
    let db = Database::connect_without_migrations(&config.base.database_url).await?;
    let db_conn = db.get_connection();

    // Lookups fall back to the database when Redis is down
    let cache = match Cache::connect(&config.base.redis_url).await {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            warn!("Redis unavailable, lookup caching disabled: {}", e);
            None
        }
    };

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(AuthClient::connect_lazy(&config.base.auth_service_url)?);

    let state = AppState::new(
        Arc::new(CandidateManager::new(Arc::new(CandidateStore::new(
            db_conn.clone(),
        )))),
        Arc::new(LookupStore::new(db_conn.clone())),
        verifier,
        cache.clone(),
    );
    let router = create_router(state).merge(health_routes(HealthState {
        db: db_conn,
        cache,
    }));

    web::serve(router, "Candidate service", host, port).await
}
