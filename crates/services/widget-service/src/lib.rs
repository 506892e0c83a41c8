//! Widget Service Library
//!
//! Public endpoints embedded on customer sites: the announcement banner,
//! the sign-up form and per-widget job listings.

pub mod config;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use models::Database;
use web::{health_routes, AuthClient, BoxError, Cache, HealthState, RateLimit, TokenVerifier};

use crate::config::WidgetServiceConfig;
use crate::repository::WidgetStore;
use crate::routes::create_router;
use crate::service::WidgetManager;
use crate::state::AppState;

/// Run the widget service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let config = WidgetServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

async fn run_server_with_config(
    host: &str,
    port: u16,
    config: WidgetServiceConfig,
) -> Result<(), BoxError> {
    let db = Database::connect_without_migrations(&config.base.database_url).await?;
    let db_conn = db.get_connection();
    let cache = Arc::new(Cache::connect(&config.base.redis_url).await?);

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(AuthClient::connect_lazy(&config.base.auth_service_url)?);

    let contact_rate_limit = RateLimit::new(
        cache.clone(),
        config.contact_rate_limit_requests,
        config.contact_rate_limit_window_seconds,
    );
    let state = AppState::new(
        Arc::new(WidgetManager::new(Arc::new(WidgetStore::new(
            db_conn.clone(),
        )))),
        verifier,
        Some(contact_rate_limit),
    );
    let router = create_router(state).merge(health_routes(HealthState {
        db: db_conn,
        cache: Some(cache),
    }));

    web::serve(router, "Widget service", host, port).await
}
