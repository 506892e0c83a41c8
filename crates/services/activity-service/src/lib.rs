//! Activity Service Library
//!
//! Read side of the activity timeline: paginated listing, aggregated
//! timelines and manual entries, all scoped to the caller's domain.

pub mod config;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use models::Database;
use web::{health_routes, AuthClient, BoxError, HealthState, TokenVerifier};

use crate::config::ActivityServiceConfig;
use crate::repository::ActivityStore;
use crate::routes::create_router;
use crate::service::ActivityManager;
use crate::state::AppState;

/// Run the activity service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let config = ActivityServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

async fn run_server_with_config(
    host: &str,
    port: u16,
    config: ActivityServiceConfig,
) -> Result<(), BoxError> {
    let db = Database::connect_without_migrations(&config.base.database_url).await?;
    let db_conn = db.get_connection();

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(AuthClient::connect_lazy(&config.base.auth_service_url)?);
    let activities = Arc::new(ActivityManager::new(Arc::new(ActivityStore::new(
        db_conn.clone(),
    ))));

    let router = create_router(AppState::new(activities, verifier)).merge(health_routes(
        HealthState {
            db: db_conn,
            cache: None,
        },
    ));

    web::serve(router, "Activity service", host, port).await
}
