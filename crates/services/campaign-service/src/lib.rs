//! Campaign Service Library
//!
//! Email, SMS and push campaigns for a domain. The HTTP side validates
//! and queues sends; the worker delivers them through the configured
//! providers.

pub mod config;
pub mod handlers;
pub mod jobs;
pub mod notifier;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod service;
pub mod state;

use std::sync::Arc;

use models::Database;
use web::{health_routes, AuthClient, BoxError, HealthState, TokenVerifier};

use crate::config::CampaignServiceConfig;
use crate::jobs::{connect_storage, DeliveryContext, PostgresQueue};
use crate::notifier::Notifiers;
use crate::repository::CampaignStore;
use crate::routes::create_router;
use crate::service::CampaignManager;
use crate::state::AppState;

/// Run the campaign API as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), BoxError> {
    let config = CampaignServiceConfig::from_env()?;
    run_server_with_config(host, port, config).await
}

async fn run_server_with_config(
    host: &str,
    port: u16,
    config: CampaignServiceConfig,
) -> Result<(), BoxError> {
    let db = Database::connect_without_migrations(&config.base.database_url).await?;
    let db_conn = db.get_connection();
    let storage = connect_storage(&config.base.database_url).await?;

    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(AuthClient::connect_lazy(&config.base.auth_service_url)?);
    let campaigns = Arc::new(CampaignManager::new(
        Arc::new(CampaignStore::new(db_conn.clone())),
        Arc::new(PostgresQueue::new(storage)),
    ));

    let router = create_router(AppState::new(campaigns, verifier)).merge(health_routes(
        HealthState {
            db: db_conn,
            cache: None,
        },
    ));

    web::serve(router, "Campaign service", host, port).await
}

/// Run the send worker until interrupted.
pub async fn run_worker() -> Result<(), BoxError> {
    let config = CampaignServiceConfig::from_env()?;
    let db = Database::connect_without_migrations(&config.base.database_url).await?;

    let ctx = DeliveryContext {
        campaigns: Arc::new(CampaignStore::new(db.get_connection())),
        notifiers: Notifiers::from_env()?,
    };
    jobs::run_worker(&config.base.database_url, ctx).await?;
    Ok(())
}
