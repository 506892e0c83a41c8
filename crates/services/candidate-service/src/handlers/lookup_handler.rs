//! Reference-table handlers.
//!
//! Each table is served as `{"<name>": [...]}` and kept in Redis for an
//! hour. A cache outage only costs a database read.

use std::future::Future;

use axum::{extract::State, response::Json};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use common::{AppError, AppResult};
use web::cache::DEFAULT_CACHE_TTL;

use crate::state::AppState;

fn cache_key(name: &str) -> String {
    format!("lookup:{}", name)
}

async fn cached<T, F, Fut>(state: &AppState, name: &str, load: F) -> AppResult<Json<Value>>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    let key = cache_key(name);

    if let Some(cache) = &state.cache {
        match cache.get::<Vec<T>>(&key).await {
            Ok(Some(rows)) => return Ok(Json(wrap(name, &rows)?)),
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Lookup cache read failed"),
        }
    }

    let rows = load().await?;

    if let Some(cache) = &state.cache {
        if let Err(e) = cache.set_with_ttl(&key, &rows, DEFAULT_CACHE_TTL).await {
            warn!(key = %key, error = %e, "Lookup cache write failed");
        }
    }

    Ok(Json(wrap(name, &rows)?))
}

fn wrap<T: Serialize>(name: &str, rows: &[T]) -> AppResult<Value> {
    let rows = serde_json::to_value(rows)
        .map_err(|e| AppError::internal(format!("Lookup serialization: {}", e)))?;
    let mut body = Map::new();
    body.insert(name.to_string(), rows);
    Ok(Value::Object(body))
}

#[utoipa::path(
    get,
    path = "/social_networks",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"social_networks\": [...]}`"))
)]
pub async fn social_networks(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "social_networks", || state.lookups.social_networks()).await
}

#[utoipa::path(
    get,
    path = "/countries",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"countries\": [...]}`"))
)]
pub async fn countries(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "countries", || state.lookups.countries()).await
}

#[utoipa::path(
    get,
    path = "/email_labels",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"email_labels\": [...]}`"))
)]
pub async fn email_labels(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "email_labels", || state.lookups.email_labels()).await
}

#[utoipa::path(
    get,
    path = "/phone_labels",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"phone_labels\": [...]}`"))
)]
pub async fn phone_labels(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "phone_labels", || state.lookups.phone_labels()).await
}

#[utoipa::path(
    get,
    path = "/rating_tags",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"rating_tags\": [...]}`"))
)]
pub async fn rating_tags(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "rating_tags", || state.lookups.rating_tags()).await
}

#[utoipa::path(
    get,
    path = "/languages",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"languages\": [...]}`"))
)]
pub async fn languages(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "languages", || state.lookups.languages()).await
}

#[utoipa::path(
    get,
    path = "/universities",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"universities\": [...]}`"))
)]
pub async fn universities(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "universities", || state.lookups.universities()).await
}

#[utoipa::path(
    get,
    path = "/organizations",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"organizations\": [...]}`"))
)]
pub async fn organizations(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "organizations", || state.lookups.organizations()).await
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "Lookups",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "`{\"products\": [...]}`"))
)]
pub async fn products(State(state): State<AppState>) -> AppResult<Json<Value>> {
    cached(&state, "products", || state.lookups.products()).await
}
