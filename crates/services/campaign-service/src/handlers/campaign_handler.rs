//! Campaign handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use common::{AppResult, Paginated, PaginationParams};
use domain::{Campaign, CampaignSend};
use web::{CurrentUser, QueryParams};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub candidate_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct SendAccepted {
    pub queued: usize,
}

/// Body is checked against the channel's JSON Schema by the service
pub async fn create_campaign(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    let campaign = state.campaigns.create(current_user, payload).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

pub async fn list_campaigns(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
) -> AppResult<Json<Paginated<Campaign>>> {
    Ok(Json(state.campaigns.list(current_user, params).await?))
}

pub async fn get_campaign(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Campaign>> {
    Ok(Json(state.campaigns.get(current_user, id).await?))
}

pub async fn send_campaign(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendRequest>,
) -> AppResult<(StatusCode, Json<SendAccepted>)> {
    let queued = state
        .campaigns
        .send(current_user, id, req.candidate_ids)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(SendAccepted { queued })))
}

pub async fn list_sends(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Vec<CampaignSend>>> {
    Ok(Json(state.campaigns.sends(current_user, id).await?))
}
