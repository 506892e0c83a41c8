//! Candidate handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppResult, Paginated, PaginationParams};
use domain::{Candidate, CreateCandidate, UpdateCandidate};
use web::{CurrentUser, QueryParams};

use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

/// List candidates of the caller's domain
#[utoipa::path(
    get,
    path = "/api/candidates",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u64>, Query, description = "Page number, starting at 1"),
        ("per_page" = Option<u64>, Query, description = "Page size, at most 100"),
        ("q" = Option<String>, Query, description = "Case-insensitive name or email match")
    ),
    responses(
        (status = 200, description = "One page of candidates, newest first"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_candidates(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(search): QueryParams<SearchQuery>,
) -> AppResult<Json<Paginated<Candidate>>> {
    let search = search.q.filter(|q| !q.trim().is_empty());
    let page = state.candidates.list(current_user, search, params).await?;
    Ok(Json(page))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 200, description = "Candidate with emails and phones", body = Candidate),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Candidate belongs to another domain"),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn get_candidate(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Candidate>> {
    Ok(Json(state.candidates.get(current_user, id).await?))
}

/// Create a candidate owned by the caller
#[utoipa::path(
    post,
    path = "/api/candidates",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    request_body = CreateCandidate,
    responses(
        (status = 201, description = "Candidate created", body = CreatedResponse),
        (status = 400, description = "Invalid email, label or missing name"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Email already used by a candidate in this domain")
    )
)]
pub async fn create_candidate(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(data): Json<CreateCandidate>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let candidate = state.candidates.create(current_user, data).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: candidate.id })))
}

#[utoipa::path(
    patch,
    path = "/api/candidates/{id}",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Candidate ID")),
    request_body = UpdateCandidate,
    responses(
        (status = 200, description = "Updated candidate", body = Candidate),
        (status = 400, description = "Nothing to update"),
        (status = 403, description = "Candidate belongs to another domain"),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn update_candidate(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateCandidate>,
) -> AppResult<Json<Candidate>> {
    Ok(Json(state.candidates.update(current_user, id, data).await?))
}

/// Delete a candidate (owner or domain admin)
#[utoipa::path(
    delete,
    path = "/api/candidates/{id}",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Candidate ID")),
    responses(
        (status = 204, description = "Candidate deleted"),
        (status = 403, description = "Not the owner or an admin of this domain"),
        (status = 404, description = "Candidate not found")
    )
)]
pub async fn delete_candidate(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.candidates.delete(current_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
