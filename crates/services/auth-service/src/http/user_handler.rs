//! User handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use validator::Validate;

use common::AppResult;
use domain::UserResponse;
use web::{require_admin, CurrentUser, ValidatedJson};

use super::state::AppState;
use crate::service::CreateUser;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    #[validate(length(max = 255, message = "first_name is too long"))]
    #[serde(default)]
    pub first_name: String,
    #[validate(length(max = 255, message = "last_name is too long"))]
    #[serde(default)]
    pub last_name: String,
    pub role: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.role,
        }
    }
}

/// `GET /v1/users/me`
pub async fn get_current_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = state.users.get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// `GET /v1/users`: every user of the caller's domain.
pub async fn list_users(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list_domain_users(current_user.domain_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// `POST /v1/users` (admin only)
pub async fn create_user(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    require_admin(&current_user)?;

    let user = state
        .users
        .create_user(current_user.domain_id, current_user.id, request.into())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
