//! Banner handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::Banner;
use web::{CurrentUser, ValidatedJson};

use crate::repository::NewBanner;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "text is required"))]
    pub text: String,
    #[validate(url(message = "link must be a URL"))]
    pub link: Option<String>,
    #[validate(length(max = 50, message = "style is too long"))]
    pub style: Option<String>,
}

/// Newest active banner, or null.
pub async fn active_banner(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let banner = state.widgets.active_banner().await?;
    Ok(Json(json!({ "banner": banner })))
}

pub async fn create_banner(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBannerRequest>,
) -> AppResult<(StatusCode, Json<Banner>)> {
    let banner = state
        .widgets
        .create_banner(
            current_user,
            NewBanner {
                title: payload.title,
                text: payload.text,
                link: payload.link,
                style: payload.style,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(banner)))
}

pub async fn deactivate_banner(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.widgets.deactivate_banner(current_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
