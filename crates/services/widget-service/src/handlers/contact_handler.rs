//! Widget sign-up form.

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use common::AppResult;
use web::ValidatedJson;

use crate::repository::ContactOutcome;
use crate::service::ContactRequest;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ContactOnlyRequest {
    #[validate(length(min = 1, max = 255, message = "widget_key is required"))]
    pub widget_key: String,
    #[validate(length(max = 255, message = "first_name is too long"))]
    pub first_name: Option<String>,
    #[validate(length(max = 255, message = "last_name is too long"))]
    pub last_name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// 201 for a new candidate, 200 when the address was already known.
pub async fn contact_only(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ContactOnlyRequest>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let outcome = state
        .widgets
        .contact_only(ContactRequest {
            widget_key: payload.widget_key,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email.trim().to_string(),
        })
        .await?;

    Ok(match outcome {
        ContactOutcome::Existing(id) => (StatusCode::OK, Json(json!({ "id": id }))),
        ContactOutcome::Created(id) => (StatusCode::CREATED, Json(json!({ "id": id }))),
    })
}
