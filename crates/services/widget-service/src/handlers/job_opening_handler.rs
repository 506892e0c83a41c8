use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use common::AppResult;

use crate::state::AppState;

pub async fn widget_job_openings(
    State(state): State<AppState>,
    Path(widget_key): Path<String>,
) -> AppResult<Json<Value>> {
    let openings = state.widgets.job_openings(widget_key).await?;
    Ok(Json(json!({ "job_openings": openings })))
}
