//! Activity handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::ActivityResponse;
use web::{CurrentUser, QueryParams, ValidatedJson};

use crate::repository::TimeRange;
use crate::service::{AggregatedActivity, NewActivity};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
}

impl RangeQuery {
    fn into_range(self) -> AppResult<TimeRange> {
        Ok(TimeRange {
            start: self
                .start_datetime
                .as_deref()
                .map(|s| parse_datetime("start_datetime", s))
                .transpose()?,
            end: self
                .end_datetime
                .as_deref()
                .map(|s| parse_datetime("end_datetime", s))
                .transpose()?,
        })
    }
}

/// RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS` taken as UTC.
pub fn parse_datetime(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::bad_request(format!("Invalid {}: {}", field, value)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActivityRequest {
    #[serde(rename = "type")]
    pub activity_type: i32,
    #[validate(length(min = 1, max = 64, message = "source_table is required"))]
    pub source_table: String,
    pub source_id: Option<Uuid>,
    #[serde(default)]
    pub params: Value,
}

pub async fn list_activities(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    QueryParams(params): QueryParams<PaginationParams>,
    QueryParams(range): QueryParams<RangeQuery>,
) -> AppResult<Json<Paginated<ActivityResponse>>> {
    let range = range.into_range()?;
    Ok(Json(
        state.activities.list(current_user, range, params).await?,
    ))
}

/// Timeline with runs of similar activities collapsed
pub async fn aggregate_activities(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    QueryParams(range): QueryParams<RangeQuery>,
) -> AppResult<Json<Vec<AggregatedActivity>>> {
    let range = range.into_range()?;
    Ok(Json(state.activities.aggregate(current_user, range).await?))
}

pub async fn create_activity(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<ActivityResponse>)> {
    let activity = state
        .activities
        .create(
            current_user,
            NewActivity {
                activity_type: req.activity_type,
                source_table: req.source_table,
                source_id: req.source_id,
                params: req.params,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_formats() {
        let expected = "2024-05-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(parse_datetime("t", "2024-05-01T12:30:00Z").unwrap(), expected);
        assert_eq!(parse_datetime("t", "2024-05-01T14:30:00+02:00").unwrap(), expected);
        assert_eq!(parse_datetime("t", "2024-05-01T12:30:00").unwrap(), expected);
        assert_eq!(parse_datetime("t", "2024-05-01 12:30:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("start_datetime", "yesterday").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert_eq!(err.user_message(), "Invalid start_datetime: yesterday");
    }
}
