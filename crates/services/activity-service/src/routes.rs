//! Route configuration.

use axum::{middleware, routing::get, Router};

use web::auth_middleware;

use crate::handlers::activity_handler::{aggregate_activities, create_activity, list_activities};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/activities", get(list_activities).post(create_activity))
        .route("/v1/activities/aggregate", get(aggregate_activities))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use chrono::{DateTime, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::repository::TimeRange;
    use crate::service::{AggregatedActivity, MockActivityService};
    use common::{AppError, Paginated};
    use domain::{ActivityResponse, ActivityType};
    use web::{Claims, MockTokenVerifier};

    fn app(activities: MockActivityService) -> Router {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().returning(|token| {
            Ok((token == "good").then(|| Claims {
                user_id: Uuid::new_v4(),
                email: "ada@example.com".to_string(),
                role: "user".to_string(),
                domain_id: Uuid::new_v4(),
            }))
        });
        create_router(AppState::new(Arc::new(activities), Arc::new(verifier)))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer good")
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_datetime_is_400() {
        let mut activities = MockActivityService::new();
        activities.expect_list().never();

        let response = app(activities)
            .oneshot(get("/v1/activities?start_datetime=not-a-date"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_page_is_json_400() {
        let mut activities = MockActivityService::new();
        activities.expect_list().never();

        let response = app(activities)
            .oneshot(get("/v1/activities?page=abc"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_list_passes_range() {
        let start = "2024-05-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut activities = MockActivityService::new();
        activities
            .expect_list()
            .withf(move |_, range, _| {
                *range
                    == TimeRange {
                        start: Some(start),
                        end: None,
                    }
            })
            .returning(|_, _, params| {
                let row = ActivityResponse {
                    id: Uuid::new_v4(),
                    user_id: Uuid::new_v4(),
                    activity_type: ActivityType::CandidateUpdate,
                    source_table: "candidates".to_string(),
                    source_id: None,
                    params: json!({}),
                    added_time: Utc::now(),
                    readable_text: "Ada updated candidate Grace".to_string(),
                };
                Ok(Paginated::new(vec![row], &params, 1))
            });

        let response = app(activities)
            .oneshot(get("/v1/activities?start_datetime=2024-05-01T00:00:00Z"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"][0]["type"], 2);
        assert_eq!(body["data"][0]["readable_text"], "Ada updated candidate Grace");
    }

    #[tokio::test]
    async fn test_aggregate_shape() {
        let mut activities = MockActivityService::new();
        activities.expect_aggregate().returning(|_, _| {
            let now = Utc::now();
            Ok(vec![AggregatedActivity {
                activity_type: ActivityType::CandidateCreateWeb,
                user_id: Uuid::new_v4(),
                count: 3,
                readable_text: "Ada added 3 candidates".to_string(),
                start_time: now,
                end_time: now,
            }])
        });

        let response = app(activities)
            .oneshot(get("/v1/activities/aggregate"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["type"], 1);
        assert_eq!(body[0]["count"], 3);
    }

    #[tokio::test]
    async fn test_create_unknown_type_is_400() {
        let mut activities = MockActivityService::new();
        activities
            .expect_create()
            .returning(|_, _| Err(AppError::bad_request("Unknown activity type: 999")));

        let response = app(activities)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/activities")
                    .header(header::AUTHORIZATION, "Bearer good")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({"type": 999, "source_table": "candidates"}).to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_requires_auth() {
        let response = app(MockActivityService::new())
            .oneshot(
                Request::builder()
                    .uri("/v1/activities")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
