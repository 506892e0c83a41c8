//! Route configuration.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use web::{auth_middleware, rate_limit_middleware};

use crate::handlers::banner_handler::{active_banner, create_banner, deactivate_banner};
use crate::handlers::contact_handler::contact_only;
use crate::handlers::job_opening_handler::widget_job_openings;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let authenticated = middleware::from_fn_with_state(state.verifier.clone(), auth_middleware);

    let mut contact_routes = Router::new().route("/contact_only", post(contact_only));
    if let Some(limit) = state.contact_rate_limit.clone() {
        contact_routes =
            contact_routes.route_layer(middleware::from_fn_with_state(limit, rate_limit_middleware));
    }

    Router::new()
        .route(
            "/banners",
            get(active_banner).merge(post(create_banner).route_layer(authenticated.clone())),
        )
        .route(
            "/banners/:id",
            delete(deactivate_banner).route_layer(authenticated),
        )
        .route("/widgets/:widget_key/job_openings", get(widget_job_openings))
        .merge(contact_routes)
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
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::repository::ContactOutcome;
    use crate::service::MockWidgetService;
    use common::AppError;
    use domain::Banner;
    use web::{Claims, MockTokenVerifier};

    fn verifier() -> MockTokenVerifier {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().returning(|token| {
            Ok((token == "good").then(|| Claims {
                user_id: Uuid::new_v4(),
                email: "admin@example.com".to_string(),
                role: "admin".to_string(),
                domain_id: Uuid::new_v4(),
            }))
        });
        verifier
    }

    fn app(widgets: MockWidgetService) -> Router {
        create_router(AppState::new(Arc::new(widgets), Arc::new(verifier()), None))
    }

    fn banner() -> Banner {
        Banner {
            id: Uuid::new_v4(),
            title: "Maintenance".to_string(),
            text: "Back at 6am".to_string(),
            link: None,
            style: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_banner_is_public() {
        let mut widgets = MockWidgetService::new();
        widgets.expect_active_banner().returning(|| Ok(Some(banner())));

        let response = app(widgets)
            .oneshot(Request::builder().uri("/banners").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["banner"]["title"], "Maintenance");
    }

    #[tokio::test]
    async fn test_no_active_banner_is_null() {
        let mut widgets = MockWidgetService::new();
        widgets.expect_active_banner().returning(|| Ok(None));

        let response = app(widgets)
            .oneshot(Request::builder().uri("/banners").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_json(response).await["banner"].is_null());
    }

    #[tokio::test]
    async fn test_create_banner_requires_token() {
        let mut widgets = MockWidgetService::new();
        widgets.expect_create_banner().never();

        let body = json!({"title": "Hi", "text": "there"});
        let response = app(widgets)
            .oneshot(json_request("POST", "/banners", body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_banner() {
        let mut widgets = MockWidgetService::new();
        widgets
            .expect_create_banner()
            .withf(|_, data| data.title == "Maintenance")
            .returning(|_, _| Ok(banner()));

        let body = json!({"title": "Maintenance", "text": "Back at 6am"});
        let response = app(widgets)
            .oneshot(json_request("POST", "/banners", body, Some("good")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_deactivate_missing_banner_is_404() {
        let mut widgets = MockWidgetService::new();
        widgets
            .expect_deactivate_banner()
            .returning(|_, _| Err(AppError::NotFound));

        let uri = format!("/banners/{}", Uuid::new_v4());
        let response = app(widgets)
            .oneshot(json_request("DELETE", &uri, json!({}), Some("good")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_contact_new_candidate_is_201() {
        let id = Uuid::new_v4();
        let mut widgets = MockWidgetService::new();
        widgets
            .expect_contact_only()
            .withf(|request| request.widget_key == "careers" && request.email == "grace@navy.mil")
            .returning(move |_| Ok(ContactOutcome::Created(id)));

        let body = json!({
            "widget_key": "careers",
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@navy.mil"
        });
        let response = app(widgets)
            .oneshot(json_request("POST", "/contact_only", body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], id.to_string());
    }

    #[tokio::test]
    async fn test_contact_known_email_is_200() {
        let id = Uuid::new_v4();
        let mut widgets = MockWidgetService::new();
        widgets
            .expect_contact_only()
            .returning(move |_| Ok(ContactOutcome::Existing(id)));

        let body = json!({"widget_key": "careers", "email": "grace@navy.mil"});
        let response = app(widgets)
            .oneshot(json_request("POST", "/contact_only", body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], id.to_string());
    }

    #[tokio::test]
    async fn test_contact_rejects_bad_email() {
        let mut widgets = MockWidgetService::new();
        widgets.expect_contact_only().never();

        let body = json!({"widget_key": "careers", "email": "nope"});
        let response = app(widgets)
            .oneshot(json_request("POST", "/contact_only", body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Invalid email address"
        );
    }

    #[tokio::test]
    async fn test_unknown_widget_job_openings() {
        let mut widgets = MockWidgetService::new();
        widgets
            .expect_job_openings()
            .withf(|key| key == "missing")
            .returning(|_| Err(AppError::NotFound));

        let response = app(widgets)
            .oneshot(
                Request::builder()
                    .uri("/widgets/missing/job_openings")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
