//! Sign-up form and banner flows through the router, service and an
//! in-memory repository.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::AppResult;
use domain::{Banner, CreateCandidate, WidgetPage};
use web::{Claims, MockTokenVerifier};
use widget_service_lib::repository::{ContactOutcome, JobOpeningView, NewBanner, WidgetRepository};
use widget_service_lib::routes::create_router;
use widget_service_lib::service::WidgetManager;
use widget_service_lib::state::AppState;

#[derive(Default)]
struct InMemoryWidgets {
    pages: Vec<WidgetPage>,
    banners: Mutex<Vec<Banner>>,
    /// (domain, email) -> candidate
    candidates: Mutex<HashMap<(Uuid, String), Uuid>>,
}

#[async_trait]
impl WidgetRepository for InMemoryWidgets {
    async fn active_banner(&self) -> AppResult<Option<Banner>> {
        let banners = self.banners.lock().unwrap();
        Ok(banners.iter().rev().find(|b| b.active).cloned())
    }

    async fn create_banner(&self, data: NewBanner) -> AppResult<Banner> {
        let mut banners = self.banners.lock().unwrap();
        banners.iter_mut().for_each(|b| b.active = false);
        let banner = Banner {
            id: Uuid::new_v4(),
            title: data.title,
            text: data.text,
            link: data.link,
            style: data.style,
            active: true,
            created_at: Utc::now(),
        };
        banners.push(banner.clone());
        Ok(banner)
    }

    async fn deactivate_banner(&self, id: Uuid) -> AppResult<bool> {
        let mut banners = self.banners.lock().unwrap();
        match banners.iter_mut().find(|b| b.id == id) {
            Some(banner) => {
                banner.active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_widget(&self, widget_key: String) -> AppResult<Option<WidgetPage>> {
        Ok(self.pages.iter().find(|p| p.widget_key == widget_key).cloned())
    }

    async fn contact_only(
        &self,
        widget: WidgetPage,
        data: CreateCandidate,
    ) -> AppResult<ContactOutcome> {
        let mut candidates = self.candidates.lock().unwrap();
        let address = data.normalized_addresses().remove(0);
        let key = (widget.domain_id, address);
        if let Some(id) = candidates.get(&key) {
            return Ok(ContactOutcome::Existing(*id));
        }
        let id = Uuid::new_v4();
        candidates.insert(key, id);
        Ok(ContactOutcome::Created(id))
    }

    async fn open_job_openings(&self, _domain_id: Uuid) -> AppResult<Vec<JobOpeningView>> {
        Ok(Vec::new())
    }
}

fn admin_verifier() -> MockTokenVerifier {
    let mut verifier = MockTokenVerifier::new();
    verifier.expect_verify_token().returning(|token| {
        Ok((token == "admin").then(|| Claims {
            user_id: Uuid::new_v4(),
            email: "admin@example.com".to_string(),
            role: "admin".to_string(),
            domain_id: Uuid::new_v4(),
        }))
    });
    verifier
}

fn app() -> Router {
    let widgets = InMemoryWidgets {
        pages: vec![WidgetPage {
            id: Uuid::new_v4(),
            domain_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            widget_key: "careers".to_string(),
            name: "Careers page".to_string(),
        }],
        ..Default::default()
    };
    create_router(AppState::new(
        Arc::new(WidgetManager::new(Arc::new(widgets))),
        Arc::new(admin_verifier()),
        None,
    ))
}

fn post(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
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
async fn contact_only_reuses_candidate_by_email() {
    let app = app();
    let form = json!({
        "widget_key": "careers",
        "first_name": "Grace",
        "last_name": "Hopper",
        "email": "grace@navy.mil"
    });

    let first = app
        .clone()
        .oneshot(post("/contact_only", form, None))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let created_id = body_json(first).await["id"].clone();

    let again = json!({"widget_key": "careers", "email": "GRACE@navy.mil"});
    let second = app
        .oneshot(post("/contact_only", again, None))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["id"], created_id);
}

#[tokio::test]
async fn contact_only_unknown_widget_is_404() {
    let form = json!({"widget_key": "nope", "email": "grace@navy.mil"});
    let response = app()
        .oneshot(post("/contact_only", form, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn newest_banner_replaces_previous() {
    let app = app();
    for title in ["First", "Second"] {
        let response = app
            .clone()
            .oneshot(post("/banners", json!({"title": title, "text": "body"}), Some("admin")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(Request::builder().uri("/banners").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["banner"]["title"], "Second");
}
