//! Route configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use web::{auth_middleware, rate_limit_middleware};

use super::oauth_handler::{authorize, issue_token, revoke_token};
use super::state::AppState;
use super::user_handler::{create_user, get_current_user, list_users};

pub fn create_router(state: AppState) -> Router {
    let mut token_routes = Router::new().route("/v1/oauth2/token", post(issue_token));
    if let Some(limit) = state.token_rate_limit.clone() {
        token_routes =
            token_routes.route_layer(middleware::from_fn_with_state(limit, rate_limit_middleware));
    }

    let authenticated = Router::new()
        .route("/v1/oauth2/revoke", post(revoke_token))
        .route("/v1/oauth2/authorize", get(authorize))
        .route("/v1/users", get(list_users).post(create_user))
        .route("/v1/users/me", get(get_current_user))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(token_routes)
        .merge(authenticated)
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
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::service::{
        Claims, MockAuthService, MockUserService, TokenGrant, TokenResponse,
    };
    use common::AppError;
    use domain::{User, UserRole};

    fn claims(role: &str) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: "recruiter@example.com".to_string(),
            role: role.to_string(),
            domain_id: Uuid::new_v4(),
            exp: 0,
            iat: 0,
            jti: Uuid::new_v4(),
        }
    }

    fn auth_accepting(role: &'static str) -> MockAuthService {
        let mut auth = MockAuthService::new();
        auth.expect_verify_token()
            .returning(move |token| match token {
                "good" => Ok(claims(role)),
                _ => Err(AppError::Unauthorized),
            });
        auth
    }

    fn app(auth: MockAuthService, users: MockUserService) -> Router {
        create_router(AppState::new(Arc::new(auth), Arc::new(users), None))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_token_endpoint_accepts_form() {
        let mut auth = MockAuthService::new();
        auth.expect_issue_token()
            .withf(|client, grant| {
                client.client_id == "web"
                    && matches!(grant, TokenGrant::Password { username, .. } if username == "a@b.io")
            })
            .returning(|_, _| {
                Ok(TokenResponse {
                    access_token: "jwt".to_string(),
                    token_type: "Bearer".to_string(),
                    expires_in: 7200,
                    refresh_token: "r".to_string(),
                })
            });

        let request = Request::builder()
            .method("POST")
            .uri("/v1/oauth2/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "grant_type=password&client_id=web&client_secret=s&username=a%40b.io&password=pw",
            ))
            .unwrap();

        let response = app(auth, MockUserService::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["access_token"], "jwt");
        assert_eq!(body["token_type"], "Bearer");
    }

    #[tokio::test]
    async fn test_token_endpoint_bad_credentials() {
        let mut auth = MockAuthService::new();
        auth.expect_issue_token()
            .returning(|_, _| Err(AppError::InvalidCredentials));

        let request = Request::builder()
            .method("POST")
            .uri("/v1/oauth2/token")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"grant_type":"password","client_id":"web","client_secret":"x","username":"a@b.io","password":"pw"}"#,
            ))
            .unwrap();

        let response = app(auth, MockUserService::new()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"]["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_users_require_token() {
        let request = Request::builder()
            .uri("/v1/users/me")
            .header(header::AUTHORIZATION, "Bearer revoked")
            .body(Body::empty())
            .unwrap();

        let response = app(auth_accepting("user"), MockUserService::new())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_user_requires_admin() {
        let mut users = MockUserService::new();
        users.expect_create_user().never();

        let request = Request::builder()
            .method("POST")
            .uri("/v1/users")
            .header(header::AUTHORIZATION, "Bearer good")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"new@example.com","password":"password123"}"#))
            .unwrap();

        let response = app(auth_accepting("user"), users).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_creates_user() {
        let mut users = MockUserService::new();
        users
            .expect_create_user()
            .times(1)
            .returning(|domain_id, _, request| {
                Ok(User {
                    id: Uuid::new_v4(),
                    domain_id,
                    email: request.email,
                    password_hash: String::new(),
                    first_name: request.first_name,
                    last_name: request.last_name,
                    role: UserRole::User,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let request = Request::builder()
            .method("POST")
            .uri("/v1/users")
            .header(header::AUTHORIZATION, "Bearer good")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"email":"new@example.com","password":"password123","first_name":"Grace"}"#,
            ))
            .unwrap();

        let response = app(auth_accepting("admin"), users).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["email"], "new@example.com");
        assert_eq!(body["first_name"], "Grace");
        assert!(body.get("password_hash").is_none());
    }
}
