//! Bearer-token authentication.
//!
//! Services never decode tokens themselves; every request is checked with
//! the auth service over gRPC so that revoked tokens stop working at once.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use tonic::codegen::http::uri::InvalidUri;
use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{UserRole, BEARER_TOKEN_PREFIX};
use proto::auth::VerifyTokenRequest;
use proto::AuthServiceClient;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Identity carried by a valid access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub domain_id: Uuid,
}

/// Resolves an access token to the identity it was issued for.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// `Ok(None)` means the token is well-formed but not (or no longer) valid.
    async fn verify_token(&self, token: &str) -> AppResult<Option<Claims>>;
}

/// gRPC client wrapper for the auth service.
pub struct AuthClient {
    client: AuthServiceClient<Channel>,
}

impl AuthClient {
    pub async fn connect(endpoint: &str) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to auth-service at {}", endpoint);
        let client = AuthServiceClient::connect(endpoint.to_string()).await?;
        Ok(Self { client })
    }

    /// Build a client whose connection is established on first use.
    pub fn connect_lazy(endpoint: &str) -> Result<Self, InvalidUri> {
        let channel = Channel::from_shared(endpoint.to_string())?.connect_lazy();
        Ok(Self {
            client: AuthServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl TokenVerifier for AuthClient {
    async fn verify_token(&self, token: &str) -> AppResult<Option<Claims>> {
        let request = tonic::Request::new(VerifyTokenRequest {
            token: token.to_string(),
        });

        let mut client = self.client.clone();
        let proto = client.verify_token(request).await?.into_inner();

        if !proto.valid {
            return Ok(None);
        }

        Ok(Some(Claims {
            user_id: parse_uuid(&proto.user_id)?,
            email: proto.email,
            role: proto.role,
            domain_id: parse_uuid(&proto.domain_id)?,
        }))
    }
}

fn parse_uuid(value: &str) -> AppResult<Uuid> {
    value
        .parse()
        .map_err(|_| AppError::internal(format!("Invalid UUID from auth-service: {}", value)))
}

/// The authenticated caller, inserted into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub domain_id: Uuid,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.user_id,
            email: claims.email,
            role: UserRole::from(claims.role),
            domain_id: claims.domain_id,
        }
    }
}

pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Rejects requests without a valid bearer token; otherwise attaches the
/// [`CurrentUser`].
pub async fn auth_middleware(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers())?;

    let claims = verifier
        .verify_token(&token)
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Bearer token from the `Authorization` header.
pub fn extract_token(headers: &HeaderMap) -> AppResult<String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    match auth_header.strip_prefix(BEARER_TOKEN_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AppError::Unauthorized),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::to_bytes,
        extract::Extension,
        http::{HeaderValue, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn claims() -> Claims {
        Claims {
            user_id: Uuid::new_v4(),
            email: "recruiter@example.com".to_string(),
            role: "admin".to_string(),
            domain_id: Uuid::new_v4(),
        }
    }

    fn app(verifier: MockTokenVerifier) -> Router {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(verifier);
        Router::new()
            .route(
                "/me",
                get(|Extension(user): Extension<CurrentUser>| async move { user.email }),
            )
            .route_layer(middleware::from_fn_with_state(verifier, auth_middleware))
    }

    fn request(authorization: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/me");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_extract_token() {
        let mut headers = HeaderMap::new();
        assert!(extract_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_token(&headers).unwrap(), "abc.def");

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(extract_token(&headers).is_err());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(extract_token(&headers).is_err());
    }

    #[test]
    fn test_require_admin() {
        let mut user = CurrentUser::from(claims());
        assert!(require_admin(&user).is_ok());

        user.role = UserRole::User;
        assert!(matches!(require_admin(&user), Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().never();

        let response = app(verifier).oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rejected_token_is_unauthorized() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().returning(|_| Ok(None));

        let response = app(verifier)
            .oneshot(request(Some("Bearer revoked")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_attaches_current_user() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify_token()
            .withf(|token| token == "good")
            .returning(|_| Ok(Some(claims())));

        let response = app(verifier)
            .oneshot(request(Some("Bearer good")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"recruiter@example.com");
    }
}
