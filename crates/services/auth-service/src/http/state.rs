//! Application state for dependency injection.

use std::sync::Arc;

use async_trait::async_trait;

use common::{AppError, AppResult};
use web::{Claims, RateLimit, TokenVerifier};

use crate::service::{AuthService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UserService>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Stricter limit on the token endpoint; `None` disables it.
    pub token_rate_limit: Option<RateLimit>,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn AuthService>,
        users: Arc<dyn UserService>,
        token_rate_limit: Option<RateLimit>,
    ) -> Self {
        let verifier: Arc<dyn TokenVerifier> = Arc::new(LocalVerifier::new(auth.clone()));
        Self {
            auth,
            users,
            verifier,
            token_rate_limit,
        }
    }
}

/// Verifies bearer tokens in-process instead of calling back over gRPC.
pub struct LocalVerifier {
    auth: Arc<dyn AuthService>,
}

impl LocalVerifier {
    pub fn new(auth: Arc<dyn AuthService>) -> Self {
        Self { auth }
    }
}

#[async_trait]
impl TokenVerifier for LocalVerifier {
    async fn verify_token(&self, token: &str) -> AppResult<Option<Claims>> {
        match self.auth.verify_token(token).await {
            Ok(claims) => Ok(Some(Claims {
                user_id: claims.sub,
                email: claims.email,
                role: claims.role,
                domain_id: claims.domain_id,
            })),
            Err(AppError::Unauthorized) | Err(AppError::Jwt(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
