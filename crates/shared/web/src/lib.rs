//! HTTP building blocks shared by every service: bearer-token
//! authentication against the auth service, Redis caching and rate
//! limiting, validated JSON bodies and query strings, health checks and the server loop.

pub mod auth;
pub mod cache;
pub mod extractors;
pub mod health;
pub mod rate_limit;
pub mod server;

pub use auth::{
    auth_middleware, extract_token, require_admin, AuthClient, Claims, CurrentUser, TokenVerifier,
};
pub use cache::Cache;
pub use extractors::{QueryParams, ValidatedJson};
pub use health::{health_routes, HealthState};
pub use rate_limit::{rate_limit_middleware, RateLimit};
pub use server::{serve, BoxError};

#[cfg(any(test, feature = "test-utils"))]
pub use auth::MockTokenVerifier;
