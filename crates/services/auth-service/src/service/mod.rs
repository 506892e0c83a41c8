//! Authentication and user-management business logic.

mod auth_service;
mod user_service;

pub use auth_service::{
    AuthService, Authenticator, Claims, ClientCredentials, TokenGrant, TokenResponse,
};
pub use user_service::{CreateUser, UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use auth_service::MockAuthService;
#[cfg(any(test, feature = "test-utils"))]
pub use user_service::MockUserService;
