//! Persistence for users, OAuth2 clients and issued tokens.

mod client_repository;
mod token_repository;
mod user_repository;

pub use client_repository::{ClientRepository, ClientStore, OAuthClient};
pub use token_repository::{NewToken, StoredToken, TokenRepository, TokenStore};
pub use user_repository::{NewUser, UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use client_repository::MockClientRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use token_repository::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
