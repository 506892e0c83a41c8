//! HTTP surface: OAuth2 token endpoints and user management.

mod oauth_handler;
mod routes;
mod state;
mod user_handler;

pub use routes::create_router;
pub use state::{AppState, LocalVerifier};
