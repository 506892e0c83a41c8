//! gRPC protocol buffer definitions.
//!
//! AuthService: bearer token verification and revocation, called by the
//! HTTP services' auth middleware.

/// Authentication service definitions.
pub mod auth {
    tonic::include_proto!("auth");
}

pub use auth::auth_service_client::AuthServiceClient;
pub use auth::auth_service_server::{AuthService, AuthServiceServer};
