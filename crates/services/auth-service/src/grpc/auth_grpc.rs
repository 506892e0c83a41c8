//! gRPC implementation for AuthService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use tracing::debug;

use crate::service::AuthService;
use common::AppError;
use proto::auth::{
    auth_service_server::AuthService as AuthServiceProto, RevokeTokenRequest,
    RevokeTokenResponse, VerifyTokenRequest, VerifyTokenResponse,
};

/// gRPC service wrapper for AuthService.
pub struct AuthGrpcService {
    service: Arc<dyn AuthService>,
}

impl AuthGrpcService {
    pub fn new(service: Arc<dyn AuthService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AuthServiceProto for AuthGrpcService {
    /// Invalid, expired and revoked tokens all answer `valid: false`. Any
    /// other failure is returned as an error status so callers can tell an
    /// outage from a bad token.
    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        match self.service.verify_token(&req.token).await {
            Ok(claims) => Ok(Response::new(VerifyTokenResponse {
                valid: true,
                user_id: claims.sub.to_string(),
                email: claims.email,
                role: claims.role,
                domain_id: claims.domain_id.to_string(),
            })),
            Err(e @ (AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_))) => {
                debug!("Token rejected: {}", e);
                Ok(Response::new(VerifyTokenResponse::default()))
            }
            Err(e) => Err(Status::from(e)),
        }
    }

    async fn revoke_token(
        &self,
        request: Request<RevokeTokenRequest>,
    ) -> Result<Response<RevokeTokenResponse>, Status> {
        let req = request.into_inner();
        let revoked = self
            .service
            .revoke_token(&req.token)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(RevokeTokenResponse { revoked }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{Claims, MockAuthService};
    use tonic::Code;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_verify_token_valid() {
        let user_id = Uuid::new_v4();
        let domain_id = Uuid::new_v4();
        let mut service = MockAuthService::new();
        service.expect_verify_token().returning(move |_| {
            Ok(Claims {
                sub: user_id,
                email: "recruiter@example.com".to_string(),
                role: "user".to_string(),
                domain_id,
                exp: 0,
                iat: 0,
                jti: Uuid::new_v4(),
            })
        });

        let grpc = AuthGrpcService::new(Arc::new(service));
        let response = grpc
            .verify_token(Request::new(VerifyTokenRequest {
                token: "t".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert!(response.valid);
        assert_eq!(response.user_id, user_id.to_string());
        assert_eq!(response.domain_id, domain_id.to_string());
    }

    #[tokio::test]
    async fn test_verify_token_rejected_is_not_an_error() {
        let mut service = MockAuthService::new();
        service
            .expect_verify_token()
            .returning(|_| Err(AppError::Unauthorized));

        let grpc = AuthGrpcService::new(Arc::new(service));
        let response = grpc
            .verify_token(Request::new(VerifyTokenRequest {
                token: "revoked".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();

        assert!(!response.valid);
        assert!(response.user_id.is_empty());
    }

    #[tokio::test]
    async fn test_verify_token_store_failure_is_an_error() {
        let mut service = MockAuthService::new();
        service
            .expect_verify_token()
            .returning(|_| Err(AppError::internal("token store unreachable")));

        let grpc = AuthGrpcService::new(Arc::new(service));
        let status = grpc
            .verify_token(Request::new(VerifyTokenRequest {
                token: "t".to_string(),
            }))
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::Internal);
    }
}
