//! Error type shared by every service.
//!
//! `AppError` renders as `{"error": {"code", "message"}}` over HTTP and as a
//! `tonic::Status` over gRPC. Both mappings come from [`AppError::class`] so
//! the two transports always agree.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use serde::Serialize;
use thiserror::Error;
use tonic::{Code, Status};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    /// Caller is authenticated but the resource is outside their reach
    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found")]
    NotFound,

    #[error("{0} already exists")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[cfg(feature = "database")]
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[cfg(feature = "jwt")]
    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[cfg(feature = "cache")]
    #[error("Cache error")]
    Cache(#[from] redis::RedisError),

    #[error("Service unavailable")]
    ServiceUnavailable(String),

    #[error("gRPC error: {0}")]
    Grpc(String),

    #[error("Internal server error")]
    Internal(String),
}

/// Transport-independent classification of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorClass {
    pub code: &'static str,
    pub status: StatusCode,
    pub grpc: Code,
}

const fn class(code: &'static str, status: StatusCode, grpc: Code) -> ErrorClass {
    ErrorClass { code, status, grpc }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::Unauthorized => {
                class("UNAUTHORIZED", StatusCode::UNAUTHORIZED, Code::Unauthenticated)
            }
            AppError::InvalidCredentials => {
                class("INVALID_CREDENTIALS", StatusCode::UNAUTHORIZED, Code::Unauthenticated)
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => class("AUTH_ERROR", StatusCode::UNAUTHORIZED, Code::Unauthenticated),
            AppError::Forbidden => class("FORBIDDEN", StatusCode::FORBIDDEN, Code::PermissionDenied),
            AppError::NotFound => class("NOT_FOUND", StatusCode::NOT_FOUND, Code::NotFound),
            AppError::Conflict(_) => class("CONFLICT", StatusCode::CONFLICT, Code::AlreadyExists),
            AppError::Validation(_) => {
                class("VALIDATION_ERROR", StatusCode::BAD_REQUEST, Code::InvalidArgument)
            }
            AppError::BadRequest(_) => {
                class("BAD_REQUEST", StatusCode::BAD_REQUEST, Code::InvalidArgument)
            }
            AppError::TooManyRequests => {
                class("TOO_MANY_REQUESTS", StatusCode::TOO_MANY_REQUESTS, Code::ResourceExhausted)
            }
            AppError::ServiceUnavailable(_) => {
                class("SERVICE_UNAVAILABLE", StatusCode::SERVICE_UNAVAILABLE, Code::Unavailable)
            }
            #[cfg(feature = "database")]
            AppError::Database(_) => {
                class("DATABASE_ERROR", StatusCode::INTERNAL_SERVER_ERROR, Code::Internal)
            }
            #[cfg(feature = "cache")]
            AppError::Cache(_) => {
                class("CACHE_ERROR", StatusCode::INTERNAL_SERVER_ERROR, Code::Internal)
            }
            AppError::Grpc(_) => {
                class("GRPC_ERROR", StatusCode::INTERNAL_SERVER_ERROR, Code::Internal)
            }
            AppError::Internal(_) => {
                class("INTERNAL_ERROR", StatusCode::INTERNAL_SERVER_ERROR, Code::Internal)
            }
        }
    }

    pub fn code(&self) -> &'static str {
        self.class().code
    }

    pub fn status(&self) -> StatusCode {
        self.class().status
    }

    /// Message safe to show a client. Server-side failures are logged here
    /// and replaced by a generic sentence.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => msg.clone(),
            // Messages relayed over gRPC already carry the suffix
            AppError::Conflict(msg) if msg.ends_with("already exists") => msg.clone(),
            #[cfg(feature = "database")]
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }
            #[cfg(feature = "cache")]
            AppError::Cache(e) => {
                tracing::error!("Cache error: {:?}", e);
                "A cache error occurred".to_string()
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(service) => {
                tracing::error!("Service unavailable: {}", service);
                format!("Service {} is unavailable", service)
            }
            AppError::Grpc(detail) => {
                tracing::error!("gRPC error: {}", detail);
                "A service communication error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let class = self.class();
        let body = ErrorEnvelope {
            error: ErrorBody {
                code: class.code,
                message: self.user_message(),
            },
        };
        (class.status, Json(body)).into_response()
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        Status::new(err.class().grpc, err.user_message())
    }
}

/// Inverse of [`AppError::class`] for errors relayed by the auth service.
impl From<Status> for AppError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::Unauthenticated => AppError::Unauthorized,
            Code::PermissionDenied => AppError::Forbidden,
            Code::NotFound => AppError::NotFound,
            Code::AlreadyExists => AppError::Conflict(message),
            Code::InvalidArgument => AppError::Validation(message),
            Code::ResourceExhausted => AppError::TooManyRequests,
            Code::Unavailable => AppError::ServiceUnavailable(message),
            _ => AppError::Grpc(message),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::Password(msg) => AppError::Validation(msg),
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::Conflict(entity) => AppError::Conflict(entity),
            DomainError::Unauthorized => AppError::Unauthorized,
            DomainError::Forbidden => AppError::Forbidden,
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Internal(detail) => AppError::Internal(detail),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}
