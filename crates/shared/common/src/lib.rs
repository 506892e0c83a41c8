//! Common utilities shared across all services.
//!
//! This crate provides:
//! - Unified error handling for HTTP and gRPC
//! - Environment-driven configuration
//! - Pagination types and tracing setup

pub mod config;
pub mod error;
pub mod pagination;
pub mod telemetry;

pub use config::{ConfigError, Environment, GtConfig};
pub use error::{AppError, AppResult, OptionExt};
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use telemetry::init_tracing;
