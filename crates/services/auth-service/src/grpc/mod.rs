//! gRPC surface used by the other services.

mod auth_grpc;

pub use auth_grpc::AuthGrpcService;
