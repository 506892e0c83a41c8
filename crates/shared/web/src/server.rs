//! HTTP server loop shared by the services.

use std::net::SocketAddr;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Bind `host:port` and serve `router` with request tracing and permissive CORS.
pub async fn serve(router: Router, service: &str, host: &str, port: u16) -> Result<(), BoxError> {
    let app = router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("{} listening on {}", service, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
