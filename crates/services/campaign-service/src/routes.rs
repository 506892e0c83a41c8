//! Route configuration.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use web::auth_middleware;

use crate::handlers::campaign_handler::{
    create_campaign, get_campaign, list_campaigns, list_sends, send_campaign,
};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/campaigns", get(list_campaigns).post(create_campaign))
        .route("/v1/campaigns/:id", get(get_campaign))
        .route("/v1/campaigns/:id/send", post(send_campaign))
        .route("/v1/campaigns/:id/sends", get(list_sends))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            auth_middleware,
        ))
        .with_state(state)
}
