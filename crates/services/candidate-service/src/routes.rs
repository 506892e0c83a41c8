//! Route configuration.

use axum::{middleware, routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use web::auth_middleware;

use crate::handlers::candidate_handler::{
    create_candidate, delete_candidate, get_candidate, list_candidates, update_candidate,
};
use crate::handlers::lookup_handler::{
    countries, email_labels, languages, organizations, phone_labels, products, rating_tags,
    social_networks, universities,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/candidates", get(list_candidates).post(create_candidate))
        .route(
            "/api/candidates/:id",
            get(get_candidate)
                .patch(update_candidate)
                .delete(delete_candidate),
        )
        .route("/social_networks", get(social_networks))
        .route("/social_networks/", get(social_networks))
        .route("/countries", get(countries))
        .route("/email_labels", get(email_labels))
        .route("/phone_labels", get(phone_labels))
        .route("/rating_tags", get(rating_tags))
        .route("/languages", get(languages))
        .route("/universities", get(universities))
        .route("/organizations", get(organizations))
        .route("/products", get(products))
        .route_layer(middleware::from_fn_with_state(
            state.verifier.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api)
        .with_state(state)
}
