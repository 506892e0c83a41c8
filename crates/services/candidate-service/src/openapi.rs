//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::candidate_handler::CreatedResponse;
use domain::{
    Candidate, CandidateEmail, CandidatePhone, Country, CreateCandidate, EmailLabel, Language,
    NewCandidateEmail, NewCandidatePhone, Organization, PhoneLabel, Product, RatingTag,
    SocialNetwork, University, UpdateCandidate,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::candidate_handler::list_candidates,
        crate::handlers::candidate_handler::get_candidate,
        crate::handlers::candidate_handler::create_candidate,
        crate::handlers::candidate_handler::update_candidate,
        crate::handlers::candidate_handler::delete_candidate,
        crate::handlers::lookup_handler::social_networks,
        crate::handlers::lookup_handler::countries,
        crate::handlers::lookup_handler::email_labels,
        crate::handlers::lookup_handler::phone_labels,
        crate::handlers::lookup_handler::rating_tags,
        crate::handlers::lookup_handler::languages,
        crate::handlers::lookup_handler::universities,
        crate::handlers::lookup_handler::organizations,
        crate::handlers::lookup_handler::products,
    ),
    components(
        schemas(
            Candidate,
            CandidateEmail,
            CandidatePhone,
            CreateCandidate,
            NewCandidateEmail,
            NewCandidatePhone,
            UpdateCandidate,
            CreatedResponse,
            SocialNetwork,
            Country,
            EmailLabel,
            PhoneLabel,
            RatingTag,
            Language,
            University,
            Organization,
            Product,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Candidates", description = "Candidate management"),
        (name = "Lookups", description = "Reference tables"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
