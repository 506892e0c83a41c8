//! Application state for dependency injection.

use std::sync::Arc;

use web::TokenVerifier;

use crate::service::CampaignService;

#[derive(Clone)]
pub struct AppState {
    pub campaigns: Arc<dyn CampaignService>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(campaigns: Arc<dyn CampaignService>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            campaigns,
            verifier,
        }
    }
}
