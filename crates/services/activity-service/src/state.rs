//! Application state for dependency injection.

use std::sync::Arc;

use web::TokenVerifier;

use crate::service::ActivityService;

#[derive(Clone)]
pub struct AppState {
    pub activities: Arc<dyn ActivityService>,
    pub verifier: Arc<dyn TokenVerifier>,
}

impl AppState {
    pub fn new(activities: Arc<dyn ActivityService>, verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            activities,
            verifier,
        }
    }
}
