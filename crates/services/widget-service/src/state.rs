//! Application state for dependency injection.

use std::sync::Arc;

use web::{RateLimit, TokenVerifier};

use crate::service::WidgetService;

#[derive(Clone)]
pub struct AppState {
    pub widgets: Arc<dyn WidgetService>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Applied to the public sign-up form
    pub contact_rate_limit: Option<RateLimit>,
}

impl AppState {
    pub fn new(
        widgets: Arc<dyn WidgetService>,
        verifier: Arc<dyn TokenVerifier>,
        contact_rate_limit: Option<RateLimit>,
    ) -> Self {
        Self {
            widgets,
            verifier,
            contact_rate_limit,
        }
    }
}
