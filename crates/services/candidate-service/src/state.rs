//! Application state for dependency injection.

use std::sync::Arc;

use web::{Cache, TokenVerifier};

use crate::repository::LookupRepository;
use crate::service::CandidateService;

#[derive(Clone)]
pub struct AppState {
    pub candidates: Arc<dyn CandidateService>,
    pub lookups: Arc<dyn LookupRepository>,
    pub verifier: Arc<dyn TokenVerifier>,
    /// Lookup cache; `None` reads straight from the database.
    pub cache: Option<Arc<Cache>>,
}

impl AppState {
    pub fn new(
        candidates: Arc<dyn CandidateService>,
        lookups: Arc<dyn LookupRepository>,
        verifier: Arc<dyn TokenVerifier>,
        cache: Option<Arc<Cache>>,
    ) -> Self {
        Self {
            candidates,
            lookups,
            verifier,
            cache,
        }
    }
}
