//! Candidate business logic.

mod candidate_service;

pub use candidate_service::{CandidateManager, CandidateService};

#[cfg(any(test, feature = "test-utils"))]
pub use candidate_service::MockCandidateService;
