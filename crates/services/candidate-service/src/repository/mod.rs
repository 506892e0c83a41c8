//! Candidate and lookup-table persistence.

mod candidate_repository;
mod lookup_repository;

pub use candidate_repository::{CandidateRepository, CandidateStore, ScopedCandidate};
pub use lookup_repository::{LookupRepository, LookupStore};

#[cfg(any(test, feature = "test-utils"))]
pub use candidate_repository::MockCandidateRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use lookup_repository::MockLookupRepository;
