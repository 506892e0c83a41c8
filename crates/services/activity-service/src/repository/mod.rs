//! Activity persistence.

mod activity_repository;

pub use activity_repository::{ActivityRepository, ActivityStore, NamedActivity, TimeRange};

#[cfg(any(test, feature = "test-utils"))]
pub use activity_repository::MockActivityRepository;
