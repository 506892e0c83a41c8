//! Activity business logic.

mod activity_service;
pub mod aggregate;

pub use activity_service::{ActivityManager, ActivityService, NewActivity};
pub use aggregate::{aggregate, AggregatedActivity};

#[cfg(any(test, feature = "test-utils"))]
pub use activity_service::MockActivityService;
