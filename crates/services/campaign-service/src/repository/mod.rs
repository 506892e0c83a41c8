//! Campaign persistence.

mod campaign_repository;

pub use campaign_repository::{CampaignRepository, CampaignStore, NewCampaign};

#[cfg(any(test, feature = "test-utils"))]
pub use campaign_repository::MockCampaignRepository;
