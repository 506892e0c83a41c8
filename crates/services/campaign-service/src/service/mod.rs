//! Campaign business logic.

mod campaign_service;

pub use campaign_service::{CampaignManager, CampaignService};

#[cfg(any(test, feature = "test-utils"))]
pub use campaign_service::MockCampaignService;
