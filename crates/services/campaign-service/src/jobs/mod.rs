//! Background campaign delivery.

mod send_job;
mod worker;

pub use send_job::{CampaignSendJob, JobQueue, PostgresQueue};
pub use worker::{build_message, connect_storage, deliver, run_worker, DeliveryContext};

#[cfg(any(test, feature = "test-utils"))]
pub use send_job::MockJobQueue;
