//! Send job payload and the queue it travels on.

use std::fmt::Display;
use std::future::Future;

use apalis::prelude::Storage;
use apalis_sql::postgres::PostgresStorage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Deliver one campaign to one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSendJob {
    pub campaign_id: Uuid,
    pub candidate_id: Uuid,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Returns how many jobs were queued. Jobs are pushed in order; after a
    /// failure the jobs already pushed stay queued and their count is
    /// returned. Fails only when nothing was queued.
    async fn enqueue(&self, jobs: Vec<CampaignSendJob>) -> AppResult<usize>;
}

pub struct PostgresQueue {
    storage: PostgresStorage<CampaignSendJob>,
}

impl PostgresQueue {
    pub fn new(storage: PostgresStorage<CampaignSendJob>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl JobQueue for PostgresQueue {
    async fn enqueue(&self, jobs: Vec<CampaignSendJob>) -> AppResult<usize> {
        push_each(jobs, |job| {
            let mut storage = self.storage.clone();
            async move { storage.push(job).await.map(|_| ()) }
        })
        .await
    }
}

async fn push_each<F, Fut, E>(jobs: Vec<CampaignSendJob>, mut push: F) -> AppResult<usize>
where
    F: FnMut(CampaignSendJob) -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Display,
{
    let total = jobs.len();
    let mut queued = 0;
    for job in jobs {
        let campaign_id = job.campaign_id;
        if let Err(e) = push(job).await {
            if queued == 0 {
                return Err(AppError::internal(format!("Failed to queue send job: {}", e)));
            }
            warn!(%campaign_id, queued, total, "Send queue interrupted: {}", e);
            break;
        }
        queued += 1;
    }
    Ok(queued)
}
