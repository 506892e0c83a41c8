//! Campaign creation, lookup and send requests.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{Campaign, CampaignChannel, CampaignSend};
use web::CurrentUser;

use crate::jobs::{CampaignSendJob, JobQueue};
use crate::repository::{CampaignRepository, NewCampaign};
use crate::schema::validate_content;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CampaignService: Send + Sync {
    /// `payload` carries `channel` plus the channel's fields.
    async fn create(&self, user: CurrentUser, payload: Value) -> AppResult<Campaign>;

    async fn list(
        &self,
        user: CurrentUser,
        params: PaginationParams,
    ) -> AppResult<Paginated<Campaign>>;

    async fn get(&self, user: CurrentUser, id: Uuid) -> AppResult<Campaign>;

    /// Queue one send per candidate; returns the number queued.
    async fn send(&self, user: CurrentUser, id: Uuid, candidate_ids: Vec<Uuid>)
        -> AppResult<usize>;

    async fn sends(&self, user: CurrentUser, id: Uuid) -> AppResult<Vec<CampaignSend>>;
}

pub struct CampaignManager {
    campaigns: Arc<dyn CampaignRepository>,
    queue: Arc<dyn JobQueue>,
}

impl CampaignManager {
    pub fn new(campaigns: Arc<dyn CampaignRepository>, queue: Arc<dyn JobQueue>) -> Self {
        Self { campaigns, queue }
    }

    async fn visible(&self, user: &CurrentUser, id: Uuid) -> AppResult<Campaign> {
        let campaign = self
            .campaigns
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        if campaign.domain_id != user.domain_id {
            return Err(AppError::Forbidden);
        }
        Ok(campaign)
    }
}

/// Split the request into channel and channel content.
fn parse_payload(payload: Value) -> AppResult<(CampaignChannel, Map<String, Value>)> {
    let Value::Object(mut content) = payload else {
        return Err(AppError::validation("Campaign payload must be a JSON object"));
    };
    let channel = match content.remove("channel") {
        Some(Value::String(channel)) => channel.parse::<CampaignChannel>()?,
        Some(_) => return Err(AppError::validation("channel must be a string")),
        None => return Err(AppError::validation("channel is required")),
    };
    Ok((channel, content))
}

#[async_trait]
impl CampaignService for CampaignManager {
    async fn create(&self, user: CurrentUser, payload: Value) -> AppResult<Campaign> {
        let (channel, content) = parse_payload(payload)?;
        validate_content(channel, &content)?;

        let name = content
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        let campaign = self
            .campaigns
            .create(
                user.id,
                user.domain_id,
                NewCampaign {
                    channel,
                    name,
                    content: Value::Object(content),
                },
            )
            .await?;

        info!(campaign_id = %campaign.id, channel = %channel, "Campaign created");
        Ok(campaign)
    }

    async fn list(
        &self,
        user: CurrentUser,
        params: PaginationParams,
    ) -> AppResult<Paginated<Campaign>> {
        let (campaigns, total) = self.campaigns.list(user.domain_id, params.clone()).await?;
        Ok(Paginated::new(campaigns, &params, total))
    }

    async fn get(&self, user: CurrentUser, id: Uuid) -> AppResult<Campaign> {
        self.visible(&user, id).await
    }

    async fn send(
        &self,
        user: CurrentUser,
        id: Uuid,
        candidate_ids: Vec<Uuid>,
    ) -> AppResult<usize> {
        let campaign = self.visible(&user, id).await?;

        let mut seen = HashSet::new();
        let requested: Vec<Uuid> = candidate_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();
        if requested.is_empty() {
            return Err(AppError::validation("candidate_ids must not be empty"));
        }

        let found: HashSet<Uuid> = self
            .campaigns
            .candidates_in_domain(user.domain_id, requested.clone())
            .await?
            .into_iter()
            .collect();
        if let Some(outside) = requested.iter().find(|id| !found.contains(id)) {
            return Err(AppError::validation(format!(
                "Candidate {} is not in your domain",
                outside
            )));
        }

        let jobs = requested
            .iter()
            .map(|candidate_id| CampaignSendJob {
                campaign_id: campaign.id,
                candidate_id: *candidate_id,
            })
            .collect();
        let queued = self.queue.enqueue(jobs).await?;
        if queued < requested.len() {
            warn!(
                campaign_id = %id,
                queued,
                requested = requested.len(),
                "Campaign partially queued"
            );
        }

        self.campaigns
            .record_send_requested(user.id, campaign, queued)
            .await?;
        info!(campaign_id = %id, queued, "Campaign sends queued");
        Ok(queued)
    }

    async fn sends(&self, user: CurrentUser, id: Uuid) -> AppResult<Vec<CampaignSend>> {
        self.visible(&user, id).await?;
        self.campaigns.list_sends(id).await
    }
}
