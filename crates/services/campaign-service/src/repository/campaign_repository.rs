//! Campaign repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{AppResult, PaginationParams};
use domain::{ActivityType, Campaign, CampaignChannel, CampaignSend, Candidate, SendStatus};
use models::entities::{campaign, campaign_send, candidate};
use models::{domain_user_ids, load_candidates, record_activity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SOURCE_TABLE: &str = "campaigns";

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub channel: CampaignChannel,
    pub name: String,
    pub content: Value,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CampaignRepository: Send + Sync {
    /// Insert and record `CampaignCreate` for `actor`.
    async fn create(&self, actor: Uuid, domain_id: Uuid, data: NewCampaign) -> AppResult<Campaign>;

    /// Newest first.
    async fn list(
        &self,
        domain_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<(Vec<Campaign>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>>;

    /// The subset of `ids` whose owner belongs to `domain_id`.
    async fn candidates_in_domain(&self, domain_id: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Uuid>>;

    /// Record `CampaignSend` for `actor` once jobs are queued.
    async fn record_send_requested(
        &self,
        actor: Uuid,
        campaign: Campaign,
        num_candidates: usize,
    ) -> AppResult<()>;

    async fn list_sends(&self, campaign_id: Uuid) -> AppResult<Vec<CampaignSend>>;

    async fn find_candidate(&self, id: Uuid) -> AppResult<Option<Candidate>>;

    async fn insert_send(
        &self,
        campaign_id: Uuid,
        candidate_id: Uuid,
        status: SendStatus,
        error: Option<String>,
    ) -> AppResult<CampaignSend>;
}

pub struct CampaignStore {
    db: DatabaseConnection,
}

impl CampaignStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CampaignRepository for CampaignStore {
    async fn create(&self, actor: Uuid, domain_id: Uuid, data: NewCampaign) -> AppResult<Campaign> {
        let txn = self.db.begin().await?;

        let model = campaign::ActiveModel {
            id: Set(Uuid::new_v4()),
            domain_id: Set(domain_id),
            user_id: Set(actor),
            channel: Set(data.channel.as_str().to_string()),
            name: Set(data.name.clone()),
            content: Set(data.content),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        record_activity(
            &txn,
            actor,
            ActivityType::CampaignCreate,
            SOURCE_TABLE,
            Some(model.id),
            json!({"name": data.name, "channel": data.channel.as_str()}),
        )
        .await?;

        txn.commit().await?;
        Ok(Campaign::try_from(model)?)
    }

    async fn list(
        &self,
        domain_id: Uuid,
        params: PaginationParams,
    ) -> AppResult<(Vec<Campaign>, u64)> {
        let query = campaign::Entity::find().filter(campaign::Column::DomainId.eq(domain_id));
        let total = query.clone().count(&self.db).await?;

        let rows = query
            .order_by_desc(campaign::Column::CreatedAt)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        let campaigns = rows
            .into_iter()
            .map(Campaign::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((campaigns, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Campaign>> {
        let row = campaign::Entity::find_by_id(id).one(&self.db).await?;
        Ok(row.map(Campaign::try_from).transpose()?)
    }

    async fn candidates_in_domain(&self, domain_id: Uuid, ids: Vec<Uuid>) -> AppResult<Vec<Uuid>> {
        let found = candidate::Entity::find()
            .select_only()
            .column(candidate::Column::Id)
            .filter(candidate::Column::Id.is_in(ids))
            .filter(candidate::Column::OwnerUserId.in_subquery(domain_user_ids(domain_id)))
            .into_tuple::<Uuid>()
            .all(&self.db)
            .await?;
        Ok(found)
    }

    async fn record_send_requested(
        &self,
        actor: Uuid,
        campaign: Campaign,
        num_candidates: usize,
    ) -> AppResult<()> {
        record_activity(
            &self.db,
            actor,
            ActivityType::CampaignSend,
            SOURCE_TABLE,
            Some(campaign.id),
            json!({"name": campaign.name, "num_candidates": num_candidates}),
        )
        .await?;
        Ok(())
    }

    async fn list_sends(&self, campaign_id: Uuid) -> AppResult<Vec<CampaignSend>> {
        let rows = campaign_send::Entity::find()
            .filter(campaign_send::Column::CampaignId.eq(campaign_id))
            .order_by_desc(campaign_send::Column::SentAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(CampaignSend::from).collect())
    }

    async fn find_candidate(&self, id: Uuid) -> AppResult<Option<Candidate>> {
        let Some(row) = candidate::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        Ok(load_candidates(&self.db, vec![row]).await?.pop())
    }

    async fn insert_send(
        &self,
        campaign_id: Uuid,
        candidate_id: Uuid,
        status: SendStatus,
        error: Option<String>,
    ) -> AppResult<CampaignSend> {
        let model = campaign_send::ActiveModel {
            id: Set(Uuid::new_v4()),
            campaign_id: Set(campaign_id),
            candidate_id: Set(candidate_id),
            status: Set(status.as_str().to_string()),
            error: Set(error),
            sent_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;
        Ok(CampaignSend::from(model))
    }
}
