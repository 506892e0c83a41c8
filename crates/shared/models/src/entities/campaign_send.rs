//! Per-candidate campaign delivery record.

use sea_orm::entity::prelude::*;

use domain::{CampaignSend, SendStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "campaign_sends")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub candidate_id: Uuid,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub error: Option<String>,
    pub sent_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::campaign::Entity",
        from = "Column::CampaignId",
        to = "super::campaign::Column::Id",
        on_delete = "Cascade"
    )]
    Campaign,
    #[sea_orm(
        belongs_to = "super::candidate::Entity",
        from = "Column::CandidateId",
        to = "super::candidate::Column::Id",
        on_delete = "Cascade"
    )]
    Candidate,
}

impl Related<super::campaign::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Campaign.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CampaignSend {
    fn from(model: Model) -> Self {
        CampaignSend {
            id: model.id,
            campaign_id: model.campaign_id,
            candidate_id: model.candidate_id,
            status: SendStatus::from(model.status.as_str()),
            error: model.error,
            sent_at: model.sent_at,
        }
    }
}
