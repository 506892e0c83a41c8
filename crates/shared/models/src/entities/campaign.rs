//! Campaign entity.

use sea_orm::entity::prelude::*;

use domain::{Campaign, CampaignChannel, DomainError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "campaigns")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub domain_id: Uuid,
    pub user_id: Uuid,
    pub channel: String,
    pub name: String,
    pub content: Json,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::domain::Entity",
        from = "Column::DomainId",
        to = "super::domain::Column::Id",
        on_delete = "Cascade"
    )]
    Domain,
    #[sea_orm(has_many = "super::campaign_send::Entity")]
    Send,
}

impl Related<super::campaign_send::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Send.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Campaign {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Campaign {
            id: model.id,
            domain_id: model.domain_id,
            user_id: model.user_id,
            channel: model.channel.parse::<CampaignChannel>()?,
            name: model.name,
            content: model.content,
            created_at: model.created_at,
        })
    }
}
