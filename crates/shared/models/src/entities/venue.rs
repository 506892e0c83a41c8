//! Venue (office / location) entity.

use sea_orm::entity::prelude::*;

use domain::Venue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "venues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub domain_id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::job_opening::Entity")]
    JobOpening,
}

impl Related<super::job_opening::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JobOpening.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Venue {
    fn from(model: Model) -> Self {
        Venue {
            id: model.id,
            domain_id: model.domain_id,
            name: model.name,
            city: model.city,
        }
    }
}
