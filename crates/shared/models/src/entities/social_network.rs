//! Social network entity.

use sea_orm::entity::prelude::*;

use domain::SocialNetwork;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "social_networks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SocialNetwork {
    fn from(model: Model) -> Self {
        SocialNetwork {
            id: model.id,
            name: model.name,
            url: model.url,
        }
    }
}
