//! Candidate rating tag entity.

use sea_orm::entity::prelude::*;

use domain::RatingTag;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "rating_tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for RatingTag {
    fn from(model: Model) -> Self {
        RatingTag {
            id: model.id,
            description: model.description,
        }
    }
}
