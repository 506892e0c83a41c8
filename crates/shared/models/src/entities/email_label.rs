//! Email address label entity.

use sea_orm::entity::prelude::*;

use domain::EmailLabel;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "email_labels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::candidate_email::Entity")]
    CandidateEmail,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for EmailLabel {
    fn from(model: Model) -> Self {
        EmailLabel {
            id: model.id,
            description: model.description,
        }
    }
}
