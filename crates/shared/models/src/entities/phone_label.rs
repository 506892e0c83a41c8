//! Phone number label entity.

use sea_orm::entity::prelude::*;

use domain::PhoneLabel;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "phone_labels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::candidate_phone::Entity")]
    CandidatePhone,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PhoneLabel {
    fn from(model: Model) -> Self {
        PhoneLabel {
            id: model.id,
            description: model.description,
        }
    }
}
