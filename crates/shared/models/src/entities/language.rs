//! Spoken language entity.

use sea_orm::entity::prelude::*;

use domain::Language;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "languages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Language {
    fn from(model: Model) -> Self {
        Language {
            id: model.id,
            code: model.code,
            name: model.name,
        }
    }
}
