//! University entity.

use sea_orm::entity::prelude::*;

use domain::University;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "universities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for University {
    fn from(model: Model) -> Self {
        University {
            id: model.id,
            name: model.name,
        }
    }
}
