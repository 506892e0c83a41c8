//! Country entity.

use sea_orm::entity::prelude::*;

use domain::Country;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Country {
    fn from(model: Model) -> Self {
        Country {
            id: model.id,
            name: model.name,
            code: model.code,
        }
    }
}
