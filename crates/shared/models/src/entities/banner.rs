//! Announcement banner entity.

use sea_orm::entity::prelude::*;

use domain::Banner;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub link: Option<String>,
    pub style: Option<String>,
    pub active: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Banner {
    fn from(model: Model) -> Self {
        Banner {
            id: model.id,
            title: model.title,
            text: model.text,
            link: model.link,
            style: model.style,
            active: model.active,
            created_at: model.created_at,
        }
    }
}
