//! Public widget page entity.

use sea_orm::entity::prelude::*;

use domain::WidgetPage;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "widget_pages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub domain_id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(unique)]
    pub widget_key: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WidgetPage {
    fn from(model: Model) -> Self {
        WidgetPage {
            id: model.id,
            domain_id: model.domain_id,
            user_id: model.user_id,
            widget_key: model.widget_key,
            name: model.name,
        }
    }
}
