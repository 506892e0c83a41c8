//! Activity timeline entity.

use sea_orm::entity::prelude::*;

use domain::{Activity, ActivityType, DomainError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    /// Numeric `ActivityType` code
    pub activity_type: i32,
    pub source_table: String,
    pub source_id: Option<Uuid>,
    pub params: Json,
    pub added_time: DateTimeUtc,
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

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Activity {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Activity {
            id: model.id,
            user_id: model.user_id,
            activity_type: ActivityType::try_from(model.activity_type)?,
            source_table: model.source_table,
            source_id: model.source_id,
            params: model.params,
            added_time: model.added_time,
        })
    }
}
