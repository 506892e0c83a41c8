//! Candidate entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "candidates")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub objective: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub summary: Option<String>,
    pub source: String,
    pub added_time: DateTimeUtc,
    pub updated_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerUserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(has_many = "super::candidate_email::Entity")]
    Email,
    #[sea_orm(has_many = "super::candidate_phone::Entity")]
    Phone,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::candidate_email::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Email.def()
    }
}

impl Related<super::candidate_phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Build the domain candidate from this row and its already-resolved
    /// contact details.
    pub fn into_domain(
        self,
        emails: Vec<domain::CandidateEmail>,
        phones: Vec<domain::CandidatePhone>,
    ) -> domain::Candidate {
        domain::Candidate {
            id: self.id,
            owner_user_id: self.owner_user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            objective: self.objective,
            summary: self.summary,
            source: self.source,
            added_time: self.added_time,
            updated_time: self.updated_time,
            emails,
            phones,
        }
    }
}
