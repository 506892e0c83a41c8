//! Candidate email address entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "candidate_emails")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub candidate_id: Uuid,
    /// Copied from the owner so the address can be unique per domain
    pub domain_id: Uuid,
    pub email_label_id: i32,
    pub address: String,
    pub is_default: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::candidate::Entity",
        from = "Column::CandidateId",
        to = "super::candidate::Column::Id",
        on_delete = "Cascade"
    )]
    Candidate,
    #[sea_orm(
        belongs_to = "super::email_label::Entity",
        from = "Column::EmailLabelId",
        to = "super::email_label::Column::Id"
    )]
    EmailLabel,
}

impl Related<super::candidate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidate.def()
    }
}

impl Related<super::email_label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EmailLabel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self, label: String) -> domain::CandidateEmail {
        domain::CandidateEmail {
            id: self.id,
            label,
            address: self.address,
            is_default: self.is_default,
        }
    }
}
