//! Candidate phone number entity.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "candidate_phones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub phone_label_id: i32,
    pub value: String,
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
        belongs_to = "super::phone_label::Entity",
        from = "Column::PhoneLabelId",
        to = "super::phone_label::Column::Id"
    )]
    PhoneLabel,
}

impl Related<super::candidate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidate.def()
    }
}

impl Related<super::phone_label::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PhoneLabel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self, label: String) -> domain::CandidatePhone {
        domain::CandidatePhone {
            id: self.id,
            label,
            value: self.value,
            is_default: self.is_default,
        }
    }
}
