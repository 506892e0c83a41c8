//! Migration: candidates with their email addresses and phone numbers.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Users;
use super::m20240101_000002_create_lookup_tables::{EmailLabels, PhoneLabels};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Candidates::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Candidates::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Candidates::OwnerUserId).uuid().not_null())
                    .col(ColumnDef::new(Candidates::FirstName).string().null())
                    .col(ColumnDef::new(Candidates::LastName).string().null())
                    .col(ColumnDef::new(Candidates::Objective).text().null())
                    .col(ColumnDef::new(Candidates::Summary).text().null())
                    .col(ColumnDef::new(Candidates::Source).string().not_null().default("web"))
                    .col(
                        ColumnDef::new(Candidates::AddedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Candidates::UpdatedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_candidates_owner")
                            .from(Candidates::Table, Candidates::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_candidates_owner_added")
                    .table(Candidates::Table)
                    .col(Candidates::OwnerUserId)
                    .col(Candidates::AddedTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CandidateEmails::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CandidateEmails::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CandidateEmails::CandidateId).uuid().not_null())
                    .col(ColumnDef::new(CandidateEmails::EmailLabelId).integer().not_null())
                    .col(ColumnDef::new(CandidateEmails::Address).string().not_null())
                    .col(
                        ColumnDef::new(CandidateEmails::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_candidate_emails_candidate")
                            .from(CandidateEmails::Table, CandidateEmails::CandidateId)
                            .to(Candidates::Table, Candidates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_candidate_emails_label")
                            .from(CandidateEmails::Table, CandidateEmails::EmailLabelId)
                            .to(EmailLabels::Table, EmailLabels::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_candidate_emails_unique_address")
                    .table(CandidateEmails::Table)
                    .col(CandidateEmails::CandidateId)
                    .col(CandidateEmails::Address)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_candidate_emails_address")
                    .table(CandidateEmails::Table)
                    .col(CandidateEmails::Address)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CandidatePhones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CandidatePhones::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CandidatePhones::CandidateId).uuid().not_null())
                    .col(ColumnDef::new(CandidatePhones::PhoneLabelId).integer().not_null())
                    .col(ColumnDef::new(CandidatePhones::Value).string().not_null())
                    .col(
                        ColumnDef::new(CandidatePhones::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_candidate_phones_candidate")
                            .from(CandidatePhones::Table, CandidatePhones::CandidateId)
                            .to(Candidates::Table, Candidates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_candidate_phones_label")
                            .from(CandidatePhones::Table, CandidatePhones::PhoneLabelId)
                            .to(PhoneLabels::Table, PhoneLabels::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CandidatePhones::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CandidateEmails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Candidates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Candidates {
    Table,
    Id,
    OwnerUserId,
    FirstName,
    LastName,
    Objective,
    Summary,
    Source,
    AddedTime,
    UpdatedTime,
}

#[derive(DeriveIden)]
enum CandidateEmails {
    Table,
    Id,
    CandidateId,
    EmailLabelId,
    Address,
    IsDefault,
}

#[derive(DeriveIden)]
enum CandidatePhones {
    Table,
    Id,
    CandidateId,
    PhoneLabelId,
    Value,
    IsDefault,
}
