//! Migration: make candidate email addresses unique per domain.
//!
//! `candidate_emails` gains a `domain_id` copied from the owning user, and a
//! unique index on `(domain_id, address)` lets concurrent sign-ups race
//! safely: the loser fails on insert instead of creating a duplicate.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const BACKFILL: &str = r#"
UPDATE candidate_emails AS ce
SET domain_id = u.domain_id
FROM candidates AS c
JOIN users AS u ON u.id = c.owner_user_id
WHERE ce.candidate_id = c.id
"#;

pub(crate) fn unique_address_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_candidate_emails_domain_address")
        .table(CandidateEmails::Table)
        .col(CandidateEmails::DomainId)
        .col(CandidateEmails::Address)
        .unique()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(CandidateEmails::Table)
                    .add_column(ColumnDef::new(CandidateEmails::DomainId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager.get_connection().execute_unprepared(BACKFILL).await?;

        manager
            .alter_table(
                Table::alter()
                    .table(CandidateEmails::Table)
                    .modify_column(ColumnDef::new(CandidateEmails::DomainId).uuid().not_null())
                    .to_owned(),
            )
            .await?;

        manager.create_index(unique_address_index()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_candidate_emails_domain_address")
                    .table(CandidateEmails::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .alter_table(
                Table::alter()
                    .table(CandidateEmails::Table)
                    .drop_column(CandidateEmails::DomainId)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum CandidateEmails {
    Table,
    DomainId,
    Address,
}
