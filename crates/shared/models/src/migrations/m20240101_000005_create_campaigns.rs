//! Migration: campaigns and their per-candidate sends.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::{Domains, Users};
use super::m20240101_000003_create_candidates::Candidates;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Campaigns::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Campaigns::DomainId).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::UserId).uuid().not_null())
                    .col(ColumnDef::new(Campaigns::Channel).string_len(16).not_null())
                    .col(ColumnDef::new(Campaigns::Name).string().not_null())
                    .col(ColumnDef::new(Campaigns::Content).json_binary().not_null())
                    .col(
                        ColumnDef::new(Campaigns::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaigns_domain")
                            .from(Campaigns::Table, Campaigns::DomainId)
                            .to(Domains::Table, Domains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaigns_user")
                            .from(Campaigns::Table, Campaigns::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CampaignSends::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CampaignSends::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(CampaignSends::CampaignId).uuid().not_null())
                    .col(ColumnDef::new(CampaignSends::CandidateId).uuid().not_null())
                    .col(ColumnDef::new(CampaignSends::Status).string_len(16).not_null())
                    .col(ColumnDef::new(CampaignSends::Error).text().null())
                    .col(
                        ColumnDef::new(CampaignSends::SentAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_sends_campaign")
                            .from(CampaignSends::Table, CampaignSends::CampaignId)
                            .to(Campaigns::Table, Campaigns::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_campaign_sends_candidate")
                            .from(CampaignSends::Table, CampaignSends::CandidateId)
                            .to(Candidates::Table, Candidates::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CampaignSends::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Campaigns {
    Table,
    Id,
    DomainId,
    UserId,
    Channel,
    Name,
    Content,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CampaignSends {
    Table,
    Id,
    CampaignId,
    CandidateId,
    Status,
    Error,
    SentAt,
}
