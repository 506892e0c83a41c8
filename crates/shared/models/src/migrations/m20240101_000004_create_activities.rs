//! Migration: activity timeline.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Activities::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Activities::UserId).uuid().not_null())
                    .col(ColumnDef::new(Activities::ActivityType).integer().not_null())
                    .col(ColumnDef::new(Activities::SourceTable).string().not_null())
                    .col(ColumnDef::new(Activities::SourceId).uuid().null())
                    .col(ColumnDef::new(Activities::Params).json_binary().not_null())
                    .col(
                        ColumnDef::new(Activities::AddedTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activities_user")
                            .from(Activities::Table, Activities::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters by user set and sorts by time
        manager
            .create_index(
                Index::create()
                    .name("idx_activities_user_added")
                    .table(Activities::Table)
                    .col(Activities::UserId)
                    .col(Activities::AddedTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Activities {
    Table,
    Id,
    UserId,
    ActivityType,
    SourceTable,
    SourceId,
    Params,
    AddedTime,
}
