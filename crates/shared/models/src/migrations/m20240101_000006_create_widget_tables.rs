//! Migration: banners, widget pages, venues and job openings.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_accounts::{Domains, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Banners::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Banners::Title).string().not_null())
                    .col(ColumnDef::new(Banners::Text).text().not_null())
                    .col(ColumnDef::new(Banners::Link).string().null())
                    .col(ColumnDef::new(Banners::Style).string().null())
                    .col(ColumnDef::new(Banners::Active).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Banners::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WidgetPages::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(WidgetPages::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(WidgetPages::DomainId).uuid().not_null())
                    .col(ColumnDef::new(WidgetPages::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(WidgetPages::WidgetKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(WidgetPages::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_widget_pages_domain")
                            .from(WidgetPages::Table, WidgetPages::DomainId)
                            .to(Domains::Table, Domains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_widget_pages_user")
                            .from(WidgetPages::Table, WidgetPages::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Venues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Venues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Venues::DomainId).uuid().not_null())
                    .col(ColumnDef::new(Venues::Name).string().not_null())
                    .col(ColumnDef::new(Venues::City).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_venues_domain")
                            .from(Venues::Table, Venues::DomainId)
                            .to(Domains::Table, Domains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JobOpenings::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(JobOpenings::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(JobOpenings::DomainId).uuid().not_null())
                    .col(ColumnDef::new(JobOpenings::VenueId).uuid().null())
                    .col(ColumnDef::new(JobOpenings::Title).string().not_null())
                    .col(ColumnDef::new(JobOpenings::Description).text().null())
                    .col(ColumnDef::new(JobOpenings::IsOpen).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(JobOpenings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_openings_domain")
                            .from(JobOpenings::Table, JobOpenings::DomainId)
                            .to(Domains::Table, Domains::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_job_openings_venue")
                            .from(JobOpenings::Table, JobOpenings::VenueId)
                            .to(Venues::Table, Venues::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(JobOpenings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WidgetPages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banners::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Banners {
    Table,
    Id,
    Title,
    Text,
    Link,
    Style,
    Active,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WidgetPages {
    Table,
    Id,
    DomainId,
    UserId,
    WidgetKey,
    Name,
}

#[derive(DeriveIden)]
enum Venues {
    Table,
    Id,
    DomainId,
    Name,
    City,
}

#[derive(DeriveIden)]
enum JobOpenings {
    Table,
    Id,
    DomainId,
    VenueId,
    Title,
    Description,
    IsOpen,
    CreatedAt,
}
