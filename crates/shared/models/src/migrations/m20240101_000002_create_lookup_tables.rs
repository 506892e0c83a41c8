//! Migration: reference tables and seeded contact labels.

use sea_orm_migration::prelude::*;

use domain::{DEFAULT_EMAIL_LABELS, DEFAULT_PHONE_LABELS};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `id SERIAL PRIMARY KEY` shared by every lookup table.
fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmailLabels::Table)
                    .if_not_exists()
                    .col(&mut id_column(EmailLabels::Id))
                    .col(ColumnDef::new(EmailLabels::Description).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PhoneLabels::Table)
                    .if_not_exists()
                    .col(&mut id_column(PhoneLabels::Id))
                    .col(ColumnDef::new(PhoneLabels::Description).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RatingTags::Table)
                    .if_not_exists()
                    .col(&mut id_column(RatingTags::Id))
                    .col(ColumnDef::new(RatingTags::Description).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Languages::Table)
                    .if_not_exists()
                    .col(&mut id_column(Languages::Id))
                    .col(ColumnDef::new(Languages::Code).string_len(8).not_null().unique_key())
                    .col(ColumnDef::new(Languages::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Universities::Table)
                    .if_not_exists()
                    .col(&mut id_column(Universities::Id))
                    .col(ColumnDef::new(Universities::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(&mut id_column(Organizations::Id))
                    .col(ColumnDef::new(Organizations::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Organizations::Notes).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SocialNetworks::Table)
                    .if_not_exists()
                    .col(&mut id_column(SocialNetworks::Id))
                    .col(ColumnDef::new(SocialNetworks::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(SocialNetworks::Url).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(&mut id_column(Countries::Id))
                    .col(ColumnDef::new(Countries::Name).string().not_null())
                    .col(ColumnDef::new(Countries::Code).string_len(2).not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(&mut id_column(Products::Id))
                    .col(ColumnDef::new(Products::Name).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        let mut email_labels = Query::insert()
            .into_table(EmailLabels::Table)
            .columns([EmailLabels::Description])
            .to_owned();
        for label in DEFAULT_EMAIL_LABELS {
            email_labels.values_panic([(*label).into()]);
        }
        manager.exec_stmt(email_labels).await?;

        let mut phone_labels = Query::insert()
            .into_table(PhoneLabels::Table)
            .columns([PhoneLabels::Description])
            .to_owned();
        for label in DEFAULT_PHONE_LABELS {
            phone_labels.values_panic([(*label).into()]);
        }
        manager.exec_stmt(phone_labels).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Products::Table.into_iden(),
            Countries::Table.into_iden(),
            SocialNetworks::Table.into_iden(),
            Organizations::Table.into_iden(),
            Universities::Table.into_iden(),
            Languages::Table.into_iden(),
            RatingTags::Table.into_iden(),
            PhoneLabels::Table.into_iden(),
            EmailLabels::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EmailLabels {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
pub enum PhoneLabels {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum RatingTags {
    Table,
    Id,
    Description,
}

#[derive(DeriveIden)]
enum Languages {
    Table,
    Id,
    Code,
    Name,
}

#[derive(DeriveIden)]
enum Universities {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    Notes,
}

#[derive(DeriveIden)]
enum SocialNetworks {
    Table,
    Id,
    Name,
    Url,
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
}
