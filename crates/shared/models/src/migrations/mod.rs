//! Database migrations.
//!
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240101_000001_create_accounts;
mod m20240101_000002_create_lookup_tables;
mod m20240101_000003_create_candidates;
mod m20240101_000004_create_activities;
mod m20240101_000005_create_campaigns;
mod m20240101_000006_create_widget_tables;
mod m20240102_000001_scope_candidate_emails;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_accounts::Migration),
            Box::new(m20240101_000002_create_lookup_tables::Migration),
            Box::new(m20240101_000003_create_candidates::Migration),
            Box::new(m20240101_000004_create_activities::Migration),
            Box::new(m20240101_000005_create_campaigns::Migration),
            Box::new(m20240101_000006_create_widget_tables::Migration),
            Box::new(m20240102_000001_scope_candidate_emails::Migration),
        ]
    }
}
