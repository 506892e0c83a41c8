//! Persistence layer shared by every service: SeaORM entities, the schema
//! migrations and a few cross-service query helpers.

pub mod activity;
pub mod candidate;
pub mod db;
pub mod entities;
pub mod migrations;
pub mod scope;

pub use activity::record_activity;
pub use candidate::{find_candidate_id_by_email, insert_candidate, load_candidates};
pub use db::{run_migrations, Database, MigrateAction};
pub use migrations::Migrator;
pub use scope::domain_user_ids;
