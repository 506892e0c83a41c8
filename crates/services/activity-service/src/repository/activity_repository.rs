//! Activity repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use serde_json::Value;
use uuid::Uuid;

use common::{AppResult, PaginationParams};
use domain::{Activity, ActivityType, User};
use models::entities::{activity, user};
use models::{domain_user_ids, record_activity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Inclusive bounds on `added_time`; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// An activity with the display name of the user who performed it.
#[derive(Debug, Clone)]
pub struct NamedActivity {
    pub activity: Activity,
    pub username: String,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// One page of the domain's activities, newest first.
    async fn list(
        &self,
        domain_id: Uuid,
        range: TimeRange,
        params: PaginationParams,
    ) -> AppResult<(Vec<NamedActivity>, u64)>;

    /// The `limit` newest activities of the domain in range, newest first.
    async fn list_recent(
        &self,
        domain_id: Uuid,
        range: TimeRange,
        limit: u64,
    ) -> AppResult<Vec<NamedActivity>>;

    async fn create(
        &self,
        user_id: Uuid,
        activity_type: ActivityType,
        source_table: String,
        source_id: Option<Uuid>,
        params: Value,
    ) -> AppResult<NamedActivity>;
}

pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn scoped(domain_id: Uuid, range: TimeRange) -> Select<activity::Entity> {
        let mut query = activity::Entity::find()
            .filter(activity::Column::UserId.in_subquery(domain_user_ids(domain_id)));
        if let Some(start) = range.start {
            query = query.filter(activity::Column::AddedTime.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(activity::Column::AddedTime.lte(end));
        }
        query
            .order_by_desc(activity::Column::AddedTime)
            .order_by_desc(activity::Column::Id)
    }

    fn recent(domain_id: Uuid, range: TimeRange, limit: u64) -> Select<activity::Entity> {
        Self::scoped(domain_id, range).limit(limit)
    }
}

fn named(rows: Vec<(activity::Model, Option<user::Model>)>) -> AppResult<Vec<NamedActivity>> {
    rows.into_iter()
        .map(|(row, owner)| {
            let username = owner
                .map(|u| User::from(u).display_name())
                .unwrap_or_default();
            Ok(NamedActivity {
                activity: Activity::try_from(row)?,
                username,
            })
        })
        .collect()
}

#[async_trait]
impl ActivityRepository for ActivityStore {
    async fn list(
        &self,
        domain_id: Uuid,
        range: TimeRange,
        params: PaginationParams,
    ) -> AppResult<(Vec<NamedActivity>, u64)> {
        let query = Self::scoped(domain_id, range);
        let total = query.clone().count(&self.db).await?;

        let rows = query
            .offset(params.offset())
            .limit(params.limit())
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;

        Ok((named(rows)?, total))
    }

    async fn list_recent(
        &self,
        domain_id: Uuid,
        range: TimeRange,
        limit: u64,
    ) -> AppResult<Vec<NamedActivity>> {
        let rows = Self::recent(domain_id, range, limit)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        named(rows)
    }

    async fn create(
        &self,
        user_id: Uuid,
        activity_type: ActivityType,
        source_table: String,
        source_id: Option<Uuid>,
        params: Value,
    ) -> AppResult<NamedActivity> {
        let activity = record_activity(
            &self.db,
            user_id,
            activity_type,
            &source_table,
            source_id,
            params,
        )
        .await?;

        let username = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .map(|u| User::from(u).display_name())
            .unwrap_or_default();
        Ok(NamedActivity { activity, username })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{sea_query::PostgresQueryBuilder, QueryTrait};

    #[test]
    fn test_scoped_query_filters_domain_and_range() {
        let start = "2024-03-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let sql = ActivityStore::scoped(
            Uuid::nil(),
            TimeRange {
                start: Some(start),
                end: None,
            },
        )
        .into_query()
        .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#""activities"."user_id" IN (SELECT"#));
        assert!(sql.contains(r#""activities"."added_time" >="#));
        assert!(!sql.contains(r#""activities"."added_time" <="#));
        assert!(sql.contains(r#"ORDER BY "activities"."added_time" DESC"#));
    }

    #[test]
    fn test_recent_query_is_capped() {
        let sql = ActivityStore::recent(Uuid::nil(), TimeRange::default(), 1000)
            .into_query()
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"ORDER BY "activities"."added_time" DESC"#));
        assert!(sql.ends_with("LIMIT 1000"));
    }
}
