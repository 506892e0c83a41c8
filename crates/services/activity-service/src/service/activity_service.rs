//! Activity listing, aggregation and creation for the caller's domain.

use async_trait::async_trait;
use chrono::Duration;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{
    ActivityResponse, ActivityType, ACTIVITY_AGGREGATE_WINDOW_MINUTES, MAX_AGGREGATE_ROWS,
};
use web::CurrentUser;

use super::aggregate::{aggregate, AggregatedActivity};
use crate::repository::{ActivityRepository, TimeRange};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Activity submitted by a client; the type arrives as its numeric code.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub activity_type: i32,
    pub source_table: String,
    pub source_id: Option<Uuid>,
    pub params: Value,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn list(
        &self,
        user: CurrentUser,
        range: TimeRange,
        params: PaginationParams,
    ) -> AppResult<Paginated<ActivityResponse>>;

    /// Collapsed feed built from at most `MAX_AGGREGATE_ROWS` of the newest
    /// activities in range.
    async fn aggregate(
        &self,
        user: CurrentUser,
        range: TimeRange,
    ) -> AppResult<Vec<AggregatedActivity>>;

    async fn create(&self, user: CurrentUser, data: NewActivity) -> AppResult<ActivityResponse>;
}

pub struct ActivityManager {
    activities: Arc<dyn ActivityRepository>,
}

impl ActivityManager {
    pub fn new(activities: Arc<dyn ActivityRepository>) -> Self {
        Self { activities }
    }
}

fn check_range(range: &TimeRange) -> AppResult<()> {
    match (range.start, range.end) {
        (Some(start), Some(end)) if start > end => Err(AppError::bad_request(
            "start_datetime must not be after end_datetime",
        )),
        _ => Ok(()),
    }
}

#[async_trait]
impl ActivityService for ActivityManager {
    async fn list(
        &self,
        user: CurrentUser,
        range: TimeRange,
        params: PaginationParams,
    ) -> AppResult<Paginated<ActivityResponse>> {
        check_range(&range)?;
        let (rows, total) = self
            .activities
            .list(user.domain_id, range, params.clone())
            .await?;

        let data = rows
            .into_iter()
            .map(|row| ActivityResponse::new(row.activity, &row.username))
            .collect();
        Ok(Paginated::new(data, &params, total))
    }

    async fn aggregate(
        &self,
        user: CurrentUser,
        range: TimeRange,
    ) -> AppResult<Vec<AggregatedActivity>> {
        check_range(&range)?;
        let rows = self
            .activities
            .list_recent(user.domain_id, range, MAX_AGGREGATE_ROWS)
            .await?;
        Ok(aggregate(
            &rows,
            Duration::minutes(ACTIVITY_AGGREGATE_WINDOW_MINUTES),
        ))
    }

    async fn create(&self, user: CurrentUser, data: NewActivity) -> AppResult<ActivityResponse> {
        let activity_type = ActivityType::try_from(data.activity_type)
            .map_err(|e| AppError::bad_request(e.to_string()))?;
        if data.source_table.trim().is_empty() {
            return Err(AppError::validation("source_table is required"));
        }
        let params = match data.params {
            Value::Null => Value::Object(Default::default()),
            Value::Object(map) => Value::Object(map),
            _ => return Err(AppError::validation("params must be a JSON object")),
        };

        let created = self
            .activities
            .create(
                user.id,
                activity_type,
                data.source_table,
                data.source_id,
                params,
            )
            .await?;

        Ok(ActivityResponse::new(created.activity, &created.username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockActivityRepository, NamedActivity};
    use chrono::{DateTime, Utc};
    use domain::{Activity, UserRole};
    use serde_json::json;

    fn user() -> CurrentUser {
        CurrentUser {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            role: UserRole::User,
            domain_id: Uuid::new_v4(),
        }
    }

    fn activity(user_id: Uuid, activity_type: ActivityType, params: Value) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            user_id,
            activity_type,
            source_table: "candidates".to_string(),
            source_id: None,
            params,
            added_time: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_list_scoped_to_caller_domain_and_rendered() {
        let caller = user();
        let domain_id = caller.domain_id;
        let mut repo = MockActivityRepository::new();
        repo.expect_list()
            .withf(move |d, _, _| *d == domain_id)
            .returning(|_, _, _| {
                Ok((
                    vec![NamedActivity {
                        activity: activity(
                            Uuid::new_v4(),
                            ActivityType::CandidateCreateWeb,
                            json!({"formattedName": "Grace Hopper"}),
                        ),
                        username: "Ada Lovelace".to_string(),
                    }],
                    1,
                ))
            });

        let page = ActivityManager::new(Arc::new(repo))
            .list(caller, TimeRange::default(), PaginationParams::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 1);
        assert_eq!(
            page.data[0].readable_text,
            "Ada Lovelace added candidate Grace Hopper"
        );
    }

    #[tokio::test]
    async fn test_inverted_range_rejected() {
        let start = "2024-05-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let end = "2024-05-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut repo = MockActivityRepository::new();
        repo.expect_list_recent().never();

        let result = ActivityManager::new(Arc::new(repo))
            .aggregate(
                user(),
                TimeRange {
                    start: Some(start),
                    end: Some(end),
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_aggregate_reads_a_bounded_window() {
        let caller = user();
        let domain_id = caller.domain_id;
        let mut repo = MockActivityRepository::new();
        repo.expect_list_recent()
            .withf(move |d, range, limit| {
                *d == domain_id && range.start.is_none() && *limit == MAX_AGGREGATE_ROWS
            })
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let rows = ActivityManager::new(Arc::new(repo))
            .aggregate(caller, TimeRange::default())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_create_unknown_type_is_bad_request() {
        let mut repo = MockActivityRepository::new();
        repo.expect_create().never();

        let result = ActivityManager::new(Arc::new(repo))
            .create(
                user(),
                NewActivity {
                    activity_type: 999,
                    source_table: "candidates".to_string(),
                    source_id: None,
                    params: Value::Null,
                },
            )
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_create_records_for_caller() {
        let caller = user();
        let caller_id = caller.id;
        let mut repo = MockActivityRepository::new();
        repo.expect_create()
            .withf(move |user_id, t, table, _, params| {
                *user_id == caller_id
                    && *t == ActivityType::CampaignCreate
                    && table == "campaigns"
                    && params.is_object()
            })
            .returning(|user_id, t, _, _, params| {
                Ok(NamedActivity {
                    activity: activity(user_id, t, params),
                    username: "Ada Lovelace".to_string(),
                })
            });

        let response = ActivityManager::new(Arc::new(repo))
            .create(
                caller,
                NewActivity {
                    activity_type: 10,
                    source_table: "campaigns".to_string(),
                    source_id: None,
                    params: json!({"channel": "sms", "name": "Spring"}),
                },
            )
            .await
            .unwrap();
        assert_eq!(
            response.readable_text,
            "Ada Lovelace created sms campaign Spring"
        );
    }
}
