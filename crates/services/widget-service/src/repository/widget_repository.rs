//! Banners, widget pages and job openings.

use std::future::Future;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{ActivityType, Banner, CreateCandidate, JobOpening, WidgetPage};
use models::entities::{banner, job_opening, venue, widget_page};
use models::{find_candidate_id_by_email, insert_candidate, record_activity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SOURCE_WIDGET: &str = "widget";
const SOURCE_TABLE: &str = "candidates";

#[derive(Debug, Clone)]
pub struct NewBanner {
    pub title: String,
    pub text: String,
    pub link: Option<String>,
    pub style: Option<String>,
}

/// Result of a widget sign-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// A candidate in the domain already had the address
    Existing(Uuid),
    Created(Uuid),
}

#[derive(Debug, Clone, Serialize)]
pub struct JobOpeningView {
    #[serde(flatten)]
    pub opening: JobOpening,
    pub venue_name: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait WidgetRepository: Send + Sync {
    async fn active_banner(&self) -> AppResult<Option<Banner>>;

    /// Insert as the only active banner.
    async fn create_banner(&self, data: NewBanner) -> AppResult<Banner>;

    /// False when no banner has that id.
    async fn deactivate_banner(&self, id: Uuid) -> AppResult<bool>;

    async fn find_widget(&self, widget_key: String) -> AppResult<Option<WidgetPage>>;

    /// Reuse the domain's candidate with this email or create one owned by
    /// the widget's user.
    async fn contact_only(
        &self,
        widget: WidgetPage,
        data: CreateCandidate,
    ) -> AppResult<ContactOutcome>;

    async fn open_job_openings(&self, domain_id: Uuid) -> AppResult<Vec<JobOpeningView>>;
}

pub struct WidgetStore {
    db: DatabaseConnection,
}

impl WidgetStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl WidgetStore {
    async fn try_contact(
        &self,
        widget: WidgetPage,
        data: &CreateCandidate,
    ) -> AppResult<ContactOutcome> {
        let txn = self.db.begin().await?;

        for address in data.normalized_addresses() {
            if let Some(id) = find_candidate_id_by_email(&txn, widget.domain_id, &address).await? {
                txn.commit().await?;
                return Ok(ContactOutcome::Existing(id));
            }
        }

        let candidate =
            insert_candidate(&txn, widget.domain_id, widget.user_id, SOURCE_WIDGET, data).await?;
        record_activity(
            &txn,
            widget.user_id,
            ActivityType::CandidateCreateWidget,
            SOURCE_TABLE,
            Some(candidate.id),
            json!({
                "formattedName": candidate.formatted_name(),
                "widgetName": widget.name,
            }),
        )
        .await?;

        txn.commit().await?;
        Ok(ContactOutcome::Created(candidate.id))
    }
}

/// A sign-up that lost an insert race on its email address resolves to the
/// candidate that won it. The losing transaction has already rolled back.
async fn settle_email_race<A, L, F>(attempt: A, lookup: L) -> AppResult<ContactOutcome>
where
    A: Future<Output = AppResult<ContactOutcome>>,
    L: FnOnce() -> F,
    F: Future<Output = AppResult<Option<Uuid>>>,
{
    match attempt.await {
        Err(AppError::Conflict(entity)) => match lookup().await? {
            Some(id) => Ok(ContactOutcome::Existing(id)),
            None => Err(AppError::Conflict(entity)),
        },
        outcome => outcome,
    }
}

#[async_trait]
impl WidgetRepository for WidgetStore {
    async fn active_banner(&self) -> AppResult<Option<Banner>> {
        let row = banner::Entity::find()
            .filter(banner::Column::Active.eq(true))
            .order_by_desc(banner::Column::CreatedAt)
            .one(&self.db)
            .await?;
        Ok(row.map(Banner::from))
    }

    async fn create_banner(&self, data: NewBanner) -> AppResult<Banner> {
        let txn = self.db.begin().await?;

        banner::Entity::update_many()
            .col_expr(banner::Column::Active, Expr::value(false))
            .filter(banner::Column::Active.eq(true))
            .exec(&txn)
            .await?;

        let model = banner::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(data.title),
            text: Set(data.text),
            link: Set(data.link),
            style: Set(data.style),
            active: Set(true),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(Banner::from(model))
    }

    async fn deactivate_banner(&self, id: Uuid) -> AppResult<bool> {
        let result = banner::Entity::update_many()
            .col_expr(banner::Column::Active, Expr::value(false))
            .filter(banner::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn find_widget(&self, widget_key: String) -> AppResult<Option<WidgetPage>> {
        let row = widget_page::Entity::find()
            .filter(widget_page::Column::WidgetKey.eq(widget_key))
            .one(&self.db)
            .await?;
        Ok(row.map(WidgetPage::from))
    }

    async fn contact_only(
        &self,
        widget: WidgetPage,
        data: CreateCandidate,
    ) -> AppResult<ContactOutcome> {
        let domain_id = widget.domain_id;
        let addresses = data.normalized_addresses();
        let db = &self.db;
        let addresses = &addresses;
        settle_email_race(self.try_contact(widget, &data), || async move {
            for address in addresses {
                if let Some(id) = find_candidate_id_by_email(db, domain_id, address).await? {
                    return Ok(Some(id));
                }
            }
            Ok(None)
        })
        .await
    }

    async fn open_job_openings(&self, domain_id: Uuid) -> AppResult<Vec<JobOpeningView>> {
        let rows = job_opening::Entity::find()
            .filter(job_opening::Column::DomainId.eq(domain_id))
            .filter(job_opening::Column::IsOpen.eq(true))
            .order_by_desc(job_opening::Column::CreatedAt)
            .find_also_related(venue::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(opening, venue)| JobOpeningView {
                opening: JobOpening::from(opening),
                venue_name: venue.map(|v| v.name),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lost_insert_race_reports_existing() {
        let winner = Uuid::new_v4();
        let outcome = settle_email_race(
            async { Err(AppError::conflict("Candidate with email ada@example.com")) },
            || async move { Ok(Some(winner)) },
        )
        .await
        .unwrap();
        assert_eq!(outcome, ContactOutcome::Existing(winner));
    }

    #[tokio::test]
    async fn test_conflict_without_winner_is_kept() {
        let result = settle_email_race(
            async { Err(AppError::conflict("Candidate with email ada@example.com")) },
            || async { Ok(None) },
        )
        .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_other_outcomes_pass_through() {
        let created = Uuid::new_v4();
        let other = Uuid::new_v4();
        let outcome = settle_email_race(
            async move { Ok(ContactOutcome::Created(created)) },
            || async move { Ok(Some(other)) },
        )
        .await
        .unwrap();
        assert_eq!(outcome, ContactOutcome::Created(created));

        let result = settle_email_race(async { Err(AppError::NotFound) }, || async move {
            Ok(Some(other))
        })
        .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
