//! Candidate repository.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use common::{AppError, AppResult, PaginationParams};
use domain::{ActivityType, Candidate, CreateCandidate, UpdateCandidate};
use models::candidate::clean;
use models::entities::{candidate, candidate_email, user};
use models::{domain_user_ids, insert_candidate, load_candidates, record_activity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const SOURCE_TABLE: &str = "candidates";
const SOURCE_WEB: &str = "web";

/// A candidate together with the domain of its owner.
#[derive(Debug, Clone)]
pub struct ScopedCandidate {
    pub candidate: Candidate,
    pub domain_id: Uuid,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Newest first; `search` matches names or email addresses.
    async fn list(
        &self,
        domain_id: Uuid,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Candidate>, u64)>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ScopedCandidate>>;

    /// Insert and record `CandidateCreateWeb` for `actor`.
    async fn create(
        &self,
        actor: Uuid,
        domain_id: Uuid,
        data: CreateCandidate,
    ) -> AppResult<Candidate>;

    /// Apply and record `CandidateUpdate` for `actor`.
    async fn update(&self, actor: Uuid, id: Uuid, data: UpdateCandidate) -> AppResult<Candidate>;

    /// Remove and record `CandidateDelete` for `actor`.
    async fn delete(&self, actor: Uuid, candidate: Candidate) -> AppResult<()>;
}

pub struct CandidateStore {
    db: DatabaseConnection,
}

impl CandidateStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn search_condition(search: &str) -> Condition {
    let pattern = format!("%{}%", search.trim().to_lowercase());

    let lower = |column: candidate::Column| {
        Expr::expr(Func::lower(Expr::col((candidate::Entity, column)))).like(pattern.clone())
    };

    let by_email = candidate_email::Entity::find()
        .select_only()
        .column(candidate_email::Column::CandidateId)
        .filter(candidate_email::Column::Address.like(pattern.clone()))
        .into_query();

    Condition::any()
        .add(lower(candidate::Column::FirstName))
        .add(lower(candidate::Column::LastName))
        .add(candidate::Column::Id.in_subquery(by_email))
}

#[async_trait]
impl CandidateRepository for CandidateStore {
    async fn list(
        &self,
        domain_id: Uuid,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<(Vec<Candidate>, u64)> {
        let mut query = candidate::Entity::find()
            .filter(candidate::Column::OwnerUserId.in_subquery(domain_user_ids(domain_id)));

        if let Some(search) = search.as_deref().filter(|s| !s.trim().is_empty()) {
            query = query.filter(search_condition(search));
        }

        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(candidate::Column::AddedTime)
            .offset(params.offset())
            .limit(params.limit())
            .all(&self.db)
            .await?;

        Ok((load_candidates(&self.db, rows).await?, total))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ScopedCandidate>> {
        let Some((row, owner)) = candidate::Entity::find_by_id(id)
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let owner = owner.ok_or_else(|| AppError::internal("Candidate without owner"))?;
        let candidate = load_candidates(&self.db, vec![row])
            .await?
            .pop()
            .ok_or_else(|| AppError::internal("Candidate vanished while loading"))?;

        Ok(Some(ScopedCandidate {
            candidate,
            domain_id: owner.domain_id,
        }))
    }

    async fn create(
        &self,
        actor: Uuid,
        domain_id: Uuid,
        data: CreateCandidate,
    ) -> AppResult<Candidate> {
        let txn = self.db.begin().await?;

        let candidate = insert_candidate(&txn, domain_id, actor, SOURCE_WEB, &data).await?;
        record_activity(
            &txn,
            actor,
            ActivityType::CandidateCreateWeb,
            SOURCE_TABLE,
            Some(candidate.id),
            json!({ "formattedName": candidate.formatted_name() }),
        )
        .await?;

        txn.commit().await?;
        Ok(candidate)
    }

    async fn update(&self, actor: Uuid, id: Uuid, data: UpdateCandidate) -> AppResult<Candidate> {
        let txn = self.db.begin().await?;

        let row = candidate::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: candidate::ActiveModel = row.into();
        if data.first_name.is_some() {
            active.first_name = Set(clean(&data.first_name));
        }
        if data.last_name.is_some() {
            active.last_name = Set(clean(&data.last_name));
        }
        if data.objective.is_some() {
            active.objective = Set(clean(&data.objective));
        }
        if data.summary.is_some() {
            active.summary = Set(clean(&data.summary));
        }
        active.updated_time = Set(Utc::now());
        let row = active.update(&txn).await?;

        let candidate = load_candidates(&txn, vec![row])
            .await?
            .pop()
            .ok_or(AppError::NotFound)?;

        record_activity(
            &txn,
            actor,
            ActivityType::CandidateUpdate,
            SOURCE_TABLE,
            Some(candidate.id),
            json!({ "formattedName": candidate.formatted_name() }),
        )
        .await?;

        txn.commit().await?;
        Ok(candidate)
    }

    async fn delete(&self, actor: Uuid, candidate: Candidate) -> AppResult<()> {
        let txn = self.db.begin().await?;

        candidate::Entity::delete_by_id(candidate.id)
            .exec(&txn)
            .await?;
        // The row is gone, so the activity keeps only the name
        record_activity(
            &txn,
            actor,
            ActivityType::CandidateDelete,
            SOURCE_TABLE,
            None,
            json!({ "formattedName": candidate.formatted_name(), "id": candidate.id }),
        )
        .await?;

        txn.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::PostgresQueryBuilder;

    #[test]
    fn test_search_matches_names_and_emails() {
        let sql = candidate::Entity::find()
            .filter(search_condition(" Ada "))
            .into_query()
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains(r#"LOWER("candidates"."first_name") LIKE '%ada%'"#));
        assert!(sql.contains(r#"LOWER("candidates"."last_name") LIKE '%ada%'"#));
        assert!(sql.contains(r#""candidate_emails"."address" LIKE '%ada%'"#));
    }
}
