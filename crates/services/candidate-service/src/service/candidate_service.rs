//! Candidate access rules.
//!
//! A candidate is visible to every user of its owner's domain. Deleting is
//! limited to the owner and the domain's admins.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::repository::{CandidateRepository, ScopedCandidate};
use common::{AppError, AppResult, Paginated, PaginationParams};
use domain::{Candidate, CreateCandidate, UpdateCandidate};
use web::CurrentUser;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CandidateService: Send + Sync {
    async fn list(
        &self,
        user: CurrentUser,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<Candidate>>;

    async fn get(&self, user: CurrentUser, id: Uuid) -> AppResult<Candidate>;

    async fn create(&self, user: CurrentUser, data: CreateCandidate) -> AppResult<Candidate>;

    async fn update(
        &self,
        user: CurrentUser,
        id: Uuid,
        data: UpdateCandidate,
    ) -> AppResult<Candidate>;

    async fn delete(&self, user: CurrentUser, id: Uuid) -> AppResult<()>;
}

pub struct CandidateManager {
    candidates: Arc<dyn CandidateRepository>,
}

impl CandidateManager {
    pub fn new(candidates: Arc<dyn CandidateRepository>) -> Self {
        Self { candidates }
    }

    /// Load a candidate the caller's domain may see.
    async fn visible(&self, user: &CurrentUser, id: Uuid) -> AppResult<Candidate> {
        let ScopedCandidate {
            candidate,
            domain_id,
        } = self
            .candidates
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        if domain_id != user.domain_id {
            return Err(AppError::Forbidden);
        }
        Ok(candidate)
    }
}

#[async_trait]
impl CandidateService for CandidateManager {
    async fn list(
        &self,
        user: CurrentUser,
        search: Option<String>,
        params: PaginationParams,
    ) -> AppResult<Paginated<Candidate>> {
        let (candidates, total) = self
            .candidates
            .list(user.domain_id, search, params.clone())
            .await?;
        Ok(Paginated::new(candidates, &params, total))
    }

    async fn get(&self, user: CurrentUser, id: Uuid) -> AppResult<Candidate> {
        self.visible(&user, id).await
    }

    async fn create(&self, user: CurrentUser, data: CreateCandidate) -> AppResult<Candidate> {
        data.validate()?;
        let candidate = self.candidates.create(user.id, user.domain_id, data).await?;
        info!(candidate_id = %candidate.id, user_id = %user.id, "Candidate created");
        Ok(candidate)
    }

    async fn update(
        &self,
        user: CurrentUser,
        id: Uuid,
        data: UpdateCandidate,
    ) -> AppResult<Candidate> {
        if data.is_empty() {
            return Err(AppError::validation("No fields to update"));
        }
        self.visible(&user, id).await?;
        self.candidates.update(user.id, id, data).await
    }

    async fn delete(&self, user: CurrentUser, id: Uuid) -> AppResult<()> {
        let candidate = self.visible(&user, id).await?;
        if candidate.owner_user_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden);
        }

        self.candidates.delete(user.id, candidate).await?;
        info!(candidate_id = %id, user_id = %user.id, "Candidate deleted");
        Ok(())
    }
}
