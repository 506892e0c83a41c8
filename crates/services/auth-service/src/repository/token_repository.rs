//! Issued access/refresh token pairs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use common::AppResult;
use models::entities::token::{self, ActiveModel, Entity as TokenEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Token pair to persist after issuing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewToken {
    pub client_id: String,
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredToken {
    pub id: Uuid,
    pub client_id: String,
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

impl From<token::Model> for StoredToken {
    fn from(model: token::Model) -> Self {
        Self {
            id: model.id,
            client_id: model.client_id,
            user_id: model.user_id,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            expires_at: model.expires_at,
            refresh_expires_at: model.refresh_expires_at,
        }
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn create(&self, token: NewToken) -> AppResult<StoredToken>;

    async fn find_by_access_token(&self, access_token: &str) -> AppResult<Option<StoredToken>>;

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<StoredToken>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Returns whether a row was removed.
    async fn delete_by_access_token(&self, access_token: &str) -> AppResult<bool>;
}

pub struct TokenStore {
    db: DatabaseConnection,
}

impl TokenStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TokenRepository for TokenStore {
    async fn create(&self, token: NewToken) -> AppResult<StoredToken> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            client_id: Set(token.client_id),
            user_id: Set(token.user_id),
            access_token: Set(token.access_token),
            refresh_token: Set(token.refresh_token),
            expires_at: Set(token.expires_at),
            refresh_expires_at: Set(token.refresh_expires_at),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await?;

        Ok(StoredToken::from(model))
    }

    async fn find_by_access_token(&self, access_token: &str) -> AppResult<Option<StoredToken>> {
        let result = TokenEntity::find()
            .filter(token::Column::AccessToken.eq(access_token))
            .one(&self.db)
            .await?;
        Ok(result.map(StoredToken::from))
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> AppResult<Option<StoredToken>> {
        let result = TokenEntity::find()
            .filter(token::Column::RefreshToken.eq(refresh_token))
            .one(&self.db)
            .await?;
        Ok(result.map(StoredToken::from))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        TokenEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }

    async fn delete_by_access_token(&self, access_token: &str) -> AppResult<bool> {
        let result = TokenEntity::delete_many()
            .filter(token::Column::AccessToken.eq(access_token))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
