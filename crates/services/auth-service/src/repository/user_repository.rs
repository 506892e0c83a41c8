//! User accounts.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde_json::json;
use uuid::Uuid;

use common::AppResult;
use domain::{ActivityType, User, UserRole};
use models::entities::user::{self, ActiveModel, Entity as UserEntity};
use models::record_activity;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Fields of a user about to be inserted. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub domain_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Users of one domain, oldest first.
    async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<User>>;

    /// Insert the user and record a `UserCreate` activity for `created_by`.
    async fn create(&self, new_user: NewUser, created_by: Uuid) -> AppResult<User>;
}

pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<User>> {
        let users = UserEntity::find()
            .filter(user::Column::DomainId.eq(domain_id))
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn create(&self, new_user: NewUser, created_by: Uuid) -> AppResult<User> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            domain_id: Set(new_user.domain_id),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            role: Set(new_user.role.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        let user = User::from(model);

        record_activity(
            &txn,
            created_by,
            ActivityType::UserCreate,
            "users",
            Some(user.id),
            json!({ "newUser": user.display_name() }),
        )
        .await?;

        txn.commit().await?;
        Ok(user)
    }
}
