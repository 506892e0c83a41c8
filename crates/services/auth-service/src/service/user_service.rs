//! User listing and creation inside a domain.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::repository::{NewUser, UserRepository};
use common::{AppError, AppResult};
use domain::{is_valid_role, validate_email, Password, User, UserRole};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Request to add a user to the caller's domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    async fn list_domain_users(&self, domain_id: Uuid) -> AppResult<Vec<User>>;

    async fn create_user(
        &self,
        domain_id: Uuid,
        created_by: Uuid,
        request: CreateUser,
    ) -> AppResult<User>;
}

pub struct UserManager {
    users: Arc<dyn UserRepository>,
}

impl UserManager {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.users.find_by_id(id).await?.ok_or(AppError::NotFound)
    }

    async fn list_domain_users(&self, domain_id: Uuid) -> AppResult<Vec<User>> {
        self.users.list_by_domain(domain_id).await
    }

    async fn create_user(
        &self,
        domain_id: Uuid,
        created_by: Uuid,
        request: CreateUser,
    ) -> AppResult<User> {
        let email = request.email.trim().to_lowercase();
        validate_email(&email)?;

        let role = match request.role.as_deref() {
            Some(role) if !is_valid_role(role) => {
                return Err(AppError::validation(format!("Invalid role: {}", role)))
            }
            Some(role) => UserRole::from(role),
            None => UserRole::User,
        };

        let password_hash = Password::new(&request.password)?.into_string();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("Email"));
        }

        let user = self
            .users
            .create(
                NewUser {
                    domain_id,
                    email,
                    password_hash,
                    first_name: request.first_name.trim().to_string(),
                    last_name: request.last_name.trim().to_string(),
                    role,
                },
                created_by,
            )
            .await?;

        info!(user_id = %user.id, domain_id = %domain_id, "User created");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use chrono::Utc;

    fn request(email: &str, password: &str, role: Option<&str>) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            role: role.map(str::to_string),
        }
    }

    fn existing_user() -> User {
        User {
            id: Uuid::new_v4(),
            domain_id: Uuid::new_v4(),
            email: "taken@example.com".to_string(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(existing_user())));
        users.expect_create().never();

        let service = UserManager::new(Arc::new(users));
        let result = service
            .create_user(
                Uuid::new_v4(),
                Uuid::new_v4(),
                request("Taken@Example.com", "password123", None),
            )
            .await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let mut users = MockUserRepository::new();
        users.expect_create().never();

        let service = UserManager::new(Arc::new(users));
        let result = service
            .create_user(Uuid::new_v4(), Uuid::new_v4(), request("new@example.com", "short", None))
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_invalid_role_rejected() {
        let service = UserManager::new(Arc::new(MockUserRepository::new()));
        let result = service
            .create_user(
                Uuid::new_v4(),
                Uuid::new_v4(),
                request("new@example.com", "password123", Some("owner")),
            )
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_in_callers_domain() {
        let domain_id = Uuid::new_v4();
        let creator = Uuid::new_v4();

        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));
        users
            .expect_create()
            .withf(move |new_user, created_by| {
                new_user.domain_id == domain_id
                    && new_user.email == "new@example.com"
                    && new_user.role == UserRole::Admin
                    && new_user.password_hash.starts_with("$argon2")
                    && *created_by == creator
            })
            .times(1)
            .returning(|new_user, _| {
                Ok(User {
                    id: Uuid::new_v4(),
                    domain_id: new_user.domain_id,
                    email: new_user.email,
                    password_hash: new_user.password_hash,
                    first_name: new_user.first_name,
                    last_name: new_user.last_name,
                    role: new_user.role,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UserManager::new(Arc::new(users));
        let user = service
            .create_user(
                domain_id,
                creator,
                request(" New@Example.com ", "password123", Some("admin")),
            )
            .await
            .unwrap();
        assert_eq!(user.domain_id, domain_id);
        assert_eq!(user.first_name, "Grace");
    }
}
