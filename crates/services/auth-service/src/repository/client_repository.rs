//! Registered OAuth2 client applications.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use common::AppResult;
use models::entities::client::{self, Entity as ClientEntity};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClient {
    pub client_id: String,
    pub client_secret: String,
    pub client_name: String,
}

impl OAuthClient {
    pub fn secret_matches(&self, secret: &str) -> bool {
        let expected = self.client_secret.as_bytes();
        let given = secret.as_bytes();
        // Constant-time over the expected length
        expected.len() == given.len()
            && expected
                .iter()
                .zip(given)
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl From<client::Model> for OAuthClient {
    fn from(model: client::Model) -> Self {
        Self {
            client_id: model.client_id,
            client_secret: model.client_secret,
            client_name: model.client_name,
        }
    }
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find(&self, client_id: &str) -> AppResult<Option<OAuthClient>>;
}

pub struct ClientStore {
    db: DatabaseConnection,
}

impl ClientStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ClientRepository for ClientStore {
    async fn find(&self, client_id: &str) -> AppResult<Option<OAuthClient>> {
        let result = ClientEntity::find_by_id(client_id.to_string())
            .one(&self.db)
            .await?;
        Ok(result.map(OAuthClient::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_matches() {
        let client = OAuthClient {
            client_id: "web".to_string(),
            client_secret: "s3cret".to_string(),
            client_name: "Web app".to_string(),
        };
        assert!(client.secret_matches("s3cret"));
        assert!(!client.secret_matches("s3creT"));
        assert!(!client.secret_matches("s3cret-longer"));
        assert!(!client.secret_matches(""));
    }
}
