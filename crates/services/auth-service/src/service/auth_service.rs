//! OAuth2 token issuing, verification and revocation.
//!
//! Access tokens are HS256 JWTs, but a signature alone is not enough: every
//! issued pair is stored, and a token only verifies while its row exists.
//! Revoking or refreshing deletes the row.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::repository::{ClientRepository, NewToken, TokenRepository, UserRepository};
use common::{AppError, AppResult};
use domain::{
    Password, User, ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_DAYS, TOKEN_TYPE_BEARER,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Hash that never verifies, checked when the user is unknown so both
/// paths cost one Argon2 verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXlzYWx0MTIzNDU2$ZHVtbXloYXNoMTIzNDU2Nzg5MDEyMzQ1Njc4OTAxMg";

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub domain_id: Uuid,
    pub exp: i64,
    pub iat: i64,
    /// Keeps tokens issued within the same second distinct
    pub jti: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenGrant {
    Password { username: String, password: String },
    RefreshToken { refresh_token: String },
}

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange client credentials plus a grant for a fresh token pair.
    async fn issue_token(
        &self,
        client: ClientCredentials,
        grant: TokenGrant,
    ) -> AppResult<TokenResponse>;

    /// Claims of a live access token.
    async fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Delete the stored token. Returns whether it existed.
    async fn revoke_token(&self, token: &str) -> AppResult<bool>;
}

pub struct Authenticator {
    users: Arc<dyn UserRepository>,
    clients: Arc<dyn ClientRepository>,
    tokens: Arc<dyn TokenRepository>,
    secret_key: String,
}

impl Authenticator {
    pub fn new(
        users: Arc<dyn UserRepository>,
        clients: Arc<dyn ClientRepository>,
        tokens: Arc<dyn TokenRepository>,
        secret_key: String,
    ) -> Self {
        Self {
            users,
            clients,
            tokens,
            secret_key,
        }
    }

    async fn authenticate_client(&self, credentials: &ClientCredentials) -> AppResult<()> {
        let client = self.clients.find(&credentials.client_id).await?;
        match client {
            Some(client) if client.secret_matches(&credentials.client_secret) => Ok(()),
            _ => {
                debug!(client_id = %credentials.client_id, "Client authentication failed");
                Err(AppError::InvalidCredentials)
            }
        }
    }

    async fn authenticate_user(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self.users.find_by_email(username).await?;

        let hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = Password::from_hash(hash).verify(password);

        match user {
            Some(user) if password_valid => Ok(user),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn encode_access_token(&self, user: &User) -> AppResult<(String, chrono::DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(ACCESS_TOKEN_TTL_SECONDS);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            domain_id: user.domain_id,
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret_key.as_bytes()),
        )?;

        Ok((token, expires_at))
    }

    async fn issue_for_user(&self, client_id: &str, user: &User) -> AppResult<TokenResponse> {
        let (access_token, expires_at) = self.encode_access_token(user)?;
        let refresh_token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());

        self.tokens
            .create(NewToken {
                client_id: client_id.to_string(),
                user_id: user.id,
                access_token: access_token.clone(),
                refresh_token: refresh_token.clone(),
                expires_at,
                refresh_expires_at: Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            })
            .await?;

        info!(user_id = %user.id, client_id, "Issued access token");

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: ACCESS_TOKEN_TTL_SECONDS,
            refresh_token,
        })
    }

    fn decode_access_token(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret_key.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn issue_token(
        &self,
        client: ClientCredentials,
        grant: TokenGrant,
    ) -> AppResult<TokenResponse> {
        self.authenticate_client(&client).await?;

        match grant {
            TokenGrant::Password { username, password } => {
                let user = self.authenticate_user(&username, &password).await?;
                self.issue_for_user(&client.client_id, &user).await
            }
            TokenGrant::RefreshToken { refresh_token } => {
                let stored = self
                    .tokens
                    .find_by_refresh_token(&refresh_token)
                    .await?
                    .filter(|t| t.client_id == client.client_id)
                    .ok_or(AppError::Unauthorized)?;

                if stored.refresh_expires_at <= Utc::now() {
                    self.tokens.delete(stored.id).await?;
                    return Err(AppError::Unauthorized);
                }

                let user = self
                    .users
                    .find_by_id(stored.user_id)
                    .await?
                    .ok_or(AppError::Unauthorized)?;

                // Rotation: the old pair stops working immediately
                self.tokens.delete(stored.id).await?;
                self.issue_for_user(&client.client_id, &user).await
            }
        }
    }

    async fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.decode_access_token(token)?;

        match self.tokens.find_by_access_token(token).await? {
            Some(stored) if stored.expires_at > Utc::now() => Ok(claims),
            _ => Err(AppError::Unauthorized),
        }
    }

    async fn revoke_token(&self, token: &str) -> AppResult<bool> {
        let revoked = self.tokens.delete_by_access_token(token).await?;
        if revoked {
            info!("Access token revoked");
        }
        Ok(revoked)
    }
}
