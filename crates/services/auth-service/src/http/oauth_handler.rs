//! OAuth2 endpoints.

use axum::{
    async_trait,
    extract::{Extension, FromRequest, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    response::Json,
    Form,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{GRANT_TYPE_PASSWORD, GRANT_TYPE_REFRESH_TOKEN};
use web::{extract_token, CurrentUser};

use super::state::AppState;
use crate::service::{ClientCredentials, TokenGrant, TokenResponse};

/// Token request as posted by OAuth2 clients.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenRequest {
    pub grant_type: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_token: Option<String>,
}

impl TokenRequest {
    pub fn into_grant(self) -> AppResult<(ClientCredentials, TokenGrant)> {
        let credentials = ClientCredentials {
            client_id: self.client_id,
            client_secret: self.client_secret,
        };

        let grant = match self.grant_type.as_str() {
            GRANT_TYPE_PASSWORD => match (self.username, self.password) {
                (Some(username), Some(password)) => TokenGrant::Password {
                    username: username.trim().to_lowercase(),
                    password,
                },
                _ => {
                    return Err(AppError::bad_request(
                        "username and password are required",
                    ))
                }
            },
            GRANT_TYPE_REFRESH_TOKEN => match self.refresh_token {
                Some(refresh_token) => TokenGrant::RefreshToken { refresh_token },
                None => return Err(AppError::bad_request("refresh_token is required")),
            },
            other => {
                return Err(AppError::bad_request(format!(
                    "Unsupported grant_type: {}",
                    other
                )))
            }
        };

        Ok((credentials, grant))
    }
}

/// Accepts either a form-encoded or a JSON token request.
pub struct TokenRequestBody(pub TokenRequest);

#[async_trait]
impl<S> FromRequest<S> for TokenRequestBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(req.headers()) {
            let Form(body) = Form::<TokenRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(Self(body))
        } else {
            let Json(body) = Json::<TokenRequest>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request(e.body_text()))?;
            Ok(Self(body))
        }
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |v| v.starts_with("application/x-www-form-urlencoded"))
}

#[derive(Debug, Serialize)]
pub struct AuthorizeResponse {
    pub user_id: Uuid,
}

/// `POST /v1/oauth2/token`
pub async fn issue_token(
    State(state): State<AppState>,
    TokenRequestBody(request): TokenRequestBody,
) -> AppResult<Json<TokenResponse>> {
    let (credentials, grant) = request.into_grant()?;
    let token = state.auth.issue_token(credentials, grant).await?;
    Ok(Json(token))
}

/// `POST /v1/oauth2/revoke`
pub async fn revoke_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<Value>> {
    let token = extract_token(&headers)?;
    let revoked = state.auth.revoke_token(&token).await?;
    Ok(Json(json!({ "revoked": revoked })))
}

/// `GET /v1/oauth2/authorize`
pub async fn authorize(
    Extension(current_user): Extension<CurrentUser>,
) -> Json<AuthorizeResponse> {
    Json(AuthorizeResponse {
        user_id: current_user.id,
    })
}
