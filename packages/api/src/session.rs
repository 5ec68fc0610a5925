//! Sign-in state built on [`ApiClient`] and its [`store::SessionStore`].

use reqwest::Method;
use serde::{Deserialize, Serialize};
use store::User;

use crate::client::ApiClient;
use crate::error::{ApiError, Operation};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Body returned by `POST /api/auth/login`. Older backends name the token
/// `access_token`, some send both.
#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    access_token: Option<String>,
    user: User,
}

impl LoginResponse {
    fn into_parts(self) -> Result<(String, User), ApiError> {
        match self.token.or(self.access_token) {
            Some(token) if !token.is_empty() => Ok((token, self.user)),
            _ => {
                tracing::warn!("Login response carried no token");
                Err(ApiError::InvalidResponse {
                    message: Operation::Login.default_message().to_string(),
                })
            }
        }
    }
}

/// Account details for `POST /api/auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// Login, logout and current-user queries.
#[derive(Clone, Debug)]
pub struct SessionManager {
    client: ApiClient,
}

impl SessionManager {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Exchange credentials for a token and persist the session.
    ///
    /// On any failure the store is left as it was, except when the store
    /// itself fails to write; then it is cleared so no stale session remains.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        let response: LoginResponse = self
            .client
            .send_json(
                Operation::Login,
                Method::POST,
                "/api/auth/login",
                &LoginRequest { username, password },
            )
            .await?;
        let (token, user) = response.into_parts()?;

        let store = self.client.store();
        if let Err(e) = store.save(&token, &user) {
            tracing::warn!("Failed to persist session: {}", e);
            if let Err(e) = store.clear() {
                tracing::warn!("Failed to clear session after write error: {}", e);
            }
            return Err(e.into());
        }

        tracing::info!("Signed in as {}", user.username);
        Ok(user)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.client
            .send_json(Operation::Register, Method::POST, "/api/auth/register", request)
            .await
    }

    /// Re-fetch the profile of the signed-in user and update the cached copy.
    pub async fn refresh_user(&self) -> Result<User, ApiError> {
        let user: User = self
            .client
            .get_json(Operation::CurrentUser, "/api/auth/me")
            .await?;
        let store = self.client.store();
        // The session may have been dropped while the request was in flight
        if let Some(token) = store.read_token() {
            store.save(&token, &user)?;
        }
        Ok(user)
    }

    /// Forget the session. Never fails; storage errors are only logged.
    pub fn logout(&self) {
        if let Err(e) = self.client.store().clear() {
            tracing::warn!("Failed to clear session on logout: {}", e);
        }
        tracing::info!("Signed out");
    }

    pub fn current_user(&self) -> Option<User> {
        self.client.store().read_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.store().read_token().is_some()
    }
}
