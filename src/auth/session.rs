use std::sync::{Arc, RwLock};

use log::{debug, error, info, warn};
use tokio::sync::{Mutex, broadcast};

use super::token_introspection;
use super::token_manager::TokenManager;
use crate::api_clients::error_handling::map_api_error;
use crate::config::Environment;
use crate::constants::LOGIN_ROUTE;
use crate::error::{AppError, AppResult};
use crate::models::{LoginCredentials, RegisterData, TokenResponse, User};

/// Navigation seam for the hosting shell. Logout and guard redirects go
/// through this instead of reaching into any UI machinery.
pub trait Navigator: Send + Sync + std::fmt::Debug {
    fn navigate(&self, route: &str);
}

/// Navigator that drops every request, for headless embedding and tests.
#[derive(Debug, Default)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, _route: &str) {}
}

/// Owns the current-user cell and every auth operation. All collaborators
/// are injected; the service carries no global state.
#[derive(Debug)]
pub struct SessionService {
    http: reqwest::Client,
    env: Environment,
    tokens: Arc<TokenManager>,
    navigator: Arc<dyn Navigator>,
    current_user: RwLock<Option<User>>,
    user_events: broadcast::Sender<Option<User>>,
    refresh_lock: Mutex<()>,
}

impl SessionService {
    pub fn new(
        http: reqwest::Client,
        env: Environment,
        tokens: Arc<TokenManager>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let (user_events, _) = broadcast::channel(16);
        Self {
            http,
            env,
            tokens,
            navigator,
            current_user: RwLock::new(None),
            user_events,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Latest published session user, if any.
    pub fn current_user(&self) -> Option<User> {
        match self.current_user.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                warn!("Session cell lock poisoned: {}", e);
                None
            }
        }
    }

    /// Receiver for session changes from this point on. Pair with
    /// [`current_user`](Self::current_user) for the present value.
    pub fn subscribe(&self) -> broadcast::Receiver<Option<User>> {
        self.user_events.subscribe()
    }

    /// Token presence, nothing more. See `TokenManager::has_valid_token`.
    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_valid_token()
    }

    fn publish_user(&self, user: Option<User>) {
        match self.current_user.write() {
            Ok(mut guard) => *guard = user.clone(),
            Err(e) => warn!("Session cell lock poisoned: {}", e),
        }
        // No receivers is fine; the cell holds the latest value.
        let _ = self.user_events.send(user);
    }

    /// Exchange credentials for a token pair and establish the session.
    ///
    /// Login succeeds whenever the token exchange succeeded. When the
    /// current-user endpoint fails afterwards, the user is synthesized
    /// from the access token's claims and the session still comes up.
    /// A failed token exchange clears any stored tokens and propagates.
    pub async fn login(&self, credentials: &LoginCredentials) -> AppResult<User> {
        let url = self.env.login_url();
        info!("Logging in via {}", url);

        let tokens = match self.post_token_request(&url, credentials).await {
            Ok(tokens) => tokens,
            Err(e) => {
                error!("Login failed: {}", e);
                self.tokens.clear().await;
                return Err(e);
            }
        };

        self.tokens
            .set_tokens(&tokens.access_token, tokens.refresh_token.as_deref())
            .await;

        match self.fetch_current_user().await {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!(
                    "Current-user endpoint unavailable after login: {}. Building user from token claims.",
                    e
                );
                let user = Self::user_from_claims(&tokens.access_token, credentials);
                self.publish_user(Some(user.clone()));
                Ok(user)
            }
        }
    }

    /// Create an account. No tokens are stored and no session starts;
    /// the backend response passes through as-is.
    pub async fn register(&self, data: &RegisterData) -> AppResult<serde_json::Value> {
        let url = self.env.register_url();
        info!("Registering {} via {}", data.username, url);

        let response = self
            .http
            .post(&url)
            .json(data)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Registration failed with status {}: {}", status, text);
            return Err(map_api_error(status.as_u16(), &text));
        }

        let text = response
            .text()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to read response: {}", e)))?;
        if text.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Concurrent callers coalesce on one in-flight exchange: whoever
    /// waited while another refresh replaced the access token returns
    /// without a second round trip.
    ///
    /// The session is torn down only when the refresh endpoint rejects
    /// the refresh token with 401 or 403. Transport failures and other
    /// statuses propagate with the session intact.
    pub async fn refresh_token(&self) -> AppResult<()> {
        let Some(refresh_token) = self.tokens.refresh_token() else {
            return Err(AppError::AuthError(
                "No refresh token available".to_string(),
            ));
        };
        let observed_access = self.tokens.access_token();

        let _guard = self.refresh_lock.lock().await;

        let current_access = self.tokens.access_token();
        if current_access.is_some() && current_access != observed_access {
            debug!("Access token already refreshed by a concurrent caller");
            return Ok(());
        }

        let url = self.env.refresh_url();
        debug!("Refreshing access token via {}", url);

        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            warn!("Refresh endpoint returned {}, ending session", status);
            self.logout().await;
            return Err(AppError::AuthError(
                "Refresh token invalid or expired".to_string(),
            ));
        }
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_api_error(status.as_u16(), &text));
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse refresh response: {}", e)))?;

        // Only the access token rotates; the stored refresh token keeps
        // serving even when the response carries a new one.
        self.tokens.set_access_token(&tokens.access_token).await;
        info!("Access token refreshed");
        Ok(())
    }

    /// Clear both tokens, null the session cell, and send the navigator
    /// to the login screen. Safe to call repeatedly.
    pub async fn logout(&self) {
        info!("Logging out");
        self.tokens.clear().await;
        self.publish_user(None);
        self.navigator.navigate(LOGIN_ROUTE);
    }

    /// Fetch the current user with the stored access token and publish it.
    pub async fn fetch_current_user(&self) -> AppResult<User> {
        let Some(access_token) = self.tokens.access_token() else {
            return Err(AppError::AuthError("No access token available".to_string()));
        };

        let url = self.env.me_url();
        debug!("Fetching current user from {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_api_error(status.as_u16(), &text));
        }

        let user: User = response
            .json()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse user response: {}", e)))?;
        self.publish_user(Some(user.clone()));
        Ok(user)
    }

    /// Restore the session from a stored token at startup. A stale token
    /// gets one refresh-and-retry; any unrecoverable failure ends the
    /// session.
    pub async fn load_current_user(&self) {
        if !self.tokens.has_valid_token() {
            return;
        }

        match self.fetch_current_user().await {
            Ok(user) => info!("Session restored for {}", user.username),
            Err(AppError::AuthError(_)) if self.tokens.refresh_token().is_some() => {
                debug!("Stored access token rejected, attempting refresh");
                match self.refresh_token().await {
                    Ok(()) => {
                        if let Err(e) = self.fetch_current_user().await {
                            warn!("Session restore failed after refresh: {}", e);
                            self.logout().await;
                        }
                    }
                    Err(e) => {
                        warn!("Session restore refresh failed: {}", e);
                        self.logout().await;
                    }
                }
            }
            Err(e) => {
                warn!("Session restore failed: {}", e);
                self.logout().await;
            }
        }
    }

    async fn post_token_request<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<TokenResponse> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_api_error(status.as_u16(), &text));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::SerdeError(format!("Failed to parse token response: {}", e)))
    }

    /// Build a session user out of token claims when the current-user
    /// endpoint is unavailable. Display fallback only; the claims never
    /// feed authorization decisions.
    fn user_from_claims(access_token: &str, credentials: &LoginCredentials) -> User {
        let claims = token_introspection::decode_claims(access_token);

        let sub = claims
            .as_ref()
            .and_then(|c| c.get("sub"))
            .and_then(|s| s.as_str())
            .map(str::to_string);
        let string_list = |key: &str| {
            claims
                .as_ref()
                .and_then(|c| c.get(key))
                .and_then(|v| v.as_array())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect::<Vec<_>>()
                })
        };
        let email = claims
            .as_ref()
            .and_then(|c| c.get("email"))
            .and_then(|e| e.as_str())
            .map(str::to_string);
        let full_name = claims
            .as_ref()
            .and_then(|c| c.get("fullName"))
            .and_then(|n| n.as_str())
            .map(str::to_string);

        User {
            id: sub.as_deref().and_then(|s| s.parse().ok()).unwrap_or(0),
            username: sub.unwrap_or_else(|| credentials.email.clone()),
            email: email.or_else(|| Some(credentials.email.clone())),
            full_name,
            roles: string_list("roles").unwrap_or_else(|| vec!["ADMIN".to_string()]),
            permissions: string_list("permissions").unwrap_or_default(),
        }
    }
}
