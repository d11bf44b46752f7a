use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, Request, Response, StatusCode};

use crate::auth::session::SessionService;
use crate::auth::token_manager::TokenManager;
use crate::config::Environment;
use crate::error::{AppError, AppResult};

/// Authenticated transport for domain API calls.
///
/// Every request flows through [`execute`](Self::execute), which owns
/// bearer attachment and the 401 refresh-and-retry-once recovery, so
/// the typed clients stay free of auth concerns.
#[derive(Debug)]
pub struct BackendClient {
    http: Client,
    env: Environment,
    tokens: Arc<TokenManager>,
    session: Arc<SessionService>,
}

impl BackendClient {
    pub fn new(
        http: Client,
        env: Environment,
        tokens: Arc<TokenManager>,
        session: Arc<SessionService>,
    ) -> Self {
        Self {
            http,
            env,
            tokens,
            session,
        }
    }

    /// Start a request builder for an arbitrary method and URL.
    pub fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http.request(method, url)
    }

    /// Dispatch a request with bearer attachment and 401 recovery.
    ///
    /// Non-401 responses pass through unchanged, success or not; status
    /// mapping belongs to the caller. Requests targeting the credential
    /// endpoints are exempt from both the header and the recovery.
    ///
    /// The recovery runs at most once: a 401, a coalesced refresh, one
    /// retry with the new token. A second 401 passes through like any
    /// other failure.
    pub async fn execute(&self, request: Request) -> AppResult<Response> {
        let exempt = self.env.is_auth_exempt(request.url());
        let url = request.url().clone();
        // Unauthenticated copy kept around for the potential retry.
        let retry_template = request.try_clone();

        let mut request = request;
        if !exempt {
            if let Some(token) = self.tokens.access_token() {
                Self::attach_bearer(&mut request, &token)?;
            }
        }

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))?;

        if response.status() != StatusCode::UNAUTHORIZED || exempt {
            return Ok(response);
        }
        if self.tokens.refresh_token().is_none() {
            debug!(
                "401 from {} with no refresh token stored, passing through",
                url
            );
            return Ok(response);
        }
        let Some(mut retry) = retry_template else {
            // Streaming bodies cannot be re-sent; hand the 401 back.
            debug!("401 from {} on a non-cloneable request, passing through", url);
            return Ok(response);
        };

        debug!("401 from {}, refreshing access token and retrying once", url);
        self.session.refresh_token().await?;

        let Some(token) = self.tokens.access_token() else {
            warn!("Token refresh reported success but no access token is present");
            self.session.logout().await;
            return Err(AppError::AuthError("Token refresh failed".to_string()));
        };
        Self::attach_bearer(&mut retry, &token)?;

        self.http
            .execute(retry)
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to reach {}: {}", url, e)))
    }

    fn attach_bearer(request: &mut Request, token: &str) -> AppResult<()> {
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| AppError::InternalError(format!("Invalid token for header: {}", e)))?;
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }

    pub async fn get(&self, url: &str) -> AppResult<Response> {
        let request = self.http.get(url).build()?;
        self.execute(request).await
    }

    pub async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<Response> {
        let request = self.http.post(url).json(body).build()?;
        self.execute(request).await
    }

    pub async fn put_json<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> AppResult<Response> {
        let request = self.http.put(url).json(body).build()?;
        self.execute(request).await
    }

    pub async fn delete(&self, url: &str) -> AppResult<Response> {
        let request = self.http.delete(url).build()?;
        self.execute(request).await
    }
}
