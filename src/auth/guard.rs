use log::debug;

use super::session::SessionService;
use crate::constants::{LOGIN_ROUTE, RETURN_URL_PARAM};

/// Outcome of a route check: proceed, or go to the login screen instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Granted,
    Redirect(String),
}

/// Decide whether a protected route may be entered. Pure decision, no
/// side effects; the caller performs the redirect. The requested path
/// rides along as `returnUrl` so login can land back on it.
pub fn check_route(session: &SessionService, path: &str) -> RouteAccess {
    if session.is_authenticated() {
        RouteAccess::Granted
    } else {
        let target = format!(
            "{}?{}={}",
            LOGIN_ROUTE,
            RETURN_URL_PARAM,
            urlencoding::encode(path)
        );
        debug!(
            "Unauthenticated access to {}, redirecting to {}",
            path, target
        );
        RouteAccess::Redirect(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::NoopNavigator;
    use crate::auth::storage::MemoryStorage;
    use crate::auth::token_manager::TokenManager;
    use crate::config::Environment;
    use std::sync::Arc;

    fn make_session() -> (SessionService, Arc<TokenManager>) {
        let tokens = Arc::new(TokenManager::new(Arc::new(MemoryStorage::new())));
        let session = SessionService::new(
            reqwest::Client::new(),
            Environment::development(),
            Arc::clone(&tokens),
            Arc::new(NoopNavigator),
        );
        (session, tokens)
    }

    #[tokio::test]
    async fn test_grants_access_with_token_present() {
        let (session, tokens) = make_session();
        tokens.set_tokens("access-1", None).await;

        assert_eq!(check_route(&session, "/produits"), RouteAccess::Granted);
    }

    #[tokio::test]
    async fn test_redirects_without_token() {
        let (session, _) = make_session();

        assert_eq!(
            check_route(&session, "/produits"),
            RouteAccess::Redirect("/auth/login?returnUrl=%2Fproduits".to_string())
        );
    }

    #[tokio::test]
    async fn test_redirect_encodes_query_strings() {
        let (session, _) = make_session();

        assert_eq!(
            check_route(&session, "/produits?page=2"),
            RouteAccess::Redirect("/auth/login?returnUrl=%2Fproduits%3Fpage%3D2".to_string())
        );
    }

    #[tokio::test]
    async fn test_expired_token_still_grants() {
        // Presence is the guard's whole criterion; a stale token gets
        // caught by the 401 path, not here.
        let (session, tokens) = make_session();
        let expired =
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.eyJleHAiOjEyMzQ1Njc4OTAsInN1YiI6InRlc3QifQ.sig";
        tokens.set_tokens(expired, None).await;

        assert_eq!(check_route(&session, "/dashboard"), RouteAccess::Granted);
    }
}
