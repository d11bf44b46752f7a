use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{DEFAULT_API_URL, ENV_API_URL, ENV_PRODUCTION, PRODUCTION_API_URL};
use crate::utils::env_utils::{read_env, read_env_bool};

/// Relative API paths, joined onto the base URL per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEndpoints {
    pub auth: String,
    pub users: String,
    pub products: String,
    pub suppliers: String,
    pub orders: String,
    pub stock: String,
    pub lots: String,
    pub movements: String,
    pub bons_sortie: String,
}

impl ApiEndpoints {
    fn development() -> Self {
        Self {
            auth: "/auth".to_string(),
            users: "/users".to_string(),
            products: "/api/products".to_string(),
            suppliers: "/api/suppliers".to_string(),
            orders: "/api/orders".to_string(),
            stock: "/api/stocks".to_string(),
            lots: "/api/lots".to_string(),
            movements: "/api/movements".to_string(),
            bons_sortie: "/api/bons-sortie".to_string(),
        }
    }

    fn production() -> Self {
        Self {
            auth: "/api/auth".to_string(),
            users: "/api/users".to_string(),
            products: "/api/v1/produits".to_string(),
            suppliers: "/api/v1/fournisseurs".to_string(),
            ..Self::development()
        }
    }
}

/// Backend connection settings for one deployment target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub production: bool,
    pub api_url: String,
    pub endpoints: ApiEndpoints,
}

impl Default for Environment {
    fn default() -> Self {
        Self::development()
    }
}

impl Environment {
    pub fn development() -> Self {
        Self {
            production: false,
            api_url: DEFAULT_API_URL.to_string(),
            endpoints: ApiEndpoints::development(),
        }
    }

    pub fn production() -> Self {
        Self {
            production: true,
            api_url: PRODUCTION_API_URL.to_string(),
            endpoints: ApiEndpoints::production(),
        }
    }

    /// Build from environment variables, starting from the preset that
    /// `TRICOL_PRODUCTION` selects and overriding the base URL with
    /// `TRICOL_API_URL` when set.
    pub fn from_env() -> Self {
        let base = if read_env_bool(ENV_PRODUCTION, false) {
            Self::production()
        } else {
            Self::development()
        };
        Self {
            api_url: read_env(ENV_API_URL, &base.api_url),
            ..base
        }
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.join(&self.endpoints.auth))
    }

    pub fn register_url(&self) -> String {
        format!("{}/register", self.join(&self.endpoints.auth))
    }

    pub fn refresh_url(&self) -> String {
        format!("{}/refresh", self.join(&self.endpoints.auth))
    }

    pub fn me_url(&self) -> String {
        format!("{}/me", self.join(&self.endpoints.users))
    }

    pub fn products_url(&self) -> String {
        self.join(&self.endpoints.products)
    }

    pub fn suppliers_url(&self) -> String {
        self.join(&self.endpoints.suppliers)
    }

    pub fn orders_url(&self) -> String {
        self.join(&self.endpoints.orders)
    }

    pub fn stock_url(&self) -> String {
        self.join(&self.endpoints.stock)
    }

    /// Whether a URL targets one of the credential-exchange endpoints.
    ///
    /// Those requests never carry a bearer header and are excluded from
    /// 401 recovery: a 401 from them means the credentials themselves
    /// were rejected.
    pub fn is_auth_exempt(&self, url: &Url) -> bool {
        let path = url.path();
        path.contains(&format!("{}/login", self.endpoints.auth))
            || path.contains(&format!("{}/register", self.endpoints.auth))
            || path.contains(&format!("{}/refresh", self.endpoints.auth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    #[test]
    fn test_development_urls() {
        let env = Environment::development();
        assert_eq!(env.login_url(), "http://localhost:8080/auth/login");
        assert_eq!(env.me_url(), "http://localhost:8080/users/me");
        assert_eq!(env.products_url(), "http://localhost:8080/api/products");
        assert_eq!(env.suppliers_url(), "http://localhost:8080/api/suppliers");
        assert_eq!(env.stock_url(), "http://localhost:8080/api/stocks");
    }

    #[test]
    fn test_production_urls() {
        let env = Environment::production();
        assert_eq!(env.login_url(), "https://api.tricol.com/api/auth/login");
        assert_eq!(env.refresh_url(), "https://api.tricol.com/api/auth/refresh");
        assert_eq!(env.products_url(), "https://api.tricol.com/api/v1/produits");
        assert_eq!(
            env.suppliers_url(),
            "https://api.tricol.com/api/v1/fournisseurs"
        );
        assert_eq!(env.orders_url(), "https://api.tricol.com/api/orders");
    }

    #[test]
    fn test_auth_exempt_covers_credential_endpoints() {
        let env = Environment::development();
        assert!(env.is_auth_exempt(&parse("http://localhost:8080/auth/login")));
        assert!(env.is_auth_exempt(&parse("http://localhost:8080/auth/register")));
        assert!(env.is_auth_exempt(&parse("http://localhost:8080/auth/refresh")));
    }

    #[test]
    fn test_auth_exempt_rejects_domain_endpoints() {
        let env = Environment::development();
        assert!(!env.is_auth_exempt(&parse("http://localhost:8080/api/products")));
        assert!(!env.is_auth_exempt(&parse("http://localhost:8080/users/me")));
        assert!(!env.is_auth_exempt(&parse("http://localhost:8080/auth/logout")));
    }

    #[test]
    fn test_auth_exempt_in_production_preset() {
        let env = Environment::production();
        assert!(env.is_auth_exempt(&parse("https://api.tricol.com/api/auth/login")));
        assert!(!env.is_auth_exempt(&parse("https://api.tricol.com/api/v1/produits")));
    }
}
