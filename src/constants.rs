// API URLs
// Default fallback URL for the backend API. Prefer environment variables.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const PRODUCTION_API_URL: &str = "https://api.tricol.com";

// Token storage keys
// The same key names the web front end used, so a backend session survives
// a client swap during the migration window.
pub const ACCESS_TOKEN_KEY: &str = "tricol_access_token";
pub const REFRESH_TOKEN_KEY: &str = "tricol_refresh_token";

// OS keyring service name (account = storage key)
pub const KEYRING_SERVICE_NAME: &str = "tricol";

// Client-side routes
pub const LOGIN_ROUTE: &str = "/auth/login";
pub const RETURN_URL_PARAM: &str = "returnUrl";

// Environment variable names
pub const ENV_API_URL: &str = "API_URL";
pub const ENV_PRODUCTION: &str = "PRODUCTION";
