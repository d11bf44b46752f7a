pub mod api_clients;
pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod utils;

use std::sync::Arc;

use crate::api_clients::backend_client::BackendClient;
use crate::api_clients::fournisseur_client::FournisseurClient;
use crate::api_clients::produit_client::ProduitClient;
use crate::auth::session::{Navigator, SessionService};
use crate::auth::storage::TokenStorage;
use crate::auth::token_manager::TokenManager;
use crate::config::Environment;

/// Fully wired client graph over one shared HTTP connection pool.
///
/// Token storage and navigation are injected so hosts can choose the
/// OS keychain and a real router while tests run on in-memory fakes.
pub struct AppContext {
    pub config: Environment,
    pub tokens: Arc<TokenManager>,
    pub session: Arc<SessionService>,
    pub backend: Arc<BackendClient>,
    pub produits: ProduitClient,
    pub fournisseurs: FournisseurClient,
}

impl AppContext {
    pub fn new(
        config: Environment,
        storage: Arc<dyn TokenStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(TokenManager::new(storage));
        let session = Arc::new(SessionService::new(
            http.clone(),
            config.clone(),
            Arc::clone(&tokens),
            navigator,
        ));
        let backend = Arc::new(BackendClient::new(
            http,
            config.clone(),
            Arc::clone(&tokens),
            Arc::clone(&session),
        ));
        let produits = ProduitClient::new(Arc::clone(&backend), config.products_url());
        let fournisseurs = FournisseurClient::new(Arc::clone(&backend), config.suppliers_url());

        Self {
            config,
            tokens,
            session,
            backend,
            produits,
            fournisseurs,
        }
    }

    /// Restore persisted tokens, then re-establish the session user.
    /// Both steps are best effort; a cold start with no stored tokens
    /// simply leaves the session signed out.
    pub async fn bootstrap(&self) {
        self.tokens.hydrate().await;
        self.session.load_current_user().await;
    }
}
