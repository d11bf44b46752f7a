use std::sync::Arc;

use log::{debug, error, info};

use super::backend_client::BackendClient;
use super::error_handling::map_api_error;
use crate::error::{AppError, AppResult};
use crate::models::{Fournisseur, FournisseurPayload};

/// Typed access to the supplier endpoints.
#[derive(Debug)]
pub struct FournisseurClient {
    backend: Arc<BackendClient>,
    base_url: String,
}

impl FournisseurClient {
    pub fn new(backend: Arc<BackendClient>, base_url: String) -> Self {
        Self { backend, base_url }
    }

    pub async fn list(&self) -> AppResult<Vec<Fournisseur>> {
        debug!("Fetching suppliers from {}", self.base_url);

        let response = self.backend.get(&self.base_url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Supplier list API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let fournisseurs: Vec<Fournisseur> = response.json().await.map_err(|e| {
            AppError::SerdeError(format!("Failed to parse supplier list response: {}", e))
        })?;
        Ok(fournisseurs)
    }

    pub async fn get(&self, id: i64) -> AppResult<Fournisseur> {
        let url = format!("{}/{}", self.base_url, id);
        debug!("Fetching supplier {} from {}", id, url);

        let response = self.backend.get(&url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Supplier fetch API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let fournisseur: Fournisseur = response.json().await.map_err(|e| {
            AppError::SerdeError(format!("Failed to parse supplier response: {}", e))
        })?;
        Ok(fournisseur)
    }

    pub async fn create(&self, payload: &FournisseurPayload) -> AppResult<Fournisseur> {
        info!("Creating supplier '{}'", payload.raison_sociale);

        let response = self.backend.post_json(&self.base_url, payload).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Supplier create API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let fournisseur: Fournisseur = response.json().await.map_err(|e| {
            AppError::SerdeError(format!("Failed to parse supplier response: {}", e))
        })?;
        info!("Created supplier with id {:?}", fournisseur.id);
        Ok(fournisseur)
    }

    pub async fn update(&self, id: i64, payload: &FournisseurPayload) -> AppResult<Fournisseur> {
        let url = format!("{}/{}", self.base_url, id);
        info!("Updating supplier {} via {}", id, url);

        let response = self.backend.put_json(&url, payload).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Supplier update API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        let fournisseur: Fournisseur = response.json().await.map_err(|e| {
            AppError::SerdeError(format!("Failed to parse supplier response: {}", e))
        })?;
        Ok(fournisseur)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let url = format!("{}/{}", self.base_url, id);
        info!("Deleting supplier {} via {}", id, url);

        let response = self.backend.delete(&url).await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error text".to_string());
            error!("Supplier delete API error: {} - {}", status, error_text);
            return Err(map_api_error(status.as_u16(), &error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::{NoopNavigator, SessionService};
    use crate::auth::storage::MemoryStorage;
    use crate::auth::token_manager::TokenManager;
    use crate::config::Environment;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_client(base: &str) -> FournisseurClient {
        let env = Environment {
            api_url: base.to_string(),
            ..Environment::development()
        };
        let http = reqwest::Client::new();
        let tokens = Arc::new(TokenManager::new(Arc::new(MemoryStorage::new())));
        let session = Arc::new(SessionService::new(
            http.clone(),
            env.clone(),
            Arc::clone(&tokens),
            Arc::new(NoopNavigator),
        ));
        let backend = Arc::new(BackendClient::new(
            http,
            env.clone(),
            Arc::clone(&tokens),
            session,
        ));
        FournisseurClient::new(backend, env.suppliers_url())
    }

    fn sample_payload() -> FournisseurPayload {
        FournisseurPayload {
            raison_sociale: "Textile Atlas SARL".to_string(),
            address: "12 Rue des Tisserands".to_string(),
            city: "Casablanca".to_string(),
            ice: "001234567000089".to_string(),
            contact_person: "M. Bennis".to_string(),
            email: "contact@textileatlas.ma".to_string(),
            phone: "+212 5 22 00 00 00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_update_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/suppliers/3"))
            .and(body_json(serde_json::json!({
                "raisonSociale": "Textile Atlas SARL",
                "address": "12 Rue des Tisserands",
                "city": "Casablanca",
                "ice": "001234567000089",
                "contactPerson": "M. Bennis",
                "email": "contact@textileatlas.ma",
                "phone": "+212 5 22 00 00 00"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3,
                "raisonSociale": "Textile Atlas SARL",
                "address": "12 Rue des Tisserands",
                "city": "Casablanca",
                "ice": "001234567000089",
                "contactPerson": "M. Bennis",
                "email": "contact@textileatlas.ma",
                "phone": "+212 5 22 00 00 00"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let updated = client.update(3, &sample_payload()).await.unwrap();
        assert_eq!(updated.id, Some(3));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_create_conflict_maps_to_conflict_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/suppliers"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "message": "ICE already registered",
                "errorType": "conflict"
            })))
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let err = client.create(&sample_payload()).await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[tokio::test]
    async fn test_list_maps_access_denied() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/suppliers"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = make_client(&server.uri());
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, AppError::AccessDenied(_)));
    }
}
